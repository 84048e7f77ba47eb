//! Grouping: partition a shuffled roster into fixed-size teams.

use crate::models::{DrawSession, SessionError};
use rand::seq::SliceRandom;

/// Recompute the session's grouping from scratch.
///
/// 1. Reject `size == 0` with `InvalidGroupSize`.
/// 2. Shuffle a copy of the roster (`SliceRandom::shuffle` is Fisher-Yates, so
///    every permutation is equally likely).
/// 3. Chunk the permutation into consecutive groups of `size`; the last group
///    may be short when the roster length is not a multiple of `size`.
///
/// An empty roster yields zero groups; `size` larger than the roster yields a
/// single group holding everyone.
pub fn generate_groups(session: &mut DrawSession, size: usize) -> Result<(), SessionError> {
    if size == 0 {
        return Err(SessionError::InvalidGroupSize);
    }
    let mut shuffled = session.roster.clone();
    shuffled.shuffle(&mut rand::thread_rng());
    session.groups = shuffled.chunks(size).map(|c| c.to_vec()).collect();
    Ok(())
}

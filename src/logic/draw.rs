//! Winner selection: committed draws, display previews, winner record reset.

use crate::models::{DrawSession, Participant, ParticipantId, SessionError};
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Participants allowed to win the next draw: the whole roster, minus anyone
/// already in the winner record unless repeat winning is on.
fn eligible_pool(session: &DrawSession) -> Vec<&Participant> {
    if session.allow_repeat {
        return session.roster.iter().collect();
    }
    let won: HashSet<ParticipantId> = session.winners.iter().map(|p| p.id).collect();
    session
        .roster
        .iter()
        .filter(|p| !won.contains(&p.id))
        .collect()
}

/// Draw one winner uniformly at random from the eligible pool.
///
/// Randomness is sampled fresh on every call; a preview sample from an earlier
/// animation tick is never reused. On success the winner is prepended to the
/// winner record (most recent first) and returned. An empty pool yields
/// `NoCandidates` and leaves the record untouched.
pub fn draw(session: &mut DrawSession) -> Result<Participant, SessionError> {
    let mut rng = rand::thread_rng();
    let winner = eligible_pool(session)
        .choose(&mut rng)
        .copied()
        .cloned()
        .ok_or(SessionError::NoCandidates)?;
    session.winners.insert(0, winner.clone());
    Ok(winner)
}

/// Uniform sample from the eligible pool for the countdown flicker.
/// Commits nothing; only a subsequent [`draw`] call decides the winner.
pub fn preview_candidate(session: &DrawSession) -> Option<&Participant> {
    let mut rng = rand::thread_rng();
    eligible_pool(session).choose(&mut rng).copied()
}

/// Empty the winner record. Roster and grouping are untouched.
pub fn reset_winners(session: &mut DrawSession) {
    session.winners.clear();
}

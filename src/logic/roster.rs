//! Roster intake and maintenance: text/CSV import, duplicate detection, dedupe.

use crate::models::{DrawSession, Participant, ParticipantId};
use std::collections::{HashMap, HashSet};

/// Add participants parsed from pasted text.
///
/// Splits on newlines and commas, trims each token, drops empties, and appends
/// the rest to the roster in encounter order with fresh ids. Returns the
/// participants that were added. Calling twice with the same text adds the
/// names twice; duplicates are a user-correctable state, not an error.
pub fn add_from_text(session: &mut DrawSession, raw: &str) -> Vec<Participant> {
    let added: Vec<Participant> = raw
        .split(['\n', ','])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(Participant::new)
        .collect();
    append(session, added)
}

/// Add participants from parsed CSV rows.
///
/// Flattens all cells across all rows into one ordered sequence, then runs the
/// same trim/drop/append pipeline as [`add_from_text`]. No header row is
/// assumed; every cell is a name candidate.
pub fn add_from_rows(session: &mut DrawSession, rows: &[Vec<String>]) -> Vec<Participant> {
    let added: Vec<Participant> = rows
        .iter()
        .flatten()
        .map(|c| c.trim())
        .filter(|t| !t.is_empty())
        .map(Participant::new)
        .collect();
    append(session, added)
}

fn append(session: &mut DrawSession, added: Vec<Participant>) -> Vec<Participant> {
    if !added.is_empty() {
        session.roster.extend(added.iter().cloned());
        // Membership changed; the old grouping no longer covers the roster.
        session.groups.clear();
    }
    added
}

/// Names borne by two or more participants.
///
/// Every participant whose name is in the returned set is flagged in the UI
/// (all copies, not just the 2nd and later), and the set's size drives the
/// duplicate count badge.
pub fn detect_duplicates(session: &DrawSession) -> HashSet<String> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for p in &session.roster {
        *counts.entry(p.name.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n >= 2)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Keep only the earliest-inserted participant for each name, preserving the
/// relative order of the kept ones. Idempotent.
pub fn dedupe_by_name(session: &mut DrawSession) {
    let before = session.roster.len();
    let mut seen: HashSet<String> = HashSet::new();
    session.roster.retain(|p| seen.insert(p.name.clone()));
    if session.roster.len() != before {
        let kept: HashSet<ParticipantId> = session.roster.iter().map(|p| p.id).collect();
        session.winners.retain(|p| kept.contains(&p.id));
        session.groups.clear();
    }
}

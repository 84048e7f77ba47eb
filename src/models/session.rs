//! DrawSession: roster, winner record, and current grouping for one client.

use crate::models::participant::{Participant, ParticipantId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during draw/grouping operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// Draw requested but the eligible pool is empty (roster empty, or all
    /// roster members already won and repeat winning is off).
    NoCandidates,
    /// Grouping requested with a group size of zero.
    InvalidGroupSize,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NoCandidates => write!(f, "No eligible participants to draw from"),
            SessionError::InvalidGroupSize => write!(f, "Group size must be at least 1"),
        }
    }
}

/// Unique identifier for a draw session.
pub type SessionId = Uuid;

/// Full per-client state: the roster plus its derived views.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrawSession {
    pub id: SessionId,
    /// Working list of participants, insertion order preserved.
    pub roster: Vec<Participant>,
    /// Past winners, most recent first. Append-only except for an explicit reset.
    pub winners: Vec<Participant>,
    /// Current grouping; recomputed wholesale on every grouping request.
    pub groups: Vec<Vec<Participant>>,
    /// Whether a past winner stays in the pool for later draws.
    pub allow_repeat: bool,
}

impl DrawSession {
    /// Create an empty session.
    pub fn new(allow_repeat: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            roster: Vec::new(),
            winners: Vec::new(),
            groups: Vec::new(),
            allow_repeat,
        }
    }

    /// Create a session with an initial roster (e.g. for tests).
    pub fn with_roster(roster: Vec<Participant>, allow_repeat: bool) -> Self {
        Self {
            roster,
            ..Self::new(allow_repeat)
        }
    }

    /// Look up a roster member by id.
    pub fn get_participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.roster.iter().find(|p| p.id == id)
    }

    /// Remove a participant by id. Silent no-op when the id is not present.
    /// The removed id is also pruned from the winner record, and the current
    /// grouping is dropped since its membership no longer reflects the roster.
    pub fn remove_participant(&mut self, id: ParticipantId) {
        let before = self.roster.len();
        self.roster.retain(|p| p.id != id);
        if self.roster.len() != before {
            self.winners.retain(|p| p.id != id);
            self.groups.clear();
        }
    }

    /// Empty roster, winner record, and grouping unconditionally.
    pub fn clear_all(&mut self) {
        self.roster.clear();
        self.winners.clear();
        self.groups.clear();
    }

    /// Toggle repeat winning for subsequent draws.
    pub fn set_allow_repeat(&mut self, allow_repeat: bool) {
        self.allow_repeat = allow_repeat;
    }
}

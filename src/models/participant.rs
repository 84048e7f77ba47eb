//! Participant data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used for removal, winner tracking, and rendering keys).
pub type ParticipantId = Uuid;

/// A participant in the draw session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Trimmed display name. May duplicate another participant's name.
    pub name: String,
}

impl Participant {
    /// Create a new participant with the given name (trimmed) and a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
        }
    }
}

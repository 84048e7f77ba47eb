//! Lucky draw web app: library with models and draw/grouping logic.

pub mod logic;
pub mod models;

pub use logic::{
    add_from_rows, add_from_text, dedupe_by_name, detect_duplicates, draw, export_filename,
    export_groups_csv, generate_groups, preview_candidate, reset_winners,
};
pub use models::{DrawSession, Participant, ParticipantId, SessionError, SessionId};

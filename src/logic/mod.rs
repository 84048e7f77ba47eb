//! Draw session business logic: roster intake, draws, grouping, export.

mod draw;
mod export;
mod grouping;
mod roster;

pub use draw::{draw, preview_candidate, reset_winners};
pub use export::{export_filename, export_groups_csv};
pub use grouping::generate_groups;
pub use roster::{add_from_rows, add_from_text, dedupe_by_name, detect_duplicates};

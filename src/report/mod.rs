//! Report assembly and persistence.

pub mod types;
pub mod writer;

pub use types::{CommentRecord, PostRecord, ProfileRecord, ScanReport, ScanStats};
pub use writer::write_json_report;

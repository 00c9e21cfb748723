//! File system utilities.

pub mod naming;
pub mod paths;

pub use naming::sanitize_path_component;
pub use paths::{basic_report_path, ensure_dir, highlight_dir, report_path, stories_dir};

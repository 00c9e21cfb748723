//! Scan orchestration: profile resolution and the sequential collectors.

pub mod highlights;
pub mod posts;
pub mod profile;
pub mod state;
pub mod stories;

pub use highlights::collect_highlights;
pub use posts::collect_posts;
pub use profile::{build_profile_record, download_profile_pic, resolve_profile};
pub use state::{InterruptFlag, ScanState};
pub use stories::collect_stories;

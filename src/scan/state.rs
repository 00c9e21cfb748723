//! Scan run state: counters and the interrupt flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::report::ScanStats;

/// Counters accumulated over one run's sequential loops.
#[derive(Debug, Default)]
pub struct ScanState {
    pub profile_pic_downloaded: bool,
    pub posts_scanned: u64,
    pub stories_downloaded: u64,
    pub highlights_downloaded: u64,
    pub post_failures: u64,
    pub comment_failures: u64,
    pub story_failures: u64,
}

impl ScanState {
    pub fn total_failures(&self) -> u64 {
        self.post_failures + self.comment_failures + self.story_failures
    }

    /// The counters included in the JSON report.
    pub fn stats(&self) -> ScanStats {
        ScanStats {
            total_posts_scanned: self.posts_scanned,
            stories_downloaded: self.stories_downloaded,
            highlights_downloaded: self.highlights_downloaded,
            post_failures: self.post_failures,
            comment_failures: self.comment_failures,
        }
    }
}

/// Cooperative cancellation flag set by Ctrl-C.
///
/// The collectors check it at loop boundaries and drain cleanly, so an
/// interrupted run still gets a summary and a partial report.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

//! End-of-run summary reporting.

use std::path::Path;

use console::style;

use crate::scan::ScanState;

/// Print the scan summary block.
pub fn print_scan_summary(
    username: &str,
    state: &ScanState,
    output_dir: &Path,
    report_path: &Path,
    interrupted: bool,
) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Scan summary:").bold());
    println!("  Profile:    @{}", username);
    println!(
        "  Picture:    {}",
        if state.profile_pic_downloaded {
            "downloaded"
        } else {
            "skipped"
        }
    );
    println!("  Posts:      {}", state.posts_scanned);
    println!("  Stories:    {} items", state.stories_downloaded);
    println!("  Highlights: {} items", state.highlights_downloaded);
    if state.total_failures() > 0 {
        println!(
            "  Failures:   {} (posts: {}, comments: {}, stories: {})",
            style(state.total_failures()).yellow(),
            state.post_failures,
            state.comment_failures,
            state.story_failures
        );
    }
    println!("  Files:      {}/", output_dir.display());
    println!("  Report:     {}", report_path.display());
    if interrupted {
        println!(
            "  {}",
            style("Scan was interrupted; the report contains partial data").yellow()
        );
    }
    println!("{}", style("═".repeat(50)).dim());
}

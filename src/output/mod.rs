//! Console presentation: messages, banner, progress, summaries.

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_error, print_info, print_profile_overview,
    print_success, print_warning,
};
pub use progress::{create_download_bar, create_spinner};
pub use stats::print_scan_summary;

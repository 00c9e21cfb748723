//! Output directory layout.
//!
//! A full scan produces:
//!
//! ```text
//! <output_dir>/
//!   <username>_profile_pic.jpg
//!   <shortcode>.jpg / <shortcode>.mp4 / <shortcode>_thumb.jpg
//!   stories/<item id>.<ext>
//!   highlights/<title>/<item id>.<ext>
//!   profile_data.json
//! ```

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::sanitize_path_component;

/// Report filename for a full scan.
const REPORT_FILENAME: &str = "profile_data.json";

/// Directory holding story items inside the output directory.
pub fn stories_dir(base: &Path) -> PathBuf {
    base.join("stories")
}

/// Directory holding one highlight's items, named after its title.
///
/// The title comes from the remote profile and is sanitized before use.
pub fn highlight_dir(base: &Path, title: &str) -> Result<PathBuf> {
    let component = sanitize_path_component(title)?;
    Ok(base.join("highlights").join(component))
}

/// Path of the full-scan JSON report.
pub fn report_path(base: &Path) -> PathBuf {
    base.join(REPORT_FILENAME)
}

/// Path of the basic-scan JSON report, relative to the working directory.
pub fn basic_report_path(username: &str) -> PathBuf {
    PathBuf::from(format!("{}_basic_info.json", username))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let base = Path::new("instagram_scan_demo");
        assert_eq!(stories_dir(base), base.join("stories"));
        assert_eq!(report_path(base), base.join("profile_data.json"));
        assert_eq!(
            basic_report_path("demo"),
            PathBuf::from("demo_basic_info.json")
        );
    }

    #[test]
    fn test_highlight_dir_sanitizes_title() {
        let base = Path::new("out");
        let dir = highlight_dir(base, "Trips/2024").unwrap();
        assert_eq!(dir, base.join("highlights").join("Trips_2024"));
    }

    #[test]
    fn test_highlight_dir_rejects_traversal() {
        assert!(highlight_dir(Path::new("out"), "../../escape").is_err());
    }
}

//! Report persistence.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Write a serializable report as pretty-printed UTF-8 JSON.
///
/// The parent directory is created if missing. The file is written in one
/// shot; there is no incremental checkpointing.
pub fn write_json_report<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;

    tracing::debug!("Report written to {}", path.display());
    Ok(())
}

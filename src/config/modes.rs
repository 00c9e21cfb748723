//! Scan mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available scan modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Full scan: profile, stories, highlights, posts, comments, media (default).
    #[default]
    Full,
    /// Basic scan: profile metadata only, no downloads.
    Basic,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::Full => write!(f, "full"),
            ScanMode::Basic => write!(f, "basic"),
        }
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(ScanMode::Full),
            "basic" => Ok(ScanMode::Basic),
            _ => Err(format!("Unknown scan mode: {}", s)),
        }
    }
}

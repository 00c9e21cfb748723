//! Configuration structures and loading logic.

use crate::config::modes::ScanMode;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Target profile configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Username of the profile to scan.
    #[serde(default)]
    pub username: String,
}

/// Login account configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Username of the account to log in with. When unset and login is not
    /// disabled, the operator is asked interactively.
    #[serde(default)]
    pub username: Option<String>,

    /// Skip the login step entirely (stories and highlights are then
    /// unavailable).
    #[serde(default)]
    pub skip_login: bool,
}

/// Scan options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Scan mode (full or basic).
    #[serde(default)]
    pub scan_mode: ScanMode,

    /// Output directory for media and the report. Defaults to
    /// `instagram_scan_<username>` under the current directory.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Whether to download post videos.
    #[serde(default = "default_true")]
    pub download_videos: bool,

    /// Whether to download video thumbnails.
    #[serde(default = "default_true")]
    pub download_video_thumbnails: bool,

    /// Whether to print a line per downloaded item.
    #[serde(default = "default_true")]
    pub show_downloads: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            scan_mode: ScanMode::default(),
            output_directory: None,
            download_videos: true,
            download_video_thumbnails: true,
            show_downloads: true,
        }
    }
}

/// Iteration caps and network limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of posts to scan.
    #[serde(default = "default_max_posts")]
    pub max_posts: u64,

    /// Maximum number of comments captured per post.
    #[serde(default = "default_max_comments")]
    pub max_comments_per_post: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Connection attempts before a request is reported as failed.
    #[serde(default = "default_connection_attempts")]
    pub max_connection_attempts: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_posts: default_max_posts(),
            max_comments_per_post: default_max_comments(),
            request_timeout_seconds: default_request_timeout(),
            max_connection_attempts: default_connection_attempts(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_posts() -> u64 {
    150
}

fn default_max_comments() -> u64 {
    3
}

fn default_request_timeout() -> u64 {
    300
}

fn default_connection_attempts() -> u32 {
    3
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the effective output directory for the scanned profile.
    pub fn output_directory(&self, username: &str) -> PathBuf {
        self.options
            .output_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("instagram_scan_{}", username)))
    }
}

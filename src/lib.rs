//! Instagram profile scanner.
//!
//! This library collects an Instagram profile's metadata, recent posts with
//! their top comments, active stories and highlight reels, downloads the
//! media files, and produces a single JSON report of everything gathered.
//!
//! # Features
//!
//! - Profile metadata with bio hashtags and mentions
//! - Post iteration capped at a configurable count
//! - Top comments per post
//! - Story and highlight downloads (login required)
//! - Optional login with session persistence and two-factor support
//! - Single pretty-printed JSON report per run
//!
//! # Example
//!
//! ```no_run
//! use instagram_scanner::{api::ProfileSource, Config, InstagramApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.target.username = "natgeo".to_string();
//!
//!     let api = InstagramApi::new(&config)?;
//!     let profile = api.resolve_profile(&config.target.username).await?;
//!     println!("{} has {} posts", profile.username, profile.media_count);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod model;
pub mod output;
pub mod report;
pub mod scan;

// Re-export commonly used types
pub use api::InstagramApi;
pub use config::{Config, ScanMode};
pub use error::{Error, Result};
pub use model::{Comment, Post, Profile};
pub use report::ScanReport;
pub use scan::{InterruptFlag, ScanState};

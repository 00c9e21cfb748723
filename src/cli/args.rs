//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, ScanMode};

/// Instagram profile scanner CLI.
#[derive(Parser, Debug)]
#[command(
    name = "instagram-scanner",
    version,
    about = "Scan an Instagram profile into a JSON report",
    long_about = "Collects a profile's metadata, recent posts with top comments, stories and \
                  highlights, downloads the media, and writes a single JSON report.\n\n\
                  Login is optional; stories and highlights require it."
)]
pub struct Args {
    /// Profile username to scan.
    pub profile: Option<String>,

    /// Instagram account to log in with.
    #[arg(short = 'l', long = "login", env = "INSTAGRAM_USERNAME")]
    pub login: Option<String>,

    /// Scan anonymously, never prompting for credentials.
    #[arg(long)]
    pub no_login: bool,

    /// Scan mode.
    #[arg(long, value_enum)]
    pub mode: Option<ScanModeArg>,

    /// Base directory for downloads and the report.
    #[arg(short = 'd', long = "directory")]
    pub output_directory: Option<PathBuf>,

    /// Maximum number of posts to scan.
    #[arg(long)]
    pub max_posts: Option<u64>,

    /// Maximum number of comments to keep per post.
    #[arg(long)]
    pub max_comments: Option<u64>,

    /// Skip downloading video files.
    #[arg(long)]
    pub no_videos: bool,

    /// Skip downloading video thumbnails.
    #[arg(long)]
    pub no_thumbnails: bool,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Hide per-post progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI scan mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScanModeArg {
    /// Full scan: posts, comments, stories, highlights, media, report.
    Full,
    /// Basic scan: profile metadata only, written next to the cwd.
    Basic,
}

impl From<ScanModeArg> for ScanMode {
    fn from(arg: ScanModeArg) -> Self {
        match arg {
            ScanModeArg::Full => ScanMode::Full,
            ScanModeArg::Basic => ScanMode::Basic,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(profile) = self.profile {
            config.target.username = profile;
        }

        if let Some(login) = self.login {
            config.account.username = Some(login);
        }

        if self.no_login {
            config.account.skip_login = true;
        }

        if let Some(mode) = self.mode {
            config.options.scan_mode = mode.into();
        }

        if let Some(dir) = self.output_directory {
            config.options.output_directory = Some(dir);
        }

        if let Some(max_posts) = self.max_posts {
            config.limits.max_posts = max_posts;
        }

        if let Some(max_comments) = self.max_comments {
            config.limits.max_comments_per_post = max_comments;
        }

        // Boolean flags (only override if set to non-default)
        if self.no_videos {
            config.options.download_videos = false;
        }

        if self.no_thumbnails {
            config.options.download_video_thumbnails = false;
        }

        if self.quiet {
            config.options.show_downloads = false;
        }
    }
}

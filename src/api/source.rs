//! The narrow interface the scan orchestration is written against.
//!
//! Everything the external collaborator does for us goes through
//! [`ProfileSource`], so the collectors can be exercised against a fake
//! without any live network dependency.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::api::session::Session;
use crate::error::Result;
use crate::model::{CommentPage, Highlight, PostPage, Profile, StoryItem, StoryReel};

/// Operations the scanner needs from the Instagram collaborator.
#[async_trait]
pub trait ProfileSource {
    /// Resolve a username to its profile metadata.
    async fn resolve_profile(&self, username: &str) -> Result<Profile>;

    /// Fetch one page of a profile's posts, newest first.
    async fn posts_page(&self, user_id: u64, cursor: Option<&str>) -> Result<PostPage>;

    /// Fetch one page of a post's comments, in the collaborator's order.
    async fn comments_page(&self, shortcode: &str, cursor: Option<&str>) -> Result<CommentPage>;

    /// Fetch the profile's active story reel, if it has one.
    async fn story_reel(&self, user_id: u64) -> Result<Option<StoryReel>>;

    /// List the profile's highlight reels.
    async fn highlights(&self, user_id: u64) -> Result<Vec<Highlight>>;

    /// Fetch the items of one highlight reel.
    async fn highlight_items(&self, highlight_id: u64) -> Result<Vec<StoryItem>>;

    /// Download a media URL into `dest_dir` as `<stem>.<ext>`, returning the
    /// written path.
    async fn download_media(&self, url: &str, dest_dir: &Path, stem: &str) -> Result<PathBuf>;

    /// Whether this source currently holds an authenticated session.
    fn is_logged_in(&self) -> bool;

    /// Log in interactively-supplied credentials. May fail with
    /// `Error::TwoFactorRequired`, after which `two_factor_login` completes
    /// the flow.
    async fn login(&mut self, username: &str, password: &str) -> Result<()>;

    /// Complete a pending two-factor challenge.
    async fn two_factor_login(&mut self, code: &str) -> Result<()>;

    /// Adopt a previously persisted session.
    fn restore_session(&mut self, session: Session) -> Result<()>;

    /// The current session, if logged in, for persistence.
    fn session(&self) -> Option<Session>;
}

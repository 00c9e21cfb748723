//! Domain types returned by the profile source.
//!
//! These are the collaborator-neutral shapes the scan orchestration works
//! with; the wire formats in `api::types` are mapped into these.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Profile metadata snapshot taken at resolution time.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_id: u64,
    pub username: String,
    pub full_name: String,
    pub biography: String,
    pub external_url: Option<String>,
    pub followers: u64,
    pub followees: u64,
    pub media_count: u64,
    pub is_verified: bool,
    pub is_private: bool,
    pub is_business: bool,
    pub followed_by_viewer: bool,
    pub profile_pic_url: String,
}

impl Profile {
    /// Mentions (`@name`) appearing in the biography.
    pub fn bio_mentions(&self) -> Vec<String> {
        extract_mentions(&self.biography)
    }

    /// Hashtags (`#tag`) appearing in the biography.
    pub fn bio_hashtags(&self) -> Vec<String> {
        extract_hashtags(&self.biography)
    }
}

/// A single post from the profile's media grid.
#[derive(Debug, Clone)]
pub struct Post {
    pub shortcode: String,
    pub taken_at: DateTime<Utc>,
    pub likes: u64,
    pub comments_count: u64,
    pub caption: Option<String>,
    pub is_video: bool,
    pub display_url: String,
    pub video_url: Option<String>,
    pub location: Option<String>,
}

impl Post {
    /// Canonical URL of the post.
    pub fn url(&self) -> String {
        format!("https://www.instagram.com/p/{}/", self.shortcode)
    }

    pub fn caption_hashtags(&self) -> Vec<String> {
        self.caption.as_deref().map(extract_hashtags).unwrap_or_default()
    }

    pub fn caption_mentions(&self) -> Vec<String> {
        self.caption.as_deref().map(extract_mentions).unwrap_or_default()
    }
}

/// A comment on a post.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: u64,
    pub owner: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
}

/// One page of posts from a paginated iteration.
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub end_cursor: Option<String>,
}

/// One page of comments from a paginated iteration.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub end_cursor: Option<String>,
}

/// A single story or highlight item.
#[derive(Debug, Clone)]
pub struct StoryItem {
    pub id: u64,
    pub taken_at: DateTime<Utc>,
    pub is_video: bool,
    pub media_url: String,
}

/// The active story reel of a profile (expires ~24h after posting).
#[derive(Debug, Clone)]
pub struct StoryReel {
    pub owner_id: u64,
    pub items: Vec<StoryItem>,
}

/// A highlight reel: a titled, persistent collection of past story items.
#[derive(Debug, Clone)]
pub struct Highlight {
    pub id: u64,
    pub title: String,
}

fn hashtag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#([\w\p{L}]+)").unwrap())
}

fn mention_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@([A-Za-z0-9_](?:[A-Za-z0-9_.]*[A-Za-z0-9_])?)").unwrap())
}

/// Extract hashtags from free text, without the leading `#`.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    hashtag_re()
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Extract mentioned usernames from free text, without the leading `@`.
pub fn extract_mentions(text: &str) -> Vec<String> {
    mention_re()
        .captures_iter(text)
        .map(|c| c[1].to_lowercase())
        .collect()
}

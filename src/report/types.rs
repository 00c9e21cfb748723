//! Report record definitions.
//!
//! These are the write-once aggregates serialized into the JSON report.
//! All records are assembled in memory as the scan proceeds and written
//! exactly once at the end of the run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Comment, Post, Profile};

/// Flat snapshot of profile-level attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
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
    pub user_id: u64,
    pub profile_pic_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio_mentions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio_hashtags: Option<Vec<String>>,
}

impl From<&Profile> for ProfileRecord {
    fn from(profile: &Profile) -> Self {
        let mentions = profile.bio_mentions();
        let hashtags = profile.bio_hashtags();

        Self {
            username: profile.username.clone(),
            full_name: profile.full_name.clone(),
            biography: profile.biography.clone(),
            external_url: profile.external_url.clone(),
            followers: profile.followers,
            followees: profile.followees,
            media_count: profile.media_count,
            is_verified: profile.is_verified,
            is_private: profile.is_private,
            is_business: profile.is_business,
            user_id: profile.user_id,
            profile_pic_url: profile.profile_pic_url.clone(),
            bio_mentions: (!mentions.is_empty()).then_some(mentions),
            bio_hashtags: (!hashtags.is_empty()).then_some(hashtags),
        }
    }
}

/// One scanned post with its bounded comment list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub shortcode: String,
    pub date: DateTime<Utc>,
    pub likes: u64,
    pub comments_count: u64,
    pub caption: Option<String>,
    pub caption_hashtags: Vec<String>,
    pub caption_mentions: Vec<String>,
    pub is_video: bool,
    pub video_url: Option<String>,
    pub url: String,
    pub location: Option<String>,
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
}

impl From<&Post> for PostRecord {
    fn from(post: &Post) -> Self {
        Self {
            shortcode: post.shortcode.clone(),
            date: post.taken_at,
            likes: post.likes,
            comments_count: post.comments_count,
            caption: post.caption.clone(),
            caption_hashtags: post.caption_hashtags(),
            caption_mentions: post.caption_mentions(),
            is_video: post.is_video,
            video_url: if post.is_video {
                post.video_url.clone()
            } else {
                None
            },
            url: post.url(),
            location: post.location.clone(),
            comments: Vec::new(),
        }
    }
}

/// One captured comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: u64,
    pub owner: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
}

impl From<&Comment> for CommentRecord {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            owner: comment.owner.clone(),
            text: comment.text.clone(),
            created_at: comment.created_at,
            likes: comment.likes,
        }
    }
}

/// Run counters included in the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total_posts_scanned: u64,
    pub stories_downloaded: u64,
    pub highlights_downloaded: u64,
    #[serde(default)]
    pub post_failures: u64,
    #[serde(default)]
    pub comment_failures: u64,
}

/// The sole persisted artifact of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub profile: ProfileRecord,
    pub posts: Vec<PostRecord>,
    pub stats: ScanStats,
    pub scan_date: DateTime<Utc>,
}

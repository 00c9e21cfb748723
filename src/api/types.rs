//! Wire type definitions for the Instagram web API.
//!
//! Shapes here mirror the JSON returned by `web_profile_info`, the GraphQL
//! pagination queries, `reels_media` and the login endpoints. They are
//! mapped into the neutral domain types in `crate::model` before anything
//! else sees them.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Comment, Highlight, Post, Profile, StoryItem};

/// Response of `/api/v1/users/web_profile_info/`.
#[derive(Debug, Deserialize)]
pub struct WebProfileResponse {
    pub data: WebProfileData,
}

#[derive(Debug, Deserialize)]
pub struct WebProfileData {
    pub user: Option<WireUser>,
}

/// Edge wrapper carrying only a count.
#[derive(Debug, Default, Deserialize)]
pub struct WireCount {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct WireUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub biography: String,
    pub external_url: Option<String>,
    #[serde(default)]
    pub edge_followed_by: WireCount,
    #[serde(default)]
    pub edge_follow: WireCount,
    #[serde(default)]
    pub edge_owner_to_timeline_media: WireCount,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_business_account: bool,
    #[serde(default)]
    pub followed_by_viewer: bool,
    pub profile_pic_url_hd: Option<String>,
    pub profile_pic_url: Option<String>,
}

impl WireUser {
    pub fn into_profile(self) -> Result<Profile> {
        let user_id = self
            .id
            .parse::<u64>()
            .map_err(|_| Error::Api(format!("Non-numeric user id: '{}'", self.id)))?;

        let profile_pic_url = self
            .profile_pic_url_hd
            .or(self.profile_pic_url)
            .unwrap_or_default();

        Ok(Profile {
            user_id,
            username: self.username,
            full_name: self.full_name,
            biography: self.biography,
            external_url: self.external_url,
            followers: self.edge_followed_by.count,
            followees: self.edge_follow.count,
            media_count: self.edge_owner_to_timeline_media.count,
            is_verified: self.is_verified,
            is_private: self.is_private,
            is_business: self.is_business_account,
            followed_by_viewer: self.followed_by_viewer,
            profile_pic_url,
        })
    }
}

/// Generic GraphQL response wrapper.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: T,
}

/// Paginated edge connection.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default)]
    pub count: u64,
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// `data` payload of the timeline-media GraphQL query.
#[derive(Debug, Deserialize)]
pub struct PostsData {
    pub user: Option<PostsUser>,
}

#[derive(Debug, Deserialize)]
pub struct PostsUser {
    pub edge_owner_to_timeline_media: Connection<WirePost>,
}

#[derive(Debug, Deserialize)]
pub struct WirePost {
    pub shortcode: String,
    pub taken_at_timestamp: i64,
    #[serde(default)]
    pub edge_media_preview_like: WireCount,
    #[serde(default)]
    pub edge_media_to_comment: WireCount,
    #[serde(default)]
    pub edge_media_to_caption: CaptionEdges,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub display_url: String,
    pub video_url: Option<String>,
    pub location: Option<WireLocation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CaptionEdges {
    #[serde(default)]
    pub edges: Vec<Edge<WireCaption>>,
}

#[derive(Debug, Deserialize)]
pub struct WireCaption {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct WireLocation {
    pub name: String,
}

impl WirePost {
    pub fn into_post(self) -> Post {
        let caption = self
            .edge_media_to_caption
            .edges
            .into_iter()
            .next()
            .map(|e| e.node.text);

        Post {
            shortcode: self.shortcode,
            taken_at: timestamp_to_datetime(self.taken_at_timestamp),
            likes: self.edge_media_preview_like.count,
            comments_count: self.edge_media_to_comment.count,
            caption,
            is_video: self.is_video,
            display_url: self.display_url,
            video_url: self.video_url,
            location: self.location.map(|l| l.name),
        }
    }
}

/// `data` payload of the parent-comments GraphQL query.
#[derive(Debug, Deserialize)]
pub struct CommentsData {
    pub shortcode_media: Option<ShortcodeMedia>,
}

#[derive(Debug, Deserialize)]
pub struct ShortcodeMedia {
    pub edge_media_to_parent_comment: Connection<WireComment>,
}

#[derive(Debug, Deserialize)]
pub struct WireComment {
    pub id: String,
    pub text: String,
    pub created_at: i64,
    pub owner: WireCommentOwner,
    #[serde(default)]
    pub edge_liked_by: WireCount,
}

#[derive(Debug, Deserialize)]
pub struct WireCommentOwner {
    pub username: String,
}

impl WireComment {
    pub fn into_comment(self) -> Result<Comment> {
        let id = self
            .id
            .parse::<u64>()
            .map_err(|_| Error::Api(format!("Non-numeric comment id: '{}'", self.id)))?;

        Ok(Comment {
            id,
            owner: self.owner.username,
            text: self.text,
            created_at: timestamp_to_datetime(self.created_at),
            likes: self.edge_liked_by.count,
        })
    }
}

/// Response of `/api/v1/feed/reels_media/`.
#[derive(Debug, Deserialize)]
pub struct ReelsMediaResponse {
    #[serde(default)]
    pub reels_media: Vec<WireReel>,
}

#[derive(Debug, Deserialize)]
pub struct WireReel {
    #[serde(default)]
    pub items: Vec<WireReelItem>,
}

#[derive(Debug, Deserialize)]
pub struct WireReelItem {
    pub pk: u64,
    pub taken_at: i64,
    /// 1 = image, 2 = video.
    pub media_type: u8,
    pub image_versions2: Option<WireImageVersions>,
    pub video_versions: Option<Vec<WireVideoVersion>>,
}

#[derive(Debug, Deserialize)]
pub struct WireImageVersions {
    #[serde(default)]
    pub candidates: Vec<WireMediaCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct WireMediaCandidate {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct WireVideoVersion {
    pub url: String,
}

impl WireReelItem {
    /// Map to a story item, picking the video URL for videos and the first
    /// (highest resolution) image candidate otherwise.
    pub fn into_story_item(self) -> Option<StoryItem> {
        let is_video = self.media_type == 2;
        let media_url = if is_video {
            self.video_versions?.into_iter().next()?.url
        } else {
            self.image_versions2?.candidates.into_iter().next()?.url
        };

        Some(StoryItem {
            id: self.pk,
            taken_at: timestamp_to_datetime(self.taken_at),
            is_video,
            media_url,
        })
    }
}

/// Response of `/api/v1/highlights/{user_id}/highlights_tray/`.
#[derive(Debug, Deserialize)]
pub struct HighlightsTrayResponse {
    #[serde(default)]
    pub tray: Vec<WireHighlight>,
}

#[derive(Debug, Deserialize)]
pub struct WireHighlight {
    /// Formatted as `highlight:<numeric id>`.
    pub id: String,
    #[serde(default)]
    pub title: String,
}

impl WireHighlight {
    pub fn into_highlight(self) -> Result<Highlight> {
        let digits = self.id.rsplit(':').next().unwrap_or(&self.id);
        let id = digits
            .parse::<u64>()
            .map_err(|_| Error::Api(format!("Unexpected highlight id: '{}'", self.id)))?;

        Ok(Highlight {
            id,
            title: self.title,
        })
    }
}

/// Response of the login ajax endpoints.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: bool,
    pub user_id: Option<String>,
    #[serde(default)]
    pub two_factor_required: bool,
    pub two_factor_info: Option<TwoFactorInfo>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct TwoFactorInfo {
    pub two_factor_identifier: String,
}

fn timestamp_to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

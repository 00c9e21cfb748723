//! Instagram web API HTTP client.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use rand::Rng;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;

use crate::api::session::Session;
use crate::api::source::ProfileSource;
use crate::api::types::*;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::naming::{extension_from_mime, extension_from_url};
use crate::output::create_download_bar;

/// Instagram web base URL.
const WEB_BASE: &str = "https://www.instagram.com";

/// App id the web client sends on every API request.
const APP_ID: &str = "936619743392459";

/// GraphQL query hash for a user's timeline media.
const QUERY_HASH_POSTS: &str = "e769aa130647d2354c40ea6a439bfc08";

/// GraphQL query hash for a post's parent comments.
const QUERY_HASH_COMMENTS: &str = "bc3296d1ce80a24b1b6e40b1e72903f5";

/// Posts requested per GraphQL page.
const POST_PAGE_SIZE: u32 = 50;

/// Comments requested per GraphQL page.
const COMMENT_PAGE_SIZE: u32 = 12;

/// Mobile user agent; the web API is more permissive towards it.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";

/// Minimum file size to show a download progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

#[derive(Debug)]
struct PendingTwoFactor {
    username: String,
    identifier: String,
}

/// Instagram API client with session management.
pub struct InstagramApi {
    client: Client,
    max_attempts: u32,
    show_progress: bool,
    csrftoken: Option<String>,
    session: Option<Session>,
    pending_two_factor: Option<PendingTwoFactor>,
}

impl InstagramApi {
    /// Create a new API client from the configured network limits.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(config.limits.request_timeout_seconds))
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_attempts: config.limits.max_connection_attempts,
            show_progress: config.options.show_downloads,
            csrftoken: None,
            session: None,
            pending_two_factor: None,
        })
    }

    fn cookie_header(&self) -> Option<String> {
        self.session.as_ref().map(|s| {
            let mut cookie = format!("sessionid={}; csrftoken={}", s.sessionid, s.csrftoken);
            if let Some(user_id) = s.user_id {
                cookie.push_str(&format!("; ds_user_id={}", user_id));
            }
            cookie
        })
    }

    /// Make a GET request and parse the JSON body, retrying connection
    /// failures up to the configured attempt limit.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", WEB_BASE, path);
        let mut last_err: Option<Error> = None;

        for attempt in 1..=self.max_attempts {
            // Polite jitter before every request
            let delay_ms = rand::thread_rng().gen_range(500..1500);
            sleep(Duration::from_millis(delay_ms)).await;

            tracing::debug!("GET {} (attempt {}/{})", url, attempt, self.max_attempts);

            let mut request = self
                .client
                .get(&url)
                .header("x-ig-app-id", APP_ID)
                .header(header::ACCEPT, "application/json");
            if let Some(cookie) = self.cookie_header() {
                request = request.header(header::COOKIE, cookie);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("Request failed: {}", e);
                    last_err = Some(Error::Connection(e.to_string()));
                    continue;
                }
            };

            let status = response.status();
            tracing::debug!("Response status: {}", status);

            if status == 429 {
                tracing::warn!("Rate limited, backing off before retry");
                last_err = Some(Error::RateLimited(60));
                sleep(Duration::from_secs(60)).await;
                continue;
            }

            if status == 401 || status == 403 {
                return Err(Error::LoginRequired(format!(
                    "HTTP {}: this endpoint needs an authenticated session",
                    status
                )));
            }

            if status == 404 {
                return Err(Error::Api("HTTP 404".to_string()));
            }

            if status.is_server_error() {
                last_err = Some(Error::Connection(format!("HTTP {}", status)));
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Api(format!("HTTP {}: {}", status, body)));
            }

            let text = response.text().await?;
            return serde_json::from_str(&text).map_err(|e| {
                Error::Api(format!(
                    "Failed to parse response: {} - Response: {}",
                    e,
                    truncate_body(&text)
                ))
            });
        }

        Err(last_err.unwrap_or_else(|| Error::Connection("No attempts were made".to_string())))
    }

    fn adopt_login_cookies(
        &mut self,
        username: &str,
        cookies: &std::collections::HashMap<String, String>,
        user_id: Option<u64>,
        fallback_csrf: &str,
    ) -> Result<()> {
        let sessionid = cookies.get("sessionid").cloned().ok_or_else(|| {
            Error::Api("Login response carried no session cookie".to_string())
        })?;
        let csrftoken = cookies
            .get("csrftoken")
            .cloned()
            .unwrap_or_else(|| fallback_csrf.to_string());

        self.session = Some(Session {
            username: username.to_string(),
            user_id,
            sessionid,
            csrftoken,
            saved_at: Utc::now(),
        });
        Ok(())
    }
}

/// Stream a body into `path`.
///
/// A stream or write failure partway through deletes the fragment before
/// returning, so the existing-file skip on a later run never mistakes it
/// for a complete download.
async fn write_stream_to_file<S, B, E>(
    path: &Path,
    stream: S,
    progress: Option<&indicatif::ProgressBar>,
) -> Result<()>
where
    S: futures::Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut file = File::create(path).await?;
    let mut downloaded: u64 = 0;
    futures::pin_mut!(stream);

    while let Some(chunk) = stream.next().await {
        let written = match chunk {
            Ok(chunk) => {
                downloaded += chunk.as_ref().len() as u64;
                file.write_all(chunk.as_ref()).await.map_err(Error::Io)
            }
            Err(e) => Err(Error::Download(format!("Stream error: {}", e))),
        };

        if let Err(e) = written {
            drop(file);
            let _ = tokio::fs::remove_file(path).await;
            return Err(e);
        }

        if let Some(pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;
    Ok(())
}

/// First 300 characters of a response body, for error messages.
///
/// Bodies that fail JSON parsing are often HTML or localized error text, so
/// the cut must land on a char boundary.
fn truncate_body(text: &str) -> &str {
    const MAX_CHARS: usize = 300;
    match text.char_indices().nth(MAX_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Collect cookie name/value pairs from Set-Cookie headers.
fn collect_set_cookies(headers: &header::HeaderMap) -> std::collections::HashMap<String, String> {
    let mut cookies = std::collections::HashMap::new();
    for value in headers.get_all(header::SET_COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        let pair = raw.split(';').next().unwrap_or_default();
        if let Some((name, value)) = pair.split_once('=') {
            if !value.is_empty() && value != "\"\"" {
                cookies.insert(name.trim().to_string(), value.trim().to_string());
            }
        }
    }
    cookies
}

#[async_trait]
impl ProfileSource for InstagramApi {
    async fn resolve_profile(&self, username: &str) -> Result<crate::model::Profile> {
        let path = format!("/api/v1/users/web_profile_info/?username={}", username);

        let response: WebProfileResponse = match self.get_json(&path).await {
            Ok(response) => response,
            Err(Error::Api(message)) if message.contains("HTTP 404") => {
                return Err(Error::ProfileNotFound(username.to_string()));
            }
            Err(e) => return Err(e),
        };

        let user = response
            .data
            .user
            .ok_or_else(|| Error::ProfileNotFound(username.to_string()))?;
        user.into_profile()
    }

    async fn posts_page(
        &self,
        user_id: u64,
        cursor: Option<&str>,
    ) -> Result<crate::model::PostPage> {
        let variables = serde_json::json!({
            "id": user_id.to_string(),
            "first": POST_PAGE_SIZE,
            "after": cursor,
        });
        let encoded: String =
            url::form_urlencoded::byte_serialize(variables.to_string().as_bytes()).collect();
        let path = format!(
            "/graphql/query/?query_hash={}&variables={}",
            QUERY_HASH_POSTS, encoded
        );

        let response: GraphqlResponse<PostsData> = self.get_json(&path).await?;
        let connection = response
            .data
            .user
            .ok_or_else(|| Error::Api("Timeline query returned no user".to_string()))?
            .edge_owner_to_timeline_media;

        let end_cursor = connection
            .page_info
            .has_next_page
            .then_some(connection.page_info.end_cursor)
            .flatten();
        let posts = connection
            .edges
            .into_iter()
            .map(|edge| edge.node.into_post())
            .collect();

        Ok(crate::model::PostPage { posts, end_cursor })
    }

    async fn comments_page(
        &self,
        shortcode: &str,
        cursor: Option<&str>,
    ) -> Result<crate::model::CommentPage> {
        let variables = serde_json::json!({
            "shortcode": shortcode,
            "first": COMMENT_PAGE_SIZE,
            "after": cursor,
        });
        let encoded: String =
            url::form_urlencoded::byte_serialize(variables.to_string().as_bytes()).collect();
        let path = format!(
            "/graphql/query/?query_hash={}&variables={}",
            QUERY_HASH_COMMENTS, encoded
        );

        let response: GraphqlResponse<CommentsData> = self.get_json(&path).await?;

        // A vanished post yields an empty page, not an error
        let Some(media) = response.data.shortcode_media else {
            return Ok(crate::model::CommentPage::default());
        };
        let connection = media.edge_media_to_parent_comment;

        let end_cursor = connection
            .page_info
            .has_next_page
            .then_some(connection.page_info.end_cursor)
            .flatten();
        let comments = connection
            .edges
            .into_iter()
            .map(|edge| edge.node.into_comment())
            .collect::<Result<Vec<_>>>()?;

        Ok(crate::model::CommentPage {
            comments,
            end_cursor,
        })
    }

    async fn story_reel(&self, user_id: u64) -> Result<Option<crate::model::StoryReel>> {
        if !self.is_logged_in() {
            return Err(Error::LoginRequired(
                "Stories are only visible to an authenticated session".to_string(),
            ));
        }

        let path = format!("/api/v1/feed/reels_media/?reel_ids={}", user_id);
        let response: ReelsMediaResponse = self.get_json(&path).await?;

        let Some(reel) = response.reels_media.into_iter().next() else {
            return Ok(None);
        };
        let items: Vec<_> = reel
            .items
            .into_iter()
            .filter_map(|item| item.into_story_item())
            .collect();

        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(crate::model::StoryReel {
            owner_id: user_id,
            items,
        }))
    }

    async fn highlights(&self, user_id: u64) -> Result<Vec<crate::model::Highlight>> {
        if !self.is_logged_in() {
            return Err(Error::LoginRequired(
                "Highlights are only visible to an authenticated session".to_string(),
            ));
        }

        let path = format!("/api/v1/highlights/{}/highlights_tray/", user_id);
        let response: HighlightsTrayResponse = self.get_json(&path).await?;

        response
            .tray
            .into_iter()
            .map(|wire| wire.into_highlight())
            .collect()
    }

    async fn highlight_items(&self, highlight_id: u64) -> Result<Vec<crate::model::StoryItem>> {
        let path = format!(
            "/api/v1/feed/reels_media/?reel_ids=highlight%3A{}",
            highlight_id
        );
        let response: ReelsMediaResponse = self.get_json(&path).await?;

        Ok(response
            .reels_media
            .into_iter()
            .next()
            .map(|reel| {
                reel.items
                    .into_iter()
                    .filter_map(|item| item.into_story_item())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn download_media(&self, url: &str, dest_dir: &Path, stem: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dest_dir).await?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Download(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        let ext = extension_from_url(url)
            .or_else(|| {
                response
                    .headers()
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(extension_from_mime)
            })
            .unwrap_or_else(|| "bin".to_string());
        let output_path = dest_dir.join(format!("{}.{}", stem, ext));

        if output_path.exists() {
            tracing::debug!("Skipping existing file: {}", output_path.display());
            return Ok(output_path);
        }

        let content_length = response.content_length();
        let progress = (self.show_progress
            && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false))
        .then(|| create_download_bar(content_length.unwrap_or(0)));

        write_stream_to_file(&output_path, response.bytes_stream(), progress.as_ref()).await?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(output_path)
    }

    fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        // Fetch a csrf token from the login page
        let response = self
            .client
            .get(format!("{}/accounts/login/", WEB_BASE))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        let cookies = collect_set_cookies(response.headers());
        let csrftoken = cookies
            .get("csrftoken")
            .cloned()
            .ok_or_else(|| Error::Api("Login page returned no csrf token".to_string()))?;

        let enc_password = format!(
            "#PWD_INSTAGRAM_BROWSER:0:{}:{}",
            Utc::now().timestamp(),
            password
        );

        let response = self
            .client
            .post(format!("{}/api/v1/web/accounts/login/ajax/", WEB_BASE))
            .header("x-ig-app-id", APP_ID)
            .header("x-csrftoken", &csrftoken)
            .header(header::REFERER, format!("{}/accounts/login/", WEB_BASE))
            .header(header::COOKIE, format!("csrftoken={}", csrftoken))
            .form(&[
                ("username", username),
                ("enc_password", &enc_password),
                ("queryParams", "{}"),
                ("optIntoOneTap", "false"),
            ])
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let response_cookies = collect_set_cookies(response.headers());
        let text = response.text().await?;
        tracing::debug!("Login response: {}", text);

        let login: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| Error::Api(format!("Failed to parse login response: {}", e)))?;

        if login.two_factor_required {
            let identifier = login
                .two_factor_info
                .map(|info| info.two_factor_identifier)
                .ok_or_else(|| {
                    Error::Api("Two-factor required but no identifier returned".to_string())
                })?;
            self.pending_two_factor = Some(PendingTwoFactor {
                username: username.to_string(),
                identifier,
            });
            self.csrftoken = Some(csrftoken);
            return Err(Error::TwoFactorRequired);
        }

        if !login.authenticated {
            return Err(Error::BadCredentials);
        }

        let user_id = login.user_id.as_deref().and_then(|id| id.parse().ok());
        self.adopt_login_cookies(username, &response_cookies, user_id, &csrftoken)
    }

    async fn two_factor_login(&mut self, code: &str) -> Result<()> {
        let pending = self
            .pending_two_factor
            .take()
            .ok_or_else(|| Error::Api("No pending two-factor challenge".to_string()))?;
        let csrftoken = self
            .csrftoken
            .clone()
            .ok_or_else(|| Error::Api("No csrf token for two-factor login".to_string()))?;

        let response = self
            .client
            .post(format!(
                "{}/api/v1/web/accounts/login/ajax/two_factor/",
                WEB_BASE
            ))
            .header("x-ig-app-id", APP_ID)
            .header("x-csrftoken", &csrftoken)
            .header(header::REFERER, format!("{}/accounts/login/", WEB_BASE))
            .header(header::COOKIE, format!("csrftoken={}", csrftoken))
            .form(&[
                ("username", pending.username.as_str()),
                ("verificationCode", code),
                ("identifier", pending.identifier.as_str()),
                ("queryParams", "{}"),
            ])
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let response_cookies = collect_set_cookies(response.headers());
        let text = response.text().await?;
        tracing::debug!("Two-factor response: {}", text);

        let login: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| Error::Api(format!("Failed to parse two-factor response: {}", e)))?;

        if !login.authenticated {
            return Err(Error::BadCredentials);
        }

        let user_id = login.user_id.as_deref().and_then(|id| id.parse().ok());
        self.adopt_login_cookies(&pending.username, &response_cookies, user_id, &csrftoken)
    }

    fn restore_session(&mut self, session: Session) -> Result<()> {
        self.csrftoken = Some(session.csrftoken.clone());
        self.session = Some(session);
        Ok(())
    }

    fn session(&self) -> Option<Session> {
        self.session.clone()
    }
}

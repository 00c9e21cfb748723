//! Persisted login sessions.
//!
//! A successful login is stored as a small JSON file keyed by account
//! username, under the user data directory. The next run reuses it instead
//! of prompting for credentials; expiry is not tracked here and surfaces as
//! an authentication failure on the next request.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An authenticated session's cookie values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub user_id: Option<u64>,
    pub sessionid: String,
    pub csrftoken: String,
    pub saved_at: DateTime<Utc>,
}

/// On-disk store for sessions, one file per account.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Open the default store under the user data directory.
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "instagram-scanner").ok_or_else(|| {
            Error::Session("Could not determine a user data directory".to_string())
        })?;
        Ok(Self {
            dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Open a store rooted at an explicit directory.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn session_path(&self, username: &str) -> PathBuf {
        self.dir
            .join(format!("session-{}.json", username.to_lowercase()))
    }

    /// Load the saved session for an account, if any.
    ///
    /// A missing file is a normal miss. An unreadable or corrupt file is
    /// logged and treated as a miss so the caller falls back to an
    /// interactive login.
    pub fn load(&self, username: &str) -> Result<Option<Session>> {
        let path = self.session_path(username);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        };

        match serde_json::from_str::<Session>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(
                    "Ignoring corrupt session file {}: {}",
                    path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// Persist a session for reuse on the next run.
    pub fn save(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.session_path(&session.username);
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&path, content)?;
        tracing::debug!("Session saved to {}", path.display());
        Ok(())
    }
}

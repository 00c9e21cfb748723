//! Error types for the instagram-scanner application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Collaborator error taxonomy
    #[error("Profile '{0}' does not exist")]
    ProfileNotFound(String),

    #[error("Profile '{0}' is private and not visible to this session")]
    PrivateProfile(String),

    #[error("Bad credentials: username or password is incorrect")]
    BadCredentials,

    #[error("Two-factor authentication required")]
    TwoFactorRequired,

    #[error("Login required: {0}")]
    LoginRequired(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("API error: {0}")]
    Api(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // Session errors
    #[error("Session error: {0}")]
    Session(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Operator-facing hint printed alongside fatal errors.
    pub fn remediation_hint(&self) -> Option<&'static str> {
        match self {
            Error::ProfileNotFound(_) => {
                Some("Check the username spelling; Instagram usernames contain only letters, digits, dots and underscores.")
            }
            Error::PrivateProfile(_) => {
                Some("Log in with an account that follows this profile and run the scan again.")
            }
            Error::Connection(_) | Error::RateLimited(_) => {
                Some("Instagram may be throttling requests. Wait a few minutes and retry, or log in first.")
            }
            Error::BadCredentials => Some("Verify the username and password, then retry."),
            _ => None,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
///
/// A user interrupt (Ctrl-C) still exits with SUCCESS after the partial
/// summary is printed.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

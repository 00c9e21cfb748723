//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Maximum Instagram username length.
const MAX_USERNAME_LENGTH: usize = 30;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_username(&config.target.username)?;

    if let Some(login_user) = config.account.username.as_deref() {
        validate_username(login_user)?;
    }

    validate_limits(config)?;

    Ok(())
}

/// Validate an Instagram username.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::MissingConfig(
            "target username (pass one on the command line or set [target].username)".to_string(),
        ));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: format!(
                "Username must be at most {} characters (got {})",
                MAX_USERNAME_LENGTH,
                username.len()
            ),
        });
    }

    // Instagram usernames: letters, digits, dots and underscores
    let pattern = Regex::new(r"^[A-Za-z0-9._]+$").unwrap();
    if !pattern.is_match(username) {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: format!(
                "'{}' contains characters not allowed in Instagram usernames",
                username
            ),
        });
    }

    let lower = username.to_lowercase();
    if lower.contains("replaceme") || lower == "your_username" {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: "Username appears to be a placeholder. Provide a real profile name."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the iteration caps and network limits.
fn validate_limits(config: &Config) -> Result<()> {
    if config.limits.max_posts == 0 {
        return Err(Error::ConfigValidation {
            field: "max_posts".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    if config.limits.request_timeout_seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "request_timeout_seconds".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    if config.limits.max_connection_attempts == 0 {
        return Err(Error::ConfigValidation {
            field: "max_connection_attempts".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_target(username: &str) -> Config {
        let mut config = Config::default();
        config.target.username = username.to_string();
        config
    }

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("natgeo").is_ok());
        assert!(validate_username("user.name_99").is_ok());
        assert!(validate_username("A").is_ok());
    }

    #[test]
    fn test_empty_username_rejected() {
        assert!(validate_username("").is_err());
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert!(validate_username("user name").is_err());
        assert!(validate_username("user@host").is_err());
        assert!(validate_username("héllo").is_err());
    }

    #[test]
    fn test_placeholder_rejected() {
        assert!(validate_username("replaceme").is_err());
        assert!(validate_username("your_username").is_err());
    }

    #[test]
    fn test_too_long_rejected() {
        let long = "a".repeat(31);
        assert!(validate_username(&long).is_err());
    }

    #[test]
    fn test_zero_caps_rejected() {
        let mut config = config_with_target("demo");
        config.limits.max_posts = 0;
        assert!(validate_config(&config).is_err());

        let mut config = config_with_target("demo");
        config.limits.max_connection_attempts = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_comment_cap_allowed() {
        // A comment cap of zero is a valid "skip comments" setting
        let mut config = config_with_target("demo");
        config.limits.max_comments_per_post = 0;
        assert!(validate_config(&config).is_ok());
    }
}

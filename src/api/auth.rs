//! Interactive login flow.
//!
//! Session reuse is attempted first; only on a miss does the operator get
//! prompted. Prompting sits behind [`CredentialsProvider`] so tests can
//! supply fixed values instead of blocking on a terminal.

use console::Term;

use crate::api::session::SessionStore;
use crate::api::source::ProfileSource;
use crate::error::{Error, Result};
use crate::output::{print_error, print_info, print_success, print_warning};

/// Supplies credentials for the login flow.
pub trait CredentialsProvider {
    /// Ask whether to log in at all.
    fn confirm_login(&mut self) -> Result<bool>;

    /// Ask for the account username. An empty answer skips login.
    fn username(&mut self) -> Result<String>;

    /// Ask for the account password (masked input).
    fn password(&mut self, username: &str) -> Result<String>;

    /// Ask for a two-factor verification code.
    fn two_factor_code(&mut self) -> Result<String>;
}

/// Credentials provider reading from the terminal.
pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialsProvider for TerminalPrompter {
    fn confirm_login(&mut self) -> Result<bool> {
        self.term
            .write_str("Log in for stories and highlights? (y/n): ")?;
        let answer = self.term.read_line()?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    fn username(&mut self) -> Result<String> {
        self.term
            .write_str("Instagram username (Enter to skip): ")?;
        Ok(self.term.read_line()?.trim().to_string())
    }

    fn password(&mut self, username: &str) -> Result<String> {
        self.term
            .write_str(&format!("Password for {}: ", username))?;
        Ok(self.term.read_secure_line()?)
    }

    fn two_factor_code(&mut self) -> Result<String> {
        self.term.write_str("Two-factor code: ")?;
        Ok(self.term.read_line()?.trim().to_string())
    }
}

/// Run the login flow against a source.
///
/// Returns whether the source ended up authenticated. Bad credentials are
/// reported and leave the run unauthenticated; a failed two-factor
/// completion is fatal.
pub async fn login_flow<S, P>(
    source: &mut S,
    store: &SessionStore,
    provider: &mut P,
    account: Option<String>,
) -> Result<bool>
where
    S: ProfileSource,
    P: CredentialsProvider,
{
    let username = match account {
        Some(username) => username,
        None => {
            let username = provider.username()?;
            if username.is_empty() {
                print_warning("No username given, continuing unauthenticated");
                return Ok(false);
            }
            username
        }
    };

    // Session reuse first
    match store.load(&username) {
        Ok(Some(session)) => {
            source.restore_session(session)?;
            print_info(&format!("Reusing saved session for {}", username));
            return Ok(true);
        }
        Ok(None) => {
            print_info("No saved session found, logging in");
        }
        Err(e) => {
            tracing::warn!("Could not load saved session: {}", e);
        }
    }

    let password = provider.password(&username)?;

    match source.login(&username, &password).await {
        Ok(()) => {}
        Err(Error::TwoFactorRequired) => {
            print_info("Two-factor authentication required");
            let code = provider.two_factor_code()?;
            // A rejected code terminates the run
            source.two_factor_login(&code).await?;
        }
        Err(Error::BadCredentials) => {
            print_error("Bad credentials, continuing unauthenticated");
            return Ok(false);
        }
        Err(e) => return Err(e),
    }

    if let Some(session) = source.session() {
        match store.save(&session) {
            Ok(()) => print_info("Session saved for reuse on the next run"),
            Err(e) => tracing::warn!("Could not persist session: {}", e),
        }
    }

    print_success("Logged in");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::session::Session;
    use crate::api::source::fake::{make_profile, FakeSource};
    use chrono::Utc;

    /// Scripted provider recording which prompts were shown.
    #[derive(Default)]
    struct ScriptedProvider {
        username: String,
        password: String,
        code: String,
        prompts: Vec<&'static str>,
    }

    impl CredentialsProvider for ScriptedProvider {
        fn confirm_login(&mut self) -> Result<bool> {
            self.prompts.push("confirm");
            Ok(true)
        }

        fn username(&mut self) -> Result<String> {
            self.prompts.push("username");
            Ok(self.username.clone())
        }

        fn password(&mut self, _username: &str) -> Result<String> {
            self.prompts.push("password");
            Ok(self.password.clone())
        }

        fn two_factor_code(&mut self) -> Result<String> {
            self.prompts.push("code");
            Ok(self.code.clone())
        }
    }

    fn store_with_session(username: &str) -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_dir(dir.path().to_path_buf());
        store
            .save(&Session {
                username: username.to_string(),
                user_id: Some(1),
                sessionid: "sid".to_string(),
                csrftoken: "csrf".to_string(),
                saved_at: Utc::now(),
            })
            .unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_saved_session_skips_prompts() {
        let (_dir, store) = store_with_session("tester");
        let mut source = FakeSource::with_profile(make_profile("demo"));
        let mut provider = ScriptedProvider::default();

        let logged_in = login_flow(&mut source, &store, &mut provider, Some("tester".into()))
            .await
            .unwrap();

        assert!(logged_in);
        assert!(provider.prompts.is_empty(), "no prompt should be shown");
        assert_eq!(source.restored.lock().unwrap().as_slice(), ["tester"]);
    }

    #[tokio::test]
    async fn test_fresh_login_persists_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_dir(dir.path().to_path_buf());

        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.expected_password = Some("hunter2".to_string());
        let mut provider = ScriptedProvider {
            password: "hunter2".to_string(),
            ..Default::default()
        };

        let logged_in = login_flow(&mut source, &store, &mut provider, Some("tester".into()))
            .await
            .unwrap();

        assert!(logged_in);
        assert!(source.is_logged_in());
        assert_eq!(provider.prompts, vec!["password"]);
        assert!(store.load("tester").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_bad_credentials_continue_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_dir(dir.path().to_path_buf());

        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.expected_password = Some("right".to_string());
        let mut provider = ScriptedProvider {
            password: "wrong".to_string(),
            ..Default::default()
        };

        let logged_in = login_flow(&mut source, &store, &mut provider, Some("tester".into()))
            .await
            .unwrap();

        assert!(!logged_in);
        assert!(!source.is_logged_in());
    }

    #[tokio::test]
    async fn test_two_factor_completion() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_dir(dir.path().to_path_buf());

        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.expected_password = Some("hunter2".to_string());
        source.require_two_factor = true;
        let mut provider = ScriptedProvider {
            password: "hunter2".to_string(),
            code: "123456".to_string(),
            ..Default::default()
        };

        let logged_in = login_flow(&mut source, &store, &mut provider, Some("tester".into()))
            .await
            .unwrap();

        assert!(logged_in);
        assert_eq!(provider.prompts, vec!["password", "code"]);
    }

    #[tokio::test]
    async fn test_two_factor_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_dir(dir.path().to_path_buf());

        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.expected_password = Some("hunter2".to_string());
        source.require_two_factor = true;
        let mut provider = ScriptedProvider {
            password: "hunter2".to_string(),
            code: "000000".to_string(), // the fake rejects this code
            ..Default::default()
        };

        let result = login_flow(&mut source, &store, &mut provider, Some("tester".into())).await;

        // Only one code prompt, then the error propagates
        assert!(result.is_err());
        assert_eq!(provider.prompts, vec!["password", "code"]);
        assert!(store.load("tester").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_username_skips_login() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_dir(dir.path().to_path_buf());

        let mut source = FakeSource::with_profile(make_profile("demo"));
        let mut provider = ScriptedProvider::default();

        let logged_in = login_flow(&mut source, &store, &mut provider, None)
            .await
            .unwrap();

        assert!(!logged_in);
        assert_eq!(provider.prompts, vec!["username"]);
        assert!(source.login_attempts.lock().unwrap().is_empty());
    }
}

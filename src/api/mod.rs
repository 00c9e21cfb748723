//! Instagram collaborator boundary: client, auth, sessions, wire types.

pub mod auth;
pub mod client;
pub mod session;
pub mod source;
pub mod types;

pub use auth::{login_flow, CredentialsProvider, TerminalPrompter};
pub use client::InstagramApi;
pub use session::{Session, SessionStore};
pub use source::ProfileSource;

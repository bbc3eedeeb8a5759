//! Session state and token persistence.
//!
//! The session is the single source of truth for "am I signed in, and as
//! whom". Only the bearer token is persisted to disk; user and profile are
//! cached in memory and refreshed from the server on startup.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Profile, User};

/// Token file name in the data directory
const TOKEN_FILE: &str = "token.json";

#[derive(Debug, Serialize, Deserialize)]
struct PersistedToken {
    token: String,
}

/// In-memory session with a disk-persisted bearer token.
///
/// Invariant: a session without a token never holds a user or profile.
/// All mutation goes through the methods below.
#[derive(Debug)]
pub struct Session {
    data_dir: PathBuf,
    token: Option<String>,
    user: Option<User>,
    profile: Option<Profile>,
    loading: bool,
}

impl Session {
    /// Create an empty session. `loading` stays true until the startup
    /// restoration check has concluded.
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            token: None,
            user: None,
            profile: None,
            loading: true,
        }
    }

    /// Read the persisted token from disk, if any.
    pub fn load_token(&mut self) -> Result<Option<String>> {
        let path = self.token_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read token file")?;
        let persisted: PersistedToken =
            serde_json::from_str(&contents).context("Failed to parse token file")?;
        self.token = Some(persisted.token.clone());
        Ok(Some(persisted.token))
    }

    /// Install a full session after login, registration, or restoration.
    pub fn set_session(&mut self, user: User, profile: Option<Profile>, token: String) -> Result<()> {
        self.user = Some(user);
        self.profile = profile;
        self.token = Some(token);
        self.persist_token()
    }

    /// Replace the cached profile. Ignored when nobody is signed in.
    pub fn set_profile(&mut self, profile: Profile) {
        if self.user.is_none() {
            warn!("Discarding profile update for a signed-out session");
            return;
        }
        self.profile = Some(profile);
    }

    /// Swap in a replacement token (password change) without touching the
    /// cached user or profile.
    pub fn rotate_token(&mut self, token: String) -> Result<()> {
        if self.user.is_none() {
            warn!("Discarding token rotation for a signed-out session");
            return Ok(());
        }
        self.token = Some(token);
        self.persist_token()
    }

    /// Drop the session state and the persisted token.
    pub fn clear(&mut self) -> Result<()> {
        self.token = None;
        self.user = None;
        self.profile = None;
        let path = self.token_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove token file")?;
        }
        Ok(())
    }

    /// Mark the startup restoration check as finished.
    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// True when a signed-in user is present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn persist_token(&self) -> Result<()> {
        let Some(ref token) = self.token else {
            return Ok(());
        };
        let path = self.token_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&PersistedToken {
            token: token.clone(),
        })?;
        std::fs::write(path, contents).context("Failed to write token file")?;
        Ok(())
    }

    fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(username: &str) -> User {
        serde_json::from_str(&format!(r#"{{"username": "{username}"}}"#))
            .expect("Failed to build test user")
    }

    #[test]
    fn test_new_session_is_empty_and_loading() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = Session::new(dir.path().to_path_buf());
        assert!(session.loading());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
        assert!(session.profile().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_set_session_persists_token() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(dir.path().to_path_buf());
        session
            .set_session(test_user("alice"), None, "abc123".to_string())
            .expect("set_session");

        assert_eq!(session.token(), Some("abc123"));
        assert!(session.is_authenticated());

        // A new session over the same directory sees the persisted token
        let mut reloaded = Session::new(dir.path().to_path_buf());
        let token = reloaded.load_token().expect("load_token");
        assert_eq!(token.as_deref(), Some("abc123"));
        // Only the token survives; user and profile come back from the server
        assert!(reloaded.user().is_none());
    }

    #[test]
    fn test_clear_removes_everything() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(dir.path().to_path_buf());
        session
            .set_session(test_user("alice"), None, "abc123".to_string())
            .expect("set_session");
        session.clear().expect("clear");

        assert!(session.token().is_none());
        assert!(session.user().is_none());
        assert!(session.profile().is_none());
        assert!(!session.is_authenticated());

        let mut reloaded = Session::new(dir.path().to_path_buf());
        assert!(reloaded.load_token().expect("load_token").is_none());
    }

    #[test]
    fn test_clear_without_token_file_is_fine() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(dir.path().to_path_buf());
        session.clear().expect("clear on empty session");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_rotate_token_keeps_user() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(dir.path().to_path_buf());
        session
            .set_session(test_user("alice"), None, "abc123".to_string())
            .expect("set_session");
        session.rotate_token("def456".to_string()).expect("rotate");

        assert_eq!(session.token(), Some("def456"));
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("alice"));

        let mut reloaded = Session::new(dir.path().to_path_buf());
        assert_eq!(
            reloaded.load_token().expect("load_token").as_deref(),
            Some("def456")
        );
    }

    #[test]
    fn test_rotate_token_signed_out_is_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(dir.path().to_path_buf());
        session.rotate_token("orphan".to_string()).expect("rotate");
        // Invariant: no user means no token
        assert!(session.token().is_none());
    }

    #[test]
    fn test_set_profile_requires_user() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(dir.path().to_path_buf());

        session.set_profile(Profile::default());
        assert!(session.profile().is_none());

        session
            .set_session(test_user("alice"), None, "abc123".to_string())
            .expect("set_session");
        session.set_profile(Profile {
            bio: "hello".to_string(),
            ..Default::default()
        });
        assert_eq!(session.profile().map(|p| p.bio.as_str()), Some("hello"));
    }

    #[test]
    fn test_finish_loading() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(dir.path().to_path_buf());
        assert!(session.loading());
        session.finish_loading();
        assert!(!session.loading());
    }
}

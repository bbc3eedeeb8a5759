//! Auth operations wired between the API client and the session store.
//!
//! `AuthContext` is constructed once at startup and handed to consumers by
//! reference or cheap clone; clones share the same session. Every
//! operation follows one pattern: call the API, apply the result through a
//! session store entry point, and report an `AuthOutcome` the UI can
//! display. Network failures never propagate as faults.
//!
//! The session lock is only held to read or apply state, never across a
//! network await, so overlapping operations stay last-write-wins.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError, AuthPayload};
use crate::models::{Profile, ProfileUpdate, RegisterRequest, User};

use super::Session;

/// Result of a form-facing auth operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
}

impl AuthOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Point-in-time copy of session state for rendering.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub profile: Option<Profile>,
    pub authenticated: bool,
    pub loading: bool,
}

#[derive(Clone)]
pub struct AuthContext {
    api: ApiClient,
    session: Arc<Mutex<Session>>,
}

impl AuthContext {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Startup entry point: restore a persisted session when a token
    /// exists, otherwise conclude the check immediately. Runs once per
    /// process.
    pub async fn initialize(&self) {
        let token = {
            let mut session = self.session.lock().await;
            match session.load_token() {
                Ok(token) => token,
                Err(e) => {
                    warn!(error = %e, "Failed to read persisted token");
                    None
                }
            }
        };

        if token.is_some() {
            self.restore_session().await;
        } else {
            self.session.lock().await.finish_loading();
        }
    }

    /// Validate the persisted token and repopulate user and profile. Any
    /// failure clears the session and discards the token. The loading flag
    /// is lowered in every case.
    pub async fn restore_session(&self) {
        let token = self.bearer().await;
        let Some(token) = token else {
            self.session.lock().await.finish_loading();
            return;
        };

        let restored = match self.api.check_auth(&token).await {
            Ok(user) => match self.api.user_info(&token).await {
                Ok(info) => Some((user, info.profile)),
                Err(e) => {
                    warn!(error = %e, "Profile fetch during session restore failed");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, auth_failure = e.is_auth_failure(), "Persisted token rejected");
                None
            }
        };

        let mut session = self.session.lock().await;
        match restored {
            Some((user, profile)) => {
                info!(username = %user.username, "Session restored");
                if let Err(e) = session.set_session(user, profile, token) {
                    warn!(error = %e, "Failed to re-persist token");
                }
            }
            None => {
                if let Err(e) = session.clear() {
                    warn!(error = %e, "Failed to clear session");
                }
            }
        }
        session.finish_loading();
    }

    /// Sign in and install the returned session.
    pub async fn login(&self, username: &str, password: &str) -> AuthOutcome {
        if username.is_empty() || password.is_empty() {
            return AuthOutcome::fail("Username and password are required");
        }

        match self.api.login(username, password).await {
            Ok(payload) => self.install_session(payload, "Signed in").await,
            Err(e) => AuthOutcome::fail(friendly_message(&e, "Sign-in")),
        }
    }

    /// Create an account; a successful registration signs the user in.
    pub async fn register(&self, request: &RegisterRequest) -> AuthOutcome {
        if request.username.is_empty() || request.email.is_empty() || request.password.is_empty() {
            return AuthOutcome::fail("Username, email, and password are required");
        }
        if request.password != request.password_confirm {
            return AuthOutcome::fail("Passwords do not match");
        }

        match self.api.register(request).await {
            Ok(payload) => self.install_session(payload, "Account created").await,
            Err(e) => AuthOutcome::fail(friendly_message(&e, "Registration")),
        }
    }

    /// Shared login/register success path.
    async fn install_session(&self, payload: AuthPayload, default_message: &str) -> AuthOutcome {
        if !payload.success {
            return AuthOutcome::fail(non_empty(payload.message, "Request rejected by server"));
        }
        let (Some(token), Some(user)) = (payload.token, payload.user) else {
            return AuthOutcome::fail("Server response was missing the session token");
        };

        let username = user.username.clone();
        {
            let mut session = self.session.lock().await;
            if let Err(e) = session.set_session(user, payload.profile, token) {
                warn!(error = %e, "Failed to persist token");
            }
        }
        info!(username = %username, "Session established");
        AuthOutcome::ok(non_empty(payload.message, default_message))
    }

    /// Sign out. The server call is best-effort; the local session is
    /// cleared no matter what, since a failed request must not leave the
    /// client looking signed in.
    pub async fn logout(&self) -> AuthOutcome {
        if let Some(token) = self.bearer().await {
            if let Err(e) = self.api.logout(&token).await {
                error!(error = %e, "Logout request failed");
            }
        }

        let mut session = self.session.lock().await;
        if let Err(e) = session.clear() {
            warn!(error = %e, "Failed to clear session");
        }
        AuthOutcome::ok("Signed out")
    }

    /// Re-fetch the profile for the signed-in user. On failure the cached
    /// profile is left as-is.
    pub async fn fetch_profile(&self) -> AuthOutcome {
        let Some(token) = self.bearer().await else {
            return AuthOutcome::fail("Not signed in");
        };

        match self.api.user_info(&token).await {
            Ok(info) => match info.profile {
                Some(profile) => {
                    self.session.lock().await.set_profile(profile);
                    AuthOutcome::ok("Profile refreshed")
                }
                None => AuthOutcome::fail("Server response was missing the profile"),
            },
            Err(e) => AuthOutcome::fail(friendly_message(&e, "Profile refresh")),
        }
    }

    /// Apply a partial profile update; unspecified fields keep their
    /// current values on the server.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> AuthOutcome {
        if update.is_empty() {
            return AuthOutcome::ok("No changes to save");
        }
        let Some(token) = self.bearer().await else {
            return AuthOutcome::fail("Not signed in");
        };

        match self.api.update_profile(&token, update).await {
            Ok(profile) => {
                self.session.lock().await.set_profile(profile);
                AuthOutcome::ok("Profile saved")
            }
            Err(e) => AuthOutcome::fail(friendly_message(&e, "Profile update")),
        }
    }

    /// Change the password. The confirmation is checked locally before any
    /// request goes out; when the server issues a replacement token it is
    /// swapped into the session.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> AuthOutcome {
        if new_password.is_empty() {
            return AuthOutcome::fail("New password is required");
        }
        if new_password != new_password_confirm {
            return AuthOutcome::fail("New passwords do not match");
        }
        let Some(token) = self.bearer().await else {
            return AuthOutcome::fail("Not signed in");
        };

        match self
            .api
            .change_password(&token, old_password, new_password, new_password_confirm)
            .await
        {
            Ok(payload) if payload.success => {
                if let Some(new_token) = payload.token {
                    let mut session = self.session.lock().await;
                    if let Err(e) = session.rotate_token(new_token) {
                        warn!(error = %e, "Failed to persist rotated token");
                    }
                }
                AuthOutcome::ok(non_empty(payload.message, "Password changed"))
            }
            Ok(payload) => AuthOutcome::fail(non_empty(payload.message, "Password change rejected")),
            Err(e) => AuthOutcome::fail(friendly_message(&e, "Password change")),
        }
    }

    /// Ask the server to email a reset link. Leaves the session untouched.
    pub async fn request_password_reset(&self, email: &str) -> AuthOutcome {
        if email.is_empty() {
            return AuthOutcome::fail("Email address is required");
        }

        match self.api.request_password_reset(email).await {
            Ok(payload) if payload.success => {
                AuthOutcome::ok(non_empty(payload.message, "Reset email sent"))
            }
            Ok(payload) => AuthOutcome::fail(non_empty(payload.message, "Reset request rejected")),
            Err(e) => AuthOutcome::fail(friendly_message(&e, "Password reset")),
        }
    }

    /// Complete a reset with the emailed token. Does not sign the user in;
    /// they log in with the new password afterwards.
    pub async fn confirm_password_reset(
        &self,
        reset_token: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> AuthOutcome {
        if reset_token.is_empty() || new_password.is_empty() {
            return AuthOutcome::fail("Reset token and new password are required");
        }
        if new_password != new_password_confirm {
            return AuthOutcome::fail("Passwords do not match");
        }

        match self
            .api
            .confirm_password_reset(reset_token, new_password, new_password_confirm)
            .await
        {
            Ok(payload) if payload.success => AuthOutcome::ok(non_empty(
                payload.message,
                "Password reset - sign in with your new password",
            )),
            Ok(payload) => AuthOutcome::fail(non_empty(payload.message, "Password reset rejected")),
            Err(e) => AuthOutcome::fail(friendly_message(&e, "Password reset")),
        }
    }

    /// Copy of the current session state for rendering.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.lock().await;
        SessionSnapshot {
            user: session.user().cloned(),
            profile: session.profile().cloned(),
            authenticated: session.is_authenticated(),
            loading: session.loading(),
        }
    }

    async fn bearer(&self) -> Option<String> {
        self.session.lock().await.token().map(str::to_string)
    }
}

/// Map a transport-level error to something a person can act on.
fn friendly_message(error: &ApiError, action: &str) -> String {
    match error {
        ApiError::Unauthorized => "Invalid credentials or expired session".to_string(),
        ApiError::Rejected(message) => message.clone(),
        ApiError::Network(e) if e.is_timeout() => {
            "Connection timed out. Please try again.".to_string()
        }
        ApiError::Network(_) => "Unable to reach the server. Check your network connection.".to_string(),
        _ => format!("{action} failed: {error}"),
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A context whose API client points at a dead port; any operation that
    /// reaches the network comes back as a connection failure, so these
    /// tests can tell "no request sent" apart from "request attempted".
    fn offline_context(dir: &tempfile::TempDir) -> AuthContext {
        let api = ApiClient::new("http://127.0.0.1:1").expect("client");
        AuthContext::new(api, Session::new(dir.path().to_path_buf()))
    }

    #[tokio::test]
    async fn test_change_password_mismatch_is_checked_before_network() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = offline_context(&dir);

        let outcome = ctx.change_password("old", "first", "second").await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "New passwords do not match");
    }

    #[tokio::test]
    async fn test_register_mismatch_is_checked_before_network() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = offline_context(&dir);

        let request = RegisterRequest {
            username: "bob".to_string(),
            email: "bob@example.org".to_string(),
            password: "first".to_string(),
            password_confirm: "second".to_string(),
            ..Default::default()
        };
        let outcome = ctx.register(&request).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Passwords do not match");
    }

    #[tokio::test]
    async fn test_login_requires_credentials() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = offline_context(&dir);

        let outcome = ctx.login("", "secret").await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Username and password are required");
    }

    #[tokio::test]
    async fn test_logout_without_session_is_clean() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = offline_context(&dir);

        // No token, so no request is attempted and nothing can fail
        let outcome = ctx.logout().await;
        assert!(outcome.success);

        let snapshot = ctx.snapshot().await;
        assert!(!snapshot.authenticated);
        assert!(snapshot.user.is_none());
        assert!(snapshot.profile.is_none());
    }

    #[tokio::test]
    async fn test_update_profile_with_no_changes_skips_network() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = offline_context(&dir);

        let outcome = ctx.update_profile(&ProfileUpdate::default()).await;
        assert!(outcome.success);
        assert_eq!(outcome.message, "No changes to save");
    }

    #[tokio::test]
    async fn test_operations_require_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = offline_context(&dir);

        let update = ProfileUpdate {
            bio: Some("bio".to_string()),
            ..Default::default()
        };
        assert_eq!(ctx.update_profile(&update).await.message, "Not signed in");
        assert_eq!(ctx.fetch_profile().await.message, "Not signed in");
        assert_eq!(
            ctx.change_password("old", "new", "new").await.message,
            "Not signed in"
        );
    }

    #[tokio::test]
    async fn test_initialize_without_token_just_finishes_loading() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = offline_context(&dir);

        assert!(ctx.snapshot().await.loading);
        ctx.initialize().await;
        let snapshot = ctx.snapshot().await;
        assert!(!snapshot.loading);
        assert!(!snapshot.authenticated);
    }

    #[tokio::test]
    async fn test_restore_with_unreachable_server_clears_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("token.json"), r#"{"token": "stale"}"#)
            .expect("seed token file");

        let ctx = offline_context(&dir);
        ctx.initialize().await;

        let snapshot = ctx.snapshot().await;
        assert!(!snapshot.loading);
        assert!(!snapshot.authenticated);
        assert!(!dir.path().join("token.json").exists());
    }
}

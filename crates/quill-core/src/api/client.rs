//! HTTP client for the member API.
//!
//! `ApiClient` shapes requests and classifies responses; it never stores
//! the bearer token. Authenticated calls receive the token per call, which
//! keeps token ownership with the session store.

use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{Profile, ProfileUpdate, RegisterRequest, User};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s tolerates a slow server while still failing in bounded time.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Login / register response body.
#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub profile: Option<Profile>,
}

/// Password change response; the server may issue a replacement token.
#[derive(Debug, Deserialize)]
pub struct PasswordChangePayload {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// Generic success/message body used by the password reset endpoints.
#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Account and profile as returned by the user-info endpoint.
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub profile: Option<Profile>,
}

#[derive(Debug, Deserialize)]
struct CheckAuthResponse {
    #[serde(default)]
    authenticated: bool,
    #[serde(default)]
    user: Option<User>,
}

/// API client for the member service.
/// Clone is cheap - reqwest::Client shares its connection pool internally.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `https://example.org/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(token: &str) -> String {
        format!("Token {token}")
    }

    /// Check if a response is successful, classifying the failure from the
    /// status and body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// POST /auth/login/
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthPayload, ApiError> {
        debug!(username, "Sending login request");
        let body = serde_json::json!({ "username": username, "password": password });
        self.send(self.client.post(self.url("/auth/login/")).json(&body))
            .await
    }

    /// POST /auth/register/
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        debug!(username = %request.username, "Sending registration request");
        self.send(self.client.post(self.url("/auth/register/")).json(request))
            .await
    }

    /// POST /auth/logout/ - invalidates the token server-side.
    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/auth/logout/"))
            .header(header::AUTHORIZATION, Self::bearer(token))
            .send()
            .await?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// GET /auth/check-auth/ - validates the token and returns the account
    /// it belongs to. A rejected token surfaces as `Unauthorized`.
    pub async fn check_auth(&self, token: &str) -> Result<User, ApiError> {
        let response: CheckAuthResponse = self
            .send(
                self.client
                    .get(self.url("/auth/check-auth/"))
                    .header(header::AUTHORIZATION, Self::bearer(token)),
            )
            .await?;

        match response.user {
            Some(user) if response.authenticated => Ok(user),
            _ => Err(ApiError::Unauthorized),
        }
    }

    /// GET /auth/user-info/ - current account plus profile.
    pub async fn user_info(&self, token: &str) -> Result<UserInfo, ApiError> {
        self.send(
            self.client
                .get(self.url("/auth/user-info/"))
                .header(header::AUTHORIZATION, Self::bearer(token)),
        )
        .await
    }

    /// PATCH /auth/profile/ - partial update; returns the updated profile.
    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, ApiError> {
        self.send(
            self.client
                .patch(self.url("/auth/profile/"))
                .header(header::AUTHORIZATION, Self::bearer(token))
                .json(update),
        )
        .await
    }

    /// POST /auth/password/change/
    pub async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> Result<PasswordChangePayload, ApiError> {
        let body = serde_json::json!({
            "old_password": old_password,
            "new_password": new_password,
            "new_password_confirm": new_password_confirm,
        });
        self.send(
            self.client
                .post(self.url("/auth/password/change/"))
                .header(header::AUTHORIZATION, Self::bearer(token))
                .json(&body),
        )
        .await
    }

    /// POST /auth/password/reset/ - asks the server to email a reset link.
    pub async fn request_password_reset(&self, email: &str) -> Result<StatusPayload, ApiError> {
        let body = serde_json::json!({ "email": email });
        self.send(
            self.client
                .post(self.url("/auth/password/reset/"))
                .json(&body),
        )
        .await
    }

    /// POST /auth/password/reset/confirm/ - completes a reset with the
    /// emailed token. Does not authenticate the caller.
    pub async fn confirm_password_reset(
        &self,
        reset_token: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> Result<StatusPayload, ApiError> {
        let body = serde_json::json!({
            "token": reset_token,
            "new_password": new_password,
            "new_password_confirm": new_password_confirm,
        });
        self.send(
            self.client
                .post(self.url("/auth/password/reset/confirm/"))
                .json(&body),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/api/").expect("client");
        assert_eq!(
            client.url("/auth/login/"),
            "http://localhost:8000/api/auth/login/"
        );

        let client = ApiClient::new("http://localhost:8000/api").expect("client");
        assert_eq!(
            client.url("/auth/login/"),
            "http://localhost:8000/api/auth/login/"
        );
    }

    #[test]
    fn test_bearer_header_format() {
        assert_eq!(ApiClient::bearer("abc123"), "Token abc123");
    }

    #[test]
    fn test_parse_auth_payload() {
        let json = r#"{
            "success": true,
            "message": "Login successful",
            "user": {"id": 1, "username": "alice", "email": "alice@example.org"},
            "profile": {"bio": "", "is_verified": false},
            "token": "abc123"
        }"#;

        let payload: AuthPayload = serde_json::from_str(json).expect("Failed to parse payload");
        assert!(payload.success);
        assert_eq!(payload.token.as_deref(), Some("abc123"));
        assert_eq!(
            payload.user.as_ref().map(|u| u.username.as_str()),
            Some("alice")
        );
        assert!(payload.profile.is_some());
    }

    #[test]
    fn test_parse_auth_payload_failure_shape() {
        // Failure bodies carry no user/profile/token
        let json = r#"{"success": false, "message": "Login failed"}"#;
        let payload: AuthPayload = serde_json::from_str(json).expect("Failed to parse payload");
        assert!(!payload.success);
        assert!(payload.token.is_none());
        assert!(payload.user.is_none());
    }

    #[test]
    fn test_parse_check_auth_response() {
        let json = r#"{"authenticated": true, "user": {"id": 2, "username": "bob"}}"#;
        let response: CheckAuthResponse =
            serde_json::from_str(json).expect("Failed to parse check-auth response");
        assert!(response.authenticated);
        assert_eq!(response.user.map(|u| u.username), Some("bob".to_string()));

        let json = r#"{"authenticated": false}"#;
        let response: CheckAuthResponse =
            serde_json::from_str(json).expect("Failed to parse check-auth response");
        assert!(!response.authenticated);
        assert!(response.user.is_none());
    }

    #[test]
    fn test_parse_password_change_payload() {
        let json = r#"{"success": true, "message": "Password changed successfully", "token": "rotated"}"#;
        let payload: PasswordChangePayload =
            serde_json::from_str(json).expect("Failed to parse payload");
        assert!(payload.success);
        assert_eq!(payload.token.as_deref(), Some("rotated"));
    }
}

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The server understood the request but refused it; carries the
    /// message extracted from the response body.
    #[error("{0}")]
    Rejected(String),

    #[error("Unauthorized - token invalid or expired")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies included in messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error body shape used by the member API on rejected requests:
/// `message` and per-field `errors` on validation failures, `detail` on
/// token authentication failures.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    errors: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ApiError {
    /// Truncate a response body to avoid dragging huge payloads into logs
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Pull the most specific human-readable message out of an error body:
    /// the first field error, then `message`, then `detail`.
    fn message_from_body(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;

        if let Some(errors) = &parsed.errors {
            for value in errors.values() {
                match value {
                    serde_json::Value::Array(items) => {
                        if let Some(serde_json::Value::String(msg)) = items.first() {
                            return Some(msg.clone());
                        }
                    }
                    serde_json::Value::String(msg) => return Some(msg.clone()),
                    _ => {}
                }
            }
        }

        parsed
            .message
            .filter(|m| !m.is_empty())
            .or(parsed.detail)
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound(Self::truncate_body(body)),
            400..=499 => match Self::message_from_body(body) {
                Some(message) => ApiError::Rejected(message),
                None => ApiError::Rejected(format!("Request rejected ({})", status)),
            },
            500..=599 => ApiError::ServerError(Self::truncate_body(body)),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, Self::truncate_body(body))),
        }
    }

    /// True when the failure means the bearer token is no longer usable.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_unauthorized() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"detail": "Invalid token."}"#);
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_from_status_extracts_field_error() {
        let body = r#"{
            "success": false,
            "message": "Login failed",
            "errors": {"non_field_errors": ["Invalid username or password."]}
        }"#;
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, body);
        match err {
            ApiError::Rejected(message) => assert_eq!(message, "Invalid username or password."),
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_from_status_falls_back_to_message() {
        let body = r#"{"success": false, "message": "Registration failed"}"#;
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, body);
        match err {
            ApiError::Rejected(message) => assert_eq!(message, "Registration failed"),
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_from_status_unparseable_body() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "<html>nope</html>");
        match err {
            ApiError::Rejected(message) => assert!(message.starts_with("Request rejected")),
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_from_status_server_error() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(err, ApiError::ServerError(_)));
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_truncate_body() {
        let long_body = "x".repeat(600);
        let truncated = ApiError::truncate_body(&long_body);
        assert!(truncated.contains("truncated"));
        assert!(truncated.contains("600 total bytes"));

        let short = ApiError::truncate_body("short");
        assert_eq!(short, "short");
    }
}

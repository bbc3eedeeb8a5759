use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account record returned by the member API.
///
/// The server owns this data; the client keeps a read-mostly cached copy
/// inside the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

fn default_is_active() -> bool {
    true
}

impl User {
    /// Full name, falling back to the username when both name fields are blank.
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }
}

/// Registration payload for the register endpoint. The server validates
/// the password confirmation again, but callers are expected to check it
/// locally first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user() {
        let json = r#"{
            "id": 7,
            "username": "kwriter",
            "email": "kay@example.org",
            "first_name": "Kay",
            "last_name": "Writer",
            "is_active": true,
            "date_joined": "2024-03-01T12:30:00Z"
        }"#;

        let user: User = serde_json::from_str(json).expect("Failed to parse user JSON");
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "kwriter");
        assert_eq!(user.full_name(), "Kay Writer");
        assert!(user.is_active);
        assert!(user.date_joined.is_some());
    }

    #[test]
    fn test_parse_minimal_user() {
        // Some endpoints only echo the username back
        let user: User = serde_json::from_str(r#"{"username": "alice"}"#)
            .expect("Failed to parse minimal user JSON");
        assert_eq!(user.username, "alice");
        assert_eq!(user.id, 0);
        assert!(user.is_active);
        assert!(user.date_joined.is_none());
    }

    #[test]
    fn test_full_name_fallback() {
        let user: User = serde_json::from_str(r#"{"username": "ghost"}"#)
            .expect("Failed to parse user JSON");
        assert_eq!(user.full_name(), "ghost");

        let user: User = serde_json::from_str(r#"{"username": "ghost", "first_name": "Casper"}"#)
            .expect("Failed to parse user JSON");
        assert_eq!(user.full_name(), "Casper");
    }

    #[test]
    fn test_register_request_omits_blank_names() {
        let request = RegisterRequest {
            username: "bob".to_string(),
            email: "bob@example.org".to_string(),
            password: "hunter22".to_string(),
            password_confirm: "hunter22".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).expect("Failed to serialize register request");
        let body = value.as_object().expect("Register request should be an object");
        assert!(!body.contains_key("first_name"));
        assert!(!body.contains_key("last_name"));
        assert_eq!(body["username"], "bob");
    }
}

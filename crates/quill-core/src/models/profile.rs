use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Member profile attached to an account.
///
/// Server-owned; the client caches it and mutates it only through the
/// explicit update operation. `avatar` and `is_verified` are read-only on
/// the client side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial profile update. Fields left as `None` are omitted from the
/// request body entirely, so the server keeps their current values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
}

impl ProfileUpdate {
    /// True when no field is set and there is nothing to send.
    pub fn is_empty(&self) -> bool {
        self.bio.is_none() && self.phone_number.is_none() && self.date_of_birth.is_none()
    }
}

//! HTTP client for the member API.

pub mod client;
pub mod error;

pub use client::{ApiClient, AuthPayload, PasswordChangePayload, StatusPayload, UserInfo};
pub use error::ApiError;

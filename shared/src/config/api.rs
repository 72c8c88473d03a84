//! Member-API endpoint configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for the member API consumed by the portal flows
///
/// Endpoint paths live here rather than in code: the flows care about the
/// operations, not the routes, and staging environments rewrite them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MemberApiConfig {
    /// Base URL of the member API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Path of the phone code-request endpoint
    pub request_phone_path: String,

    /// Path of the email code-request endpoint
    pub request_email_path: String,

    /// Path of the phone code-verify endpoint
    pub verify_phone_path: String,

    /// Path of the email code-verify endpoint
    pub verify_email_path: String,

    /// Path of the password-reset endpoint
    pub reset_password_path: String,
}

impl Default for MemberApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://api.sodamtax.co.kr"),
            timeout_secs: 10,
            request_phone_path: String::from("/api/v1/members/verification/phone"),
            request_email_path: String::from("/api/v1/members/verification/email"),
            verify_phone_path: String::from("/api/v1/members/verification/phone/verify"),
            verify_email_path: String::from("/api/v1/members/verification/email/verify"),
            reset_password_path: String::from("/api/v1/members/password/reset"),
        }
    }
}

impl MemberApiConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("MEMBER_API_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: env::var("MEMBER_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            ..defaults
        }
    }

    /// Join a configured path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

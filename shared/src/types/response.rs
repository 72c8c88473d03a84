//! Member-API response envelope
//!
//! Every member-API endpoint wraps its payload in the same envelope:
//! `data` on success, `error` on failure, and the HTTP status mirrored in
//! the body. Fields the backend omits deserialize to their defaults.

use serde::{Deserialize, Serialize};

/// Standard response envelope returned by the member API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Response payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<T>,

    /// Error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,

    /// HTTP status mirrored in the body
    #[serde(default)]
    pub status: u16,
}

impl<T> ApiEnvelope<T> {
    /// Create a successful envelope
    pub fn success(data: T, status: u16) -> Self {
        Self {
            data: Some(data),
            error: None,
            status,
        }
    }

    /// Create an error envelope
    pub fn failure(error: impl Into<String>, status: u16) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
            status,
        }
    }

    /// Whether the envelope carries no error
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Extract the payload, consuming the envelope
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Map the payload to a different type
    pub fn map<U, F>(self, f: F) -> ApiEnvelope<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiEnvelope {
            data: self.data.map(f),
            error: self.error,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct TokenPayload {
        result_token: String,
    }

    #[test]
    fn test_deserialize_success_envelope() {
        let json = r#"{"data":{"resultToken":"abc123"},"status":200}"#;
        let envelope: ApiEnvelope<TokenPayload> = serde_json::from_str(json).unwrap();

        assert!(envelope.is_success());
        assert_eq!(envelope.status, 200);
        assert_eq!(
            envelope.into_data(),
            Some(TokenPayload {
                result_token: "abc123".to_string()
            })
        );
    }

    #[test]
    fn test_deserialize_error_envelope() {
        let json = r#"{"error":"일치하는 회원 정보를 찾을 수 없습니다.","status":404}"#;
        let envelope: ApiEnvelope<TokenPayload> = serde_json::from_str(json).unwrap();

        assert!(!envelope.is_success());
        assert_eq!(envelope.status, 404);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_deserialize_bare_envelope() {
        // Some endpoints answer with an empty body object
        let json = r#"{}"#;
        let envelope: ApiEnvelope<TokenPayload> = serde_json::from_str(json).unwrap();

        assert!(envelope.is_success());
        assert_eq!(envelope.status, 0);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_map_preserves_error() {
        let envelope: ApiEnvelope<u32> = ApiEnvelope::failure("boom", 400);
        let mapped = envelope.map(|n| n.to_string());
        assert_eq!(mapped.error.as_deref(), Some("boom"));
        assert_eq!(mapped.status, 400);
    }
}

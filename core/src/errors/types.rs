//! Concrete error categories used across the flow services.
//!
//! The `#[error]` strings are developer facing and appear in logs only.
//! Localized user facing messages are resolved in
//! `services::verification::messages` so wording can vary by language
//! without touching these types.

use thiserror::Error;

/// Local input validation failures.
///
/// Raised before any member API call is made. Each variant maps to one
/// inline message in the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Login id field is empty
    #[error("Login id is required")]
    LoginIdRequired,

    /// Phone number field is empty
    #[error("Phone number is required")]
    PhoneRequired,

    /// Phone number does not match the mobile number format
    #[error("Invalid phone number format: {masked}")]
    InvalidPhoneFormat {
        /// Masked form of the rejected number, safe for logs
        masked: String,
    },

    /// Email field is empty
    #[error("Email address is required")]
    EmailRequired,

    /// Email does not look like an address
    #[error("Invalid email format")]
    InvalidEmailFormat,

    /// Verification code field is empty
    #[error("Verification code is required")]
    CodeRequired,

    /// New password does not satisfy the password rules
    #[error("Password does not meet the required rules")]
    InvalidPasswordFormat,

    /// Password confirmation differs from the new password
    #[error("Password confirmation does not match")]
    PasswordMismatch,

    /// Required agreements were not accepted
    #[error("Required agreements not accepted")]
    AgreementsRequired,

    /// Result token missing where one is required
    #[error("Result token is missing")]
    TokenMissing,
}

/// Failures reported by the member API or the transport underneath it.
///
/// The HTTP adapter in `sodam_client` maps response statuses onto these
/// variants; core never sees raw HTTP.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// No member matched the submitted identifiers (HTTP 404)
    #[error("No matching member found")]
    MemberNotFound,

    /// The API rejected the request with a client error (HTTP 4xx).
    /// `message` carries the server supplied text when present; the flow
    /// shows it verbatim.
    #[error("Request rejected by the member API (status {status})")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// The API failed with a server error (HTTP 5xx)
    #[error("Member API server error (status {status})")]
    Server { status: u16 },

    /// The request never produced an HTTP response (DNS, timeout, TLS)
    #[error("Transport failure: {message}")]
    Transport { message: String },
}

impl GatewayError {
    /// Server supplied rejection text, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected {
                message: Some(text),
                ..
            } => Some(text.as_str()),
            _ => None,
        }
    }
}

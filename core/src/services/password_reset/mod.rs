//! Password reset flow.
//!
//! Drives the page a member lands on after a successful find-password
//! verification. The result token arrives in the URL query string and is
//! exchanged, together with the new password, at the member API.

pub mod service;
pub mod traits;

pub use service::{token_from_query, PasswordResetFlow, ResetOutcome, LOGIN_ROUTE};
pub use traits::PasswordGateway;

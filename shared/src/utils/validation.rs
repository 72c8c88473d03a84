//! Input validation utilities for the recovery and signup forms

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of the verification code issued by the member API
pub const CODE_LENGTH: usize = 6;

// Basic email pattern: local part, @, domain with at least one dot
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

// Login id: 4-20 chars, starts with a lowercase letter, then lowercase
// letters, digits, underscore or hyphen
static LOGIN_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9_-]{3,19}$").unwrap()
});

/// Default email pattern, for callers that carry the pattern in their own
/// configuration
pub fn email_pattern() -> &'static Regex {
    &EMAIL_REGEX
}

/// Check if a string is not empty after trimming
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if an email address matches the basic email pattern
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Check if a login id matches the portal's id rules
pub fn is_valid_login_id(login_id: &str) -> bool {
    LOGIN_ID_REGEX.is_match(login_id)
}

/// Check if a verification code has the expected shape (6 ASCII digits)
pub fn is_valid_code_format(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit())
}

/// Check if a password satisfies the portal's password rules
///
/// 8-20 characters with at least one letter, one digit and one special
/// character, matching the rules enforced by the member API on reset.
pub fn is_valid_password(password: &str) -> bool {
    let len = password.chars().count();
    if !(8..=20).contains(&len) {
        return false;
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace());
    has_letter && has_digit && has_special
}

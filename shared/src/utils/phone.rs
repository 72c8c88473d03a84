//! Phone number utilities for Korean mobile numbers

use once_cell::sync::Lazy;
use regex::Regex;

// Korean mobile phone number regex (11 digits, 010 prefix)
static KR_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^010\d{8}$").unwrap()
});

/// Default mobile number pattern, for callers that carry the pattern in
/// their own configuration
pub fn kr_mobile_pattern() -> &'static Regex {
    &KR_MOBILE_REGEX
}

/// Normalize a phone number by removing common formatting characters
///
/// Keeps digits only, so `010-1234-5678` and `010 1234 5678` both
/// normalize to `01012345678`.
pub fn normalize_phone_number(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check if a phone number is a valid Korean mobile number
///
/// The number is normalized first, then matched against the 11-digit
/// `010`-prefixed pattern used by the member API.
pub fn is_valid_kr_mobile(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    KR_MOBILE_REGEX.is_match(&normalized)
}

/// Format a Korean mobile number for display (010-1234-5678)
pub fn format_kr_mobile(phone: &str) -> Option<String> {
    let normalized = normalize_phone_number(phone);
    if is_valid_kr_mobile(&normalized) {
        Some(format!(
            "{}-{}-{}",
            &normalized[0..3],
            &normalized[3..7],
            &normalized[7..11]
        ))
    } else {
        None
    }
}

/// Mask a phone number for logs and display (e.g., 010****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

/// Mask an email address for logs (e.g., ab***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        _ => "***".to_string(),
    }
}

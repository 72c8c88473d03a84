//! Configuration for the verification step flow.

use regex::Regex;
use sodam_shared::types::Language;
use sodam_shared::utils::{phone, validation};

use crate::errors::{FlowError, FlowResult};

/// How long an issued code stays valid, in seconds
pub const CODE_VALIDITY_SECONDS: u32 = 300;

/// Maximum failed verification attempts per issued code
pub const MAX_VERIFY_ATTEMPTS: u32 = 5;

/// Settings for [`VerificationFlow`](super::VerificationFlow).
///
/// Defaults match the member API contract: five minute code validity,
/// five attempts, Korean mobile numbers and a permissive email shape.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Seconds the countdown runs after a code is issued
    pub code_validity_seconds: u32,
    /// Failed attempts allowed before verification is blocked
    pub max_attempts: u32,
    /// Pattern a normalized phone number must match
    pub phone_pattern: Regex,
    /// Pattern a trimmed email must match
    pub email_pattern: Regex,
    /// Language the flow picks user facing messages in
    pub language: Language,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            code_validity_seconds: CODE_VALIDITY_SECONDS,
            max_attempts: MAX_VERIFY_ATTEMPTS,
            phone_pattern: phone::kr_mobile_pattern().clone(),
            email_pattern: validation::email_pattern().clone(),
            language: Language::default(),
        }
    }
}

impl FlowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_code_validity_seconds(mut self, seconds: u32) -> Self {
        self.code_validity_seconds = seconds;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Check the configuration for values that would break the flow
    pub fn validate(&self) -> FlowResult<()> {
        if self.code_validity_seconds == 0 {
            return Err(FlowError::internal(
                "code_validity_seconds must be greater than 0",
            ));
        }
        if self.max_attempts == 0 {
            return Err(FlowError::internal("max_attempts must be greater than 0"));
        }
        Ok(())
    }
}

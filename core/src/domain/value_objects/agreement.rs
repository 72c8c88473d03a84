//! Signup agreement checkboxes.

use serde::{Deserialize, Serialize};

/// Individual agreement shown on the signup agreements step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementKind {
    /// Terms of service, required
    TermsOfService,
    /// Privacy policy, required
    PrivacyPolicy,
    /// Marketing contact, optional
    MarketingOptIn,
}

impl AgreementKind {
    /// Whether the agreement must be accepted to continue
    pub fn is_required(&self) -> bool {
        !matches!(self, AgreementKind::MarketingOptIn)
    }
}

/// Acceptance state of the signup agreements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementSet {
    terms_of_service: bool,
    privacy_policy: bool,
    marketing_opt_in: bool,
}

impl AgreementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: AgreementKind, accepted: bool) {
        match kind {
            AgreementKind::TermsOfService => self.terms_of_service = accepted,
            AgreementKind::PrivacyPolicy => self.privacy_policy = accepted,
            AgreementKind::MarketingOptIn => self.marketing_opt_in = accepted,
        }
    }

    pub fn accepted(&self, kind: AgreementKind) -> bool {
        match kind {
            AgreementKind::TermsOfService => self.terms_of_service,
            AgreementKind::PrivacyPolicy => self.privacy_policy,
            AgreementKind::MarketingOptIn => self.marketing_opt_in,
        }
    }

    /// Whether every required agreement is accepted
    pub fn required_accepted(&self) -> bool {
        self.terms_of_service && self.privacy_policy
    }

    /// Whether every agreement, optional ones included, is accepted
    pub fn all_accepted(&self) -> bool {
        self.terms_of_service && self.privacy_policy && self.marketing_opt_in
    }

    /// Accept everything, mirroring the "agree to all" checkbox
    pub fn accept_all(&mut self) {
        self.terms_of_service = true;
        self.privacy_policy = true;
        self.marketing_opt_in = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_set_accepts_nothing() {
        let agreements = AgreementSet::new();
        assert!(!agreements.required_accepted());
        assert!(!agreements.accepted(AgreementKind::TermsOfService));
    }

    #[test]
    fn test_required_accepted_ignores_marketing() {
        let mut agreements = AgreementSet::new();
        agreements.set(AgreementKind::TermsOfService, true);
        agreements.set(AgreementKind::PrivacyPolicy, true);
        assert!(agreements.required_accepted());
        assert!(!agreements.all_accepted());
    }

    #[test]
    fn test_missing_required_agreement_blocks() {
        let mut agreements = AgreementSet::new();
        agreements.set(AgreementKind::TermsOfService, true);
        agreements.set(AgreementKind::MarketingOptIn, true);
        assert!(!agreements.required_accepted());
    }

    #[test]
    fn test_accept_all_and_clear() {
        let mut agreements = AgreementSet::new();
        agreements.accept_all();
        assert!(agreements.all_accepted());
        agreements.clear();
        assert!(!agreements.accepted(AgreementKind::MarketingOptIn));
        assert!(!agreements.required_accepted());
    }

    #[test]
    fn test_marketing_is_optional() {
        assert!(AgreementKind::TermsOfService.is_required());
        assert!(AgreementKind::PrivacyPolicy.is_required());
        assert!(!AgreementKind::MarketingOptIn.is_required());
    }
}

//! Flow kinds and the step machine they share.

use serde::{Deserialize, Serialize};

/// Which recovery or signup flow a session belongs to.
///
/// All three flows share the same input and verification phases; they
/// differ in their entry step and in what happens after a successful
/// verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Recover a forgotten login id
    FindUsername,
    /// Recover a forgotten password
    FindPassword,
    /// New member registration
    Signup,
}

impl FlowKind {
    /// Step a fresh session starts on
    pub fn initial_step(&self) -> Step {
        match self {
            FlowKind::Signup => Step::Agreements,
            _ => Step::Input,
        }
    }

    /// Route navigated to after a successful verification.
    ///
    /// `None` means the flow finishes in place on [`Step::Complete`]
    /// instead of leaving the page.
    pub fn destination(&self) -> Option<&'static str> {
        match self {
            FlowKind::FindUsername => Some("/account/find-id/result"),
            FlowKind::FindPassword => Some("/account/reset-password"),
            FlowKind::Signup => None,
        }
    }

    /// Whether this flow opens with an agreements step
    pub fn has_agreements(&self) -> bool {
        matches!(self, FlowKind::Signup)
    }

    /// Stable label used in logs and analytics events
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::FindUsername => "find-username",
            FlowKind::FindPassword => "find-password",
            FlowKind::Signup => "signup",
        }
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phase of a verification session.
///
/// Transitions are owned by the flow service; nothing outside it should
/// assign a step directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Signup only: required agreements must be accepted first
    Agreements,
    /// Member enters identifiers and picks a channel
    Input,
    /// A code has been issued; member enters it against the countdown
    Verification,
    /// Signup only: verification succeeded and the flow ended in place
    Complete,
}

impl Step {
    /// Whether the flow has finished and accepts no further actions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Complete)
    }

    /// Stable label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Agreements => "agreements",
            Step::Input => "input",
            Step::Verification => "verification",
            Step::Complete => "complete",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

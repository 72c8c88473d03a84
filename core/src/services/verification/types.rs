//! Result and event types for the verification flow.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ChannelKind, FlowKind};

/// Payload of a successful verification at the member API.
///
/// The API omits the token field in some legacy responses, so it stays
/// optional here and the flow treats a missing token as its own failure
/// case rather than a success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VerifiedCode {
    /// One time token identifying the verified member
    pub result_token: Option<String>,
}

impl VerifiedCode {
    pub fn with_token<S: Into<String>>(token: S) -> Self {
        Self {
            result_token: Some(token.into()),
        }
    }
}

/// Outcome of [`request_code`](super::VerificationFlow::request_code)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Code issued; the flow is now on the verification step
    Issued,
    /// Stopped locally or rejected by the API; session state carries the
    /// message
    Rejected,
    /// Ignored because another call was already in flight
    InFlight,
}

/// Outcome of [`verify_code`](super::VerificationFlow::verify_code)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code accepted; token stored and the flow finished
    Verified,
    /// Stopped before reaching the API: empty code, expired window or
    /// exhausted attempts
    BlockedLocally,
    /// The API rejected the code; one attempt was consumed
    Failed,
    /// The API reported success but returned no token
    TokenMissing,
    /// Ignored because another call was already in flight
    InFlight,
}

/// Analytics events emitted by the flows.
///
/// Contact values never appear here; events carry only the flow and
/// channel kinds plus counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// A code was issued. `resend` is true when the member already was on
    /// the verification step.
    CodeRequested {
        flow: FlowKind,
        channel: ChannelKind,
        resend: bool,
    },
    /// A code request was turned down by the API
    CodeRequestFailed {
        flow: FlowKind,
        channel: ChannelKind,
    },
    /// The entered code was accepted
    VerificationSucceeded {
        flow: FlowKind,
        channel: ChannelKind,
    },
    /// The entered code was rejected. `failures` is the total after this
    /// attempt.
    VerificationFailed {
        flow: FlowKind,
        channel: ChannelKind,
        failures: u32,
    },
    /// The last allowed attempt failed
    AttemptsExhausted {
        flow: FlowKind,
        channel: ChannelKind,
    },
    /// The member switched delivery channel
    ChannelSwitched {
        flow: FlowKind,
        channel: ChannelKind,
    },
    /// A flow reached its terminal state
    FlowCompleted { flow: FlowKind },
}

impl FlowEvent {
    /// Stable event name for logging and downstream sinks
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::CodeRequested { .. } => "code_requested",
            FlowEvent::CodeRequestFailed { .. } => "code_request_failed",
            FlowEvent::VerificationSucceeded { .. } => "verification_succeeded",
            FlowEvent::VerificationFailed { .. } => "verification_failed",
            FlowEvent::AttemptsExhausted { .. } => "attempts_exhausted",
            FlowEvent::ChannelSwitched { .. } => "channel_switched",
            FlowEvent::FlowCompleted { .. } => "flow_completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verified_code_token_helpers() {
        let verified = VerifiedCode::with_token("abc123");
        assert_eq!(verified.result_token.as_deref(), Some("abc123"));
        assert_eq!(VerifiedCode::default().result_token, None);
    }

    #[test]
    fn test_event_names_are_stable() {
        let event = FlowEvent::VerificationFailed {
            flow: FlowKind::FindPassword,
            channel: ChannelKind::Sms,
            failures: 2,
        };
        assert_eq!(event.name(), "verification_failed");
        assert_eq!(
            FlowEvent::FlowCompleted {
                flow: FlowKind::Signup
            }
            .name(),
            "flow_completed"
        );
    }
}

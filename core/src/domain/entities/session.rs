//! Verification session entity.
//!
//! One session is created per page visit and carries everything the flow
//! accumulates: identifiers, the chosen channel, entered code, agreement
//! state and surfaced errors. The countdown and retry guard live in the
//! flow service because they are not plain data; the session stays
//! serializable for snapshots and logging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{AgreementSet, Channel, ChannelKind, FlowKind, Step};

/// State of one verification flow visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Stable id for correlating log lines of one visit
    pub id: Uuid,
    /// Which flow this session runs
    pub flow: FlowKind,
    /// Current phase of the flow
    pub step: Step,
    /// Member entered login id
    pub login_id: String,
    /// Selected delivery channel and its contact value
    pub channel: Channel,
    /// Member entered verification code
    pub code: String,
    /// Signup agreement checkboxes
    pub agreements: AgreementSet,
    /// Inline error shown next to the active field, if any
    pub error_message: Option<String>,
    /// Alert waiting to be shown modally; popped with [`take_alert`](Self::take_alert)
    pub pending_alert: Option<String>,
    /// True while a member API call is in flight
    pub loading: bool,
    /// Token returned by a successful verification
    pub result_token: Option<String>,
    /// When the current code was issued
    pub code_issued_at: Option<DateTime<Utc>>,
}

impl VerificationSession {
    /// Create a fresh session for the given flow
    pub fn new(flow: FlowKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            flow,
            step: flow.initial_step(),
            login_id: String::new(),
            channel: Channel::default(),
            code: String::new(),
            agreements: AgreementSet::new(),
            error_message: None,
            pending_alert: None,
            loading: false,
            result_token: None,
            code_issued_at: None,
        }
    }

    /// Return the session to its initial state, keeping id and flow.
    ///
    /// Used when the whole flow restarts.
    pub fn reset(&mut self) {
        let id = self.id;
        let flow = self.flow;
        *self = Self::new(flow);
        self.id = id;
    }

    /// Reset for a channel switch.
    ///
    /// Everything tied to the previous channel goes: contact value, code,
    /// errors, token. The login id survives because it belongs to the
    /// member, not the channel, and confirmed signup agreements stay
    /// confirmed.
    pub fn reset_for_channel(&mut self, kind: ChannelKind) {
        self.channel = Channel::empty(kind);
        self.code.clear();
        self.error_message = None;
        self.pending_alert = None;
        self.result_token = None;
        self.code_issued_at = None;
        self.loading = false;
        if self.step != Step::Agreements {
            self.step = Step::Input;
        }
    }

    /// Pop the pending alert, if any.
    ///
    /// The embedder calls this after every flow operation and presents the
    /// returned text modally. Popping keeps a re-rendered view from
    /// showing the same alert twice.
    pub fn take_alert(&mut self) -> Option<String> {
        self.pending_alert.take()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Kind of the currently selected channel
    pub fn channel_kind(&self) -> ChannelKind {
        self.channel.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_on_flow_initial_step() {
        let session = VerificationSession::new(FlowKind::FindPassword);
        assert_eq!(session.step, Step::Input);
        assert_eq!(session.channel_kind(), ChannelKind::Sms);
        assert!(session.login_id.is_empty());
        assert!(!session.loading);

        let signup = VerificationSession::new(FlowKind::Signup);
        assert_eq!(signup.step, Step::Agreements);
    }

    #[test]
    fn test_reset_returns_to_initial_state_keeping_id() {
        let mut session = VerificationSession::new(FlowKind::FindUsername);
        let id = session.id;
        session.login_id = "hong123".to_string();
        session.channel.set_contact("01012345678");
        session.step = Step::Verification;
        session.code = "123456".to_string();
        session.error_message = Some("err".to_string());

        session.reset();

        assert_eq!(session.id, id);
        assert_eq!(session.flow, FlowKind::FindUsername);
        assert_eq!(session.step, Step::Input);
        assert!(session.login_id.is_empty());
        assert!(session.channel.is_empty());
        assert!(session.code.is_empty());
        assert!(session.error_message.is_none());
    }

    #[test]
    fn test_channel_switch_clears_channel_state_keeps_login_id() {
        let mut session = VerificationSession::new(FlowKind::FindPassword);
        session.login_id = "hong123".to_string();
        session.channel.set_contact("01012345678");
        session.step = Step::Verification;
        session.code = "000111".to_string();
        session.error_message = Some("인증번호가 일치하지 않습니다.".to_string());
        session.result_token = Some("tok".to_string());

        session.reset_for_channel(ChannelKind::Email);

        assert_eq!(session.login_id, "hong123");
        assert_eq!(session.channel_kind(), ChannelKind::Email);
        assert!(session.channel.is_empty());
        assert_eq!(session.step, Step::Input);
        assert!(session.code.is_empty());
        assert!(session.error_message.is_none());
        assert!(session.result_token.is_none());
    }

    #[test]
    fn test_channel_switch_on_agreements_step_stays_there() {
        let mut session = VerificationSession::new(FlowKind::Signup);
        session.reset_for_channel(ChannelKind::Email);
        assert_eq!(session.step, Step::Agreements);
    }

    #[test]
    fn test_take_alert_pops_once() {
        let mut session = VerificationSession::new(FlowKind::FindUsername);
        session.pending_alert = Some("존재하지 않는 회원입니다.".to_string());

        assert_eq!(
            session.take_alert().as_deref(),
            Some("존재하지 않는 회원입니다.")
        );
        assert!(session.take_alert().is_none());
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut session = VerificationSession::new(FlowKind::Signup);
        session.login_id = "hong123".to_string();
        session.code_issued_at = Some(Utc::now());

        let json = serde_json::to_string(&session).unwrap();
        let back: VerificationSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, session.id);
        assert_eq!(back.login_id, "hong123");
        assert_eq!(back.step, Step::Agreements);
    }
}

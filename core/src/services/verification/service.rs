//! Verification flow orchestrator.

use std::sync::Arc;

use chrono::Utc;
use sodam_shared::types::Language;
use sodam_shared::utils::{phone, validation};
use tracing::{debug, info, warn};

use crate::domain::entities::VerificationSession;
use crate::domain::value_objects::{AgreementKind, Channel, ChannelKind, FlowKind, Step};
use crate::errors::{GatewayError, ValidationError};
use crate::services::verification::config::FlowConfig;
use crate::services::verification::countdown::Countdown;
use crate::services::verification::messages;
use crate::services::verification::retry::RetryGuard;
use crate::services::verification::traits::{Analytics, Navigator, VerificationGateway};
use crate::services::verification::types::{FlowEvent, RequestOutcome, VerifiedCode, VerifyOutcome};

/// Drives one verification flow from input to its terminal state.
///
/// The embedder renders from the accessors, forwards field edits to the
/// setters and calls [`request_code`](Self::request_code) and
/// [`verify_code`](Self::verify_code) when the member submits. Both the
/// primary button's enabled state and Enter key submission are expected
/// to go through [`can_request_code`](Self::can_request_code) and
/// [`can_verify_code`](Self::can_verify_code) so the two entry points can
/// never disagree.
///
/// All outcomes land in session state; the returned outcome enums exist
/// so callers can react without diffing the session.
pub struct VerificationFlow<G, A, N>
where
    G: VerificationGateway,
    A: Analytics,
    N: Navigator,
{
    gateway: Arc<G>,
    analytics: Arc<A>,
    navigator: Arc<N>,
    config: FlowConfig,
    session: VerificationSession,
    countdown: Countdown,
    retry: RetryGuard,
}

impl<G, A, N> VerificationFlow<G, A, N>
where
    G: VerificationGateway,
    A: Analytics,
    N: Navigator,
{
    /// Create a flow of the given kind with its collaborators.
    ///
    /// The session starts on the flow's initial step with the SMS channel
    /// selected and nothing entered.
    pub fn new(
        flow: FlowKind,
        gateway: Arc<G>,
        analytics: Arc<A>,
        navigator: Arc<N>,
        config: FlowConfig,
    ) -> Self {
        let retry = RetryGuard::new(config.max_attempts);
        let session = VerificationSession::new(flow);
        debug!(
            session_id = %session.id,
            flow = %flow,
            "verification flow created"
        );
        Self {
            gateway,
            analytics,
            navigator,
            config,
            session,
            countdown: Countdown::new(),
            retry,
        }
    }

    // --- read side -----------------------------------------------------

    pub fn session(&self) -> &VerificationSession {
        &self.session
    }

    pub fn flow(&self) -> FlowKind {
        self.session.flow
    }

    pub fn step(&self) -> Step {
        self.session.step
    }

    pub fn channel_kind(&self) -> ChannelKind {
        self.session.channel_kind()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.session.error_message.as_deref()
    }

    pub fn result_token(&self) -> Option<&str> {
        self.session.result_token.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.session.loading
    }

    /// Seconds left in the code validity window
    pub fn remaining_seconds(&self) -> u32 {
        self.countdown.remaining_seconds()
    }

    /// Whether the validity window is still open
    pub fn timer_active(&self) -> bool {
        self.countdown.is_active()
    }

    pub fn failure_count(&self) -> u32 {
        self.retry.failures()
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.retry.remaining()
    }

    /// Pop the alert raised by the last operation, if any
    pub fn take_alert(&mut self) -> Option<String> {
        self.session.take_alert()
    }

    /// Whether the request (or resend) button should be enabled.
    ///
    /// Pure function of current state: required fields non-empty, no call
    /// in flight, agreements step passed. Format problems are reported on
    /// submit, not here.
    pub fn can_request_code(&self) -> bool {
        !self.session.loading
            && !self.session.step.is_terminal()
            && self.session.step != Step::Agreements
            && validation::not_empty(&self.session.login_id)
            && !self.session.channel.is_empty()
    }

    /// Whether the verify button should be enabled.
    ///
    /// Requires an open validity window and remaining attempts on top of
    /// a non-empty code.
    pub fn can_verify_code(&self) -> bool {
        !self.session.loading
            && self.session.step == Step::Verification
            && validation::not_empty(&self.session.code)
            && self.countdown.is_active()
            && !self.retry.is_exhausted()
    }

    // --- field edits ---------------------------------------------------

    pub fn set_login_id(&mut self, value: &str) {
        self.session.login_id = value.trim().to_string();
        self.session.clear_error();
    }

    pub fn set_contact(&mut self, value: &str) {
        self.session.channel.set_contact(value);
        self.session.clear_error();
    }

    pub fn set_code(&mut self, value: &str) {
        self.session.code = value.trim().to_string();
        self.session.clear_error();
    }

    pub fn set_agreement(&mut self, kind: AgreementKind, accepted: bool) {
        self.session.agreements.set(kind, accepted);
        self.session.clear_error();
    }

    pub fn accept_all_agreements(&mut self) {
        self.session.agreements.accept_all();
        self.session.clear_error();
    }

    // --- transitions ---------------------------------------------------

    /// Leave the agreements step once the required agreements are
    /// accepted. Returns whether the step advanced.
    pub fn confirm_agreements(&mut self) -> bool {
        if self.session.step != Step::Agreements {
            return false;
        }
        if !self.session.agreements.required_accepted() {
            self.session.error_message = Some(
                messages::for_validation(&ValidationError::AgreementsRequired, self.language())
                    .to_string(),
            );
            return false;
        }
        self.session.clear_error();
        self.session.step = Step::Input;
        debug!(session_id = %self.session.id, "agreements confirmed");
        true
    }

    /// Switch the delivery channel.
    ///
    /// Always performs a full reset of channel bound state: contact,
    /// code, errors, countdown and retry guard. Repeating the switch is
    /// harmless. The login id survives.
    pub fn switch_channel(&mut self, kind: ChannelKind) {
        self.countdown.clear();
        self.retry.reset();
        self.session.reset_for_channel(kind);
        self.analytics.track(&FlowEvent::ChannelSwitched {
            flow: self.session.flow,
            channel: kind,
        });
        debug!(
            session_id = %self.session.id,
            channel = %kind,
            "channel switched, flow state reset"
        );
    }

    /// Restart the flow from scratch, as if the page was reopened
    pub fn reset(&mut self) {
        self.countdown.clear();
        self.retry.reset();
        self.session.reset();
        debug!(session_id = %self.session.id, "flow reset");
    }

    /// Ask the member API to issue and deliver a verification code.
    ///
    /// Also used for resends: a success while already on the
    /// verification step refreshes the countdown, retry guard and code
    /// field without leaving the step.
    ///
    /// # Process
    /// 1. Ignore the call if another one is in flight
    /// 2. Validate login id and contact locally; on failure set an
    ///    inline error and stop without calling the API
    /// 3. Call the API; on success enter (or refresh) the verification
    ///    step with a fresh countdown and retry guard
    /// 4. On failure surface the rejection as inline error and alert,
    ///    without changing step
    pub async fn request_code(&mut self) -> RequestOutcome {
        if self.session.loading {
            debug!(session_id = %self.session.id, "request ignored, call in flight");
            return RequestOutcome::InFlight;
        }
        if self.session.step.is_terminal() || self.session.step == Step::Agreements {
            return RequestOutcome::Rejected;
        }
        if let Err(error) = self.validate_identifiers() {
            debug!(
                session_id = %self.session.id,
                error = %error,
                "code request blocked by local validation"
            );
            self.session.error_message =
                Some(messages::for_validation(&error, self.language()).to_string());
            return RequestOutcome::Rejected;
        }

        let resend = self.session.step == Step::Verification;
        self.session.loading = true;
        self.session.clear_error();
        let result = self
            .gateway
            .request_code(&self.session.login_id, &self.session.channel)
            .await;
        self.session.loading = false;

        match result {
            Ok(()) => {
                self.enter_verification();
                self.analytics.track(&FlowEvent::CodeRequested {
                    flow: self.session.flow,
                    channel: self.session.channel_kind(),
                    resend,
                });
                info!(
                    session_id = %self.session.id,
                    flow = %self.session.flow,
                    channel = %self.session.channel_kind(),
                    contact = %self.session.channel.masked_contact(),
                    resend,
                    "verification code issued"
                );
                RequestOutcome::Issued
            }
            Err(error) => {
                let message = self.describe_request_failure(&error);
                self.session.error_message = Some(message.clone());
                self.session.pending_alert = Some(message);
                self.analytics.track(&FlowEvent::CodeRequestFailed {
                    flow: self.session.flow,
                    channel: self.session.channel_kind(),
                });
                warn!(
                    session_id = %self.session.id,
                    flow = %self.session.flow,
                    channel = %self.session.channel_kind(),
                    contact = %self.session.channel.masked_contact(),
                    error = %error,
                    "code request failed"
                );
                RequestOutcome::Rejected
            }
        }
    }

    /// Submit the entered code for verification.
    ///
    /// Local guards run in a fixed order before the API is called: empty
    /// code, then expired window, then exhausted attempts. A blocked call
    /// never consumes an attempt; a rejected API call always does.
    ///
    /// On success the token is stored, the countdown stops at its last
    /// value and the flow finishes: find flows navigate to their result
    /// page with the token in the query string, signup completes in
    /// place.
    pub async fn verify_code(&mut self) -> VerifyOutcome {
        if self.session.loading {
            debug!(session_id = %self.session.id, "verify ignored, call in flight");
            return VerifyOutcome::InFlight;
        }
        if self.session.step != Step::Verification {
            return VerifyOutcome::BlockedLocally;
        }
        if !validation::not_empty(&self.session.code) {
            self.session.error_message =
                Some(messages::code_required(self.language()).to_string());
            return VerifyOutcome::BlockedLocally;
        }
        if !self.countdown.is_active() {
            self.session.error_message =
                Some(messages::code_expired(self.language()).to_string());
            return VerifyOutcome::BlockedLocally;
        }
        if self.retry.is_exhausted() {
            self.session.error_message =
                Some(messages::attempts_exhausted(self.language()).to_string());
            return VerifyOutcome::BlockedLocally;
        }

        self.session.loading = true;
        self.session.clear_error();
        let code = self.session.code.clone();
        let result = self
            .gateway
            .verify_code(&self.session.login_id, &self.session.channel, &code)
            .await;
        self.session.loading = false;

        match result {
            Ok(VerifiedCode {
                result_token: Some(token),
            }) => {
                self.finish_success(token);
                VerifyOutcome::Verified
            }
            Ok(VerifiedCode { result_token: None }) => {
                // success without a token cannot move the member forward,
                // but it is not a wrong code either, so no attempt is
                // consumed
                warn!(
                    session_id = %self.session.id,
                    flow = %self.session.flow,
                    "verification succeeded without a result token"
                );
                self.session.error_message =
                    Some(messages::token_missing(self.language()).to_string());
                VerifyOutcome::TokenMissing
            }
            Err(error) => {
                let exhausted = self.retry.record_failure();
                self.session.code.clear();
                self.session.error_message = Some(if exhausted {
                    messages::attempts_exhausted(self.language()).to_string()
                } else {
                    self.describe_verify_failure(&error)
                });
                self.analytics.track(&FlowEvent::VerificationFailed {
                    flow: self.session.flow,
                    channel: self.session.channel_kind(),
                    failures: self.retry.failures(),
                });
                if exhausted {
                    self.analytics.track(&FlowEvent::AttemptsExhausted {
                        flow: self.session.flow,
                        channel: self.session.channel_kind(),
                    });
                }
                warn!(
                    session_id = %self.session.id,
                    flow = %self.session.flow,
                    failures = self.retry.failures(),
                    remaining = self.retry.remaining(),
                    error = %error,
                    "verification attempt failed"
                );
                VerifyOutcome::Failed
            }
        }
    }

    // --- internals -----------------------------------------------------

    #[cfg(test)]
    pub(crate) fn set_loading_for_tests(&mut self, loading: bool) {
        self.session.loading = loading;
    }

    fn language(&self) -> Language {
        self.config.language
    }

    /// Enter or refresh the verification step after a code was issued
    fn enter_verification(&mut self) {
        self.session.step = Step::Verification;
        self.session.code.clear();
        self.session.clear_error();
        self.session.pending_alert = None;
        self.session.result_token = None;
        self.session.code_issued_at = Some(Utc::now());
        self.retry.reset();
        self.countdown.start(self.config.code_validity_seconds);
    }

    fn validate_identifiers(&self) -> Result<(), ValidationError> {
        if !validation::not_empty(&self.session.login_id) {
            return Err(ValidationError::LoginIdRequired);
        }
        match &self.session.channel {
            Channel::Sms { phone: number } => {
                if !validation::not_empty(number) {
                    return Err(ValidationError::PhoneRequired);
                }
                let normalized = phone::normalize_phone_number(number);
                if !self.config.phone_pattern.is_match(&normalized) {
                    return Err(ValidationError::InvalidPhoneFormat {
                        masked: phone::mask_phone_number(number),
                    });
                }
            }
            Channel::Email { email } => {
                if !validation::not_empty(email) {
                    return Err(ValidationError::EmailRequired);
                }
                if !self.config.email_pattern.is_match(email.trim()) {
                    return Err(ValidationError::InvalidEmailFormat);
                }
            }
        }
        Ok(())
    }

    fn finish_success(&mut self, token: String) {
        self.countdown.stop();
        self.retry.reset();
        self.session.result_token = Some(token.clone());
        self.session.clear_error();
        self.analytics.track(&FlowEvent::VerificationSucceeded {
            flow: self.session.flow,
            channel: self.session.channel_kind(),
        });
        info!(
            session_id = %self.session.id,
            flow = %self.session.flow,
            channel = %self.session.channel_kind(),
            "verification succeeded"
        );
        match self.session.flow.destination() {
            Some(path) => {
                self.navigator.navigate(&navigation_target(path, &token));
            }
            None => {
                self.session.step = Step::Complete;
            }
        }
        self.analytics.track(&FlowEvent::FlowCompleted {
            flow: self.session.flow,
        });
    }

    /// Message for a failed code request.
    ///
    /// A 404 gets the fixed "no member" message, other rejections show
    /// the server supplied text when present, everything else falls back
    /// to a generic retry message.
    fn describe_request_failure(&self, error: &GatewayError) -> String {
        match error {
            GatewayError::MemberNotFound => {
                messages::member_not_found(self.language()).to_string()
            }
            GatewayError::Rejected {
                message: Some(text),
                ..
            } => text.clone(),
            GatewayError::Server { .. } => messages::server_error(self.language()).to_string(),
            _ => messages::request_failed(self.language()).to_string(),
        }
    }

    /// Message for a rejected verification attempt.
    ///
    /// The server text ("wrong code", "already used" and so on) is shown
    /// verbatim when the API provides one.
    fn describe_verify_failure(&self, error: &GatewayError) -> String {
        match error {
            GatewayError::Rejected {
                message: Some(text),
                ..
            } => text.clone(),
            GatewayError::Server { .. } => messages::server_error(self.language()).to_string(),
            _ => messages::request_failed(self.language()).to_string(),
        }
    }
}

/// Build a navigation target with the token as an encoded query parameter
fn navigation_target(path: &str, token: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("token", token)
        .finish();
    format!("{}?{}", path, query)
}

//! Password reset flow service.

use std::sync::Arc;

use sodam_shared::types::Language;
use sodam_shared::utils::validation;
use tracing::{info, warn};

use crate::errors::GatewayError;
use crate::services::password_reset::traits::PasswordGateway;
use crate::services::verification::messages;
use crate::services::verification::traits::Navigator;

/// Route shown after a successful reset
pub const LOGIN_ROUTE: &str = "/account/login";

/// Outcome of [`submit`](PasswordResetFlow::submit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Password changed; the member was sent to the login page
    Completed,
    /// Stopped locally or rejected by the API; `error_message` says why
    Rejected,
    /// Ignored because another call was already in flight
    InFlight,
}

/// Extract the result token from a page query string.
///
/// Accepts the query part only (`token=abc123&lang=ko`), decoded the same
/// way the verification flow encoded it.
pub fn token_from_query(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

/// Drives the set-new-password page of the find-password flow.
pub struct PasswordResetFlow<G, N>
where
    G: PasswordGateway,
    N: Navigator,
{
    gateway: Arc<G>,
    navigator: Arc<N>,
    language: Language,
    token: String,
    new_password: String,
    confirm_password: String,
    error_message: Option<String>,
    loading: bool,
    completed: bool,
}

impl<G, N> PasswordResetFlow<G, N>
where
    G: PasswordGateway,
    N: Navigator,
{
    /// Create the flow for a token taken from the page URL
    pub fn new<S: Into<String>>(
        token: S,
        gateway: Arc<G>,
        navigator: Arc<N>,
        language: Language,
    ) -> Self {
        Self {
            gateway,
            navigator,
            language,
            token: token.into(),
            new_password: String::new(),
            confirm_password: String::new(),
            error_message: None,
            loading: false,
            completed: false,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn set_new_password(&mut self, value: &str) {
        self.new_password = value.to_string();
        self.error_message = None;
    }

    pub fn set_confirm_password(&mut self, value: &str) {
        self.confirm_password = value.to_string();
        self.error_message = None;
    }

    /// Whether the submit button should be enabled
    pub fn can_submit(&self) -> bool {
        !self.loading
            && !self.completed
            && validation::not_empty(&self.new_password)
            && validation::not_empty(&self.confirm_password)
    }

    /// Validate locally, then commit the new password at the member API.
    ///
    /// On success the flow is done and the member is sent to the login
    /// page. A server error maps to the generic server-error message;
    /// rejection text from the API (expired or used link) shows verbatim.
    pub async fn submit(&mut self) -> ResetOutcome {
        if self.loading {
            return ResetOutcome::InFlight;
        }
        if self.completed {
            return ResetOutcome::Rejected;
        }
        if !validation::not_empty(&self.token) {
            self.error_message =
                Some(messages::invalid_reset_link(self.language).to_string());
            return ResetOutcome::Rejected;
        }
        if !validation::is_valid_password(&self.new_password) {
            self.error_message = Some(messages::password_format(self.language).to_string());
            return ResetOutcome::Rejected;
        }
        if self.new_password != self.confirm_password {
            self.error_message = Some(messages::password_mismatch(self.language).to_string());
            return ResetOutcome::Rejected;
        }

        self.loading = true;
        self.error_message = None;
        let result = self
            .gateway
            .reset_password(&self.token, &self.new_password)
            .await;
        self.loading = false;

        match result {
            Ok(()) => {
                self.completed = true;
                info!("password reset completed");
                self.navigator.navigate(LOGIN_ROUTE);
                ResetOutcome::Completed
            }
            Err(error) => {
                self.error_message = Some(self.describe_failure(&error));
                warn!(error = %error, "password reset failed");
                ResetOutcome::Rejected
            }
        }
    }

    fn describe_failure(&self, error: &GatewayError) -> String {
        match error {
            GatewayError::Rejected {
                message: Some(text),
                ..
            } => text.clone(),
            GatewayError::MemberNotFound => {
                messages::invalid_reset_link(self.language).to_string()
            }
            GatewayError::Server { .. } => messages::server_error(self.language).to_string(),
            _ => messages::request_failed(self.language).to_string(),
        }
    }
}

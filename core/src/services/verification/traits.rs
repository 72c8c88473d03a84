//! Ports the verification flow drives.
//!
//! `sodam_client` provides the production implementations; tests swap in
//! hand rolled mocks.

use async_trait::async_trait;

use crate::domain::value_objects::Channel;
use crate::errors::GatewayError;
use crate::services::verification::types::{FlowEvent, VerifiedCode};

/// Outbound calls to the member API verification endpoints
#[async_trait]
pub trait VerificationGateway: Send + Sync {
    /// Ask the member API to issue and deliver a verification code.
    ///
    /// # Arguments
    /// * `login_id` - Member entered login id
    /// * `channel` - Delivery channel with its contact value
    ///
    /// # Returns
    /// * `Ok(())` - Code issued and on its way
    /// * `Err(GatewayError)` - No member matched, the API rejected the
    ///   request, or the call failed
    async fn request_code(&self, login_id: &str, channel: &Channel)
        -> Result<(), GatewayError>;

    /// Submit an entered code for verification.
    ///
    /// # Arguments
    /// * `login_id` - Member entered login id
    /// * `channel` - Channel the code was delivered on
    /// * `code` - Member entered code
    ///
    /// # Returns
    /// * `Ok(VerifiedCode)` - Code accepted; carries the result token
    /// * `Err(GatewayError)` - Wrong code, expired code or a failed call
    async fn verify_code(
        &self,
        login_id: &str,
        channel: &Channel,
        code: &str,
    ) -> Result<VerifiedCode, GatewayError>;
}

/// Sink for flow analytics events.
///
/// Tracking must never fail the flow, so the method returns nothing.
pub trait Analytics: Send + Sync {
    fn track(&self, event: &FlowEvent);
}

/// Analytics sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn track(&self, _event: &FlowEvent) {}
}

/// Navigation issued when a flow leaves its page.
///
/// Targets are path and query strings such as
/// `/account/reset-password?token=abc123`.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);
}

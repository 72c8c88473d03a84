//! Verification step flow.
//!
//! This module contains everything behind the "request a code, then verify
//! it" part of the recovery and signup pages:
//!
//! - [`VerificationFlow`]: the orchestrator embedders drive
//! - [`Countdown`]: code validity timer with a background tick task
//! - [`RetryGuard`]: failed attempt counter with a hard maximum
//! - [`FlowConfig`]: timing, attempt and input format settings
//! - [`traits`]: ports to the member API, analytics and navigation
//! - [`messages`]: localized user facing message catalog

pub mod config;
pub mod countdown;
pub mod messages;
pub mod retry;
pub mod service;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::FlowConfig;
pub use countdown::Countdown;
pub use retry::RetryGuard;
pub use service::VerificationFlow;
pub use traits::{Analytics, Navigator, NoopAnalytics, VerificationGateway};
pub use types::{FlowEvent, RequestOutcome, VerifiedCode, VerifyOutcome};

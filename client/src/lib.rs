//! # Sodam Client
//!
//! Production implementations of the outbound ports declared in
//! `sodam_core`:
//!
//! - [`api::MemberApiGateway`]: verification and password endpoints of the
//!   member API over HTTP
//! - [`analytics::TracingAnalytics`]: flow events as structured log lines
//! - [`api::MockMemberGateway`] (feature `mock-services`): in-memory
//!   gateway for demos and offline development
//!
//! The flows in `sodam_core` stay transport free; everything HTTP lives
//! here.

pub mod analytics;
pub mod api;

use thiserror::Error;

/// Errors raised while setting up client adapters
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP client construction or low level failure
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid adapter configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

pub use analytics::TracingAnalytics;
pub use api::MemberApiGateway;

#[cfg(feature = "mock-services")]
pub use api::MockMemberGateway;

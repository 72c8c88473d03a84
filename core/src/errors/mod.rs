//! Error types for the core flow logic.
//!
//! `FlowError` is the top level error for flow operations. The variants it
//! wraps live in [`types`] and cover input validation and member API
//! failures. User facing text is not stored here; the flow services pick
//! localized messages from the message catalog when they surface an error
//! into session state.

pub mod types;

pub use types::{GatewayError, ValidationError};

use thiserror::Error;

/// Top level error type for flow operations
#[derive(Error, Debug)]
pub enum FlowError {
    /// Input validation failures
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Member API failures
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Unexpected internal failures
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Convenience result alias for flow operations
pub type FlowResult<T> = Result<T, FlowError>;

impl FlowError {
    /// Create an internal error from any displayable value
    pub fn internal<S: Into<String>>(message: S) -> Self {
        FlowError::Internal {
            message: message.into(),
        }
    }
}

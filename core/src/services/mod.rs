//! Business logic services.
//!
//! Each service drives one flow of the member portal. Services orchestrate
//! domain state and call the member API through the ports declared in
//! their `traits` modules.

pub mod password_reset;
pub mod verification;

// Re-export service types
pub use password_reset::{PasswordResetFlow, ResetOutcome};
pub use verification::{
    Countdown, FlowConfig, FlowEvent, RequestOutcome, RetryGuard, VerificationFlow, VerifyOutcome,
};

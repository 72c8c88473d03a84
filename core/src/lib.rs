//! # Sodam Core
//!
//! Core business logic for the Sodam member portal account recovery and
//! signup verification flows.
//!
//! This crate contains:
//! - Domain entities and value objects (session, channel, step, agreements)
//! - Flow services (verification step flow, password reset)
//! - Error types and handling
//!
//! It deliberately knows nothing about HTTP or rendering. Outbound calls to
//! the member API and navigation are expressed as traits and implemented by
//! the `sodam_client` crate.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types
pub use domain::*;
pub use errors::*;
pub use services::*;

//! Shared utilities and common types for the Sodam member portal crates
//!
//! This crate provides common functionality used across the portal modules:
//! - Configuration types (environment, member-API endpoint, logging)
//! - Common type definitions (language, backend response envelope)
//! - Utility functions (phone/email/login-id validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{Environment, LoggingConfig, MemberApiConfig, PortalConfig};
pub use types::{ApiEnvelope, Language};
pub use utils::{phone, validation};

//! Type definitions shared across the portal crates
//!
//! - `language` - Internationalization and language types
//! - `response` - Member-API response envelope

pub mod language;
pub mod response;

// Re-export commonly used types at module level
pub use language::Language;
pub use response::ApiEnvelope;

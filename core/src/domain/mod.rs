//! Domain layer containing entities and value objects.
//!
//! This module holds the state carried through a verification flow. It has
//! no async code and no external calls; the services layer drives it.

pub mod entities;
pub mod value_objects;

// Re-export domain types
pub use entities::*;
pub use value_objects::*;

//! Value objects for the verification flows.

pub mod agreement;
pub mod channel;
pub mod step;

pub use agreement::{AgreementKind, AgreementSet};
pub use channel::{Channel, ChannelKind};
pub use step::{FlowKind, Step};

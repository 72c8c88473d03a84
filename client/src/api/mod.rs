//! Member API adapters.

pub mod gateway;

#[cfg(feature = "mock-services")]
pub mod mock;

pub use gateway::MemberApiGateway;

#[cfg(feature = "mock-services")]
pub use mock::MockMemberGateway;

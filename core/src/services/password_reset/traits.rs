//! Port to the member API password endpoint.

use async_trait::async_trait;

use crate::errors::GatewayError;

/// Outbound call that commits a new password
#[async_trait]
pub trait PasswordGateway: Send + Sync {
    /// Exchange a verification result token and a new password.
    ///
    /// # Arguments
    /// * `token` - Result token from the find-password verification
    /// * `new_password` - Password the member chose
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), GatewayError>;
}

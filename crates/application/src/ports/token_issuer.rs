//! Token issuer port

use async_trait::async_trait;

use super::GatewayError;

/// Exchanges a refresh token for a new access token.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Returns a fresh access token.
    ///
    /// # Errors
    /// Returns `GatewayError::Unauthorized` when the refresh token is rejected.
    async fn refresh(&self, refresh_token: &str) -> Result<String, GatewayError>;
}

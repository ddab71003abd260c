//! `POST /auth/refresh` as a [`TokenIssuer`].

use async_trait::async_trait;
use easytest_application::{GatewayError, TokenIssuer};
use easytest_domain::{ClientConfig, RefreshResponse};
use reqwest::{Client, StatusCode};

use super::envelope::{read_envelope, required, transport_error};

/// Exchanges the refresh token at the platform's refresh endpoint.
///
/// Calls made here never go through the 401 retry path.
#[derive(Debug, Clone)]
pub struct RefreshEndpoint {
    client: Client,
    api_root: String,
}

impl RefreshEndpoint {
    /// Creates the adapter for a configured platform.
    #[must_use]
    pub fn new(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_root: config.api_root(),
        }
    }
}

#[async_trait]
impl TokenIssuer for RefreshEndpoint {
    async fn refresh(&self, refresh_token: &str) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(format!("{}/auth/refresh", self.api_root))
            .bearer_auth(refresh_token)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthorized);
        }
        let data: Option<RefreshResponse> = read_envelope(response).await?;
        Ok(required(data, "access token")?.access_token)
    }
}

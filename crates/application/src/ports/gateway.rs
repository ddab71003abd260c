//! Execution gateway port

use async_trait::async_trait;
use easytest_domain::{ExecutePayload, ExecutionResult};

/// Failures talking to the platform backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The call exceeded the client timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP or envelope status code.
        status: u16,
        /// Envelope message.
        message: String,
    },

    /// The session is missing or could not be refreshed.
    #[error("not authenticated")]
    Unauthorized,

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Returns true for a 404 answer.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// The backend that performs HTTP calls, scripts and assertions.
#[async_trait]
pub trait ExecutionGateway: Send + Sync {
    /// Executes a composed request.
    ///
    /// # Errors
    /// Returns a `GatewayError` if the call itself fails. A request that ran
    /// but failed on the target side is an `Ok` result with `success: false`.
    async fn execute(&self, payload: &ExecutePayload) -> Result<ExecutionResult, GatewayError>;

    /// Runs a stored test case, optionally in an environment.
    ///
    /// # Errors
    /// Returns a `GatewayError` if the call itself fails.
    async fn run_case(
        &self,
        case_id: u64,
        env_id: Option<u64>,
    ) -> Result<ExecutionResult, GatewayError>;
}

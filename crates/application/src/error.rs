//! Application error types

use easytest_domain::{DomainError, ValidationError};
use thiserror::Error;

use crate::ports::{GatewayError, StorageError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Input was rejected before any network attempt.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A domain rule was violated.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A call to the platform failed.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Local storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

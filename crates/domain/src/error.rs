//! Domain error types

use thiserror::Error;

/// Validation failures raised before any network attempt.
///
/// Composition aborts on the first one; the draft is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A JSON body failed to parse.
    #[error("malformed body: {message}")]
    MalformedBody {
        /// Parser message, including line and column.
        message: String,
    },

    /// The request URL is empty.
    #[error("request URL is required")]
    MissingUrl,

    /// The test case name is empty.
    #[error("test case name is required")]
    MissingName,

    /// The HTTP method is not one of the supported verbs.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The body type discriminator is unknown.
    #[error("unsupported body type: {0}")]
    UnsupportedBodyType(String),
}

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An environment payload has an invalid structure.
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

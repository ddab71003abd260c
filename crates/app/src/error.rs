//! Errors reported by the command-line front end.

use easytest_application::{ApplicationError, GatewayError, StorageError};
use easytest_domain::ValidationError;
use easytest_infrastructure::ConfigError;

/// Anything a command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Workspace operation failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Backend call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Input rejected before any call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Local storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded or saved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing output failed.
    #[error("output failed: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering JSON output failed.
    #[error("output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// No platform data directory and no `--data-dir`.
    #[error("no data directory available, pass --data-dir")]
    NoDataDir,

    /// The command needs a different invocation.
    #[error("{0}")]
    Usage(String),
}

/// Result alias for commands.
pub type CliResult<T> = Result<T, CliError>;

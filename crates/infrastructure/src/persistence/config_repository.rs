//! Client configuration persistence.
//!
//! Stores the configuration in the platform-specific config directory:
//! - Linux/macOS: ~/.config/easytest/config.json
//! - Windows: %APPDATA%/easytest/config.json

use std::path::{Path, PathBuf};

use easytest_domain::ClientConfig;
use tokio::fs;

use crate::serialization::{SerializationError, from_json, to_json_stable};

/// Base URL override.
pub const ENV_BASE_URL: &str = "EASYTEST_BASE_URL";
/// Project id override.
pub const ENV_PROJECT_ID: &str = "EASYTEST_PROJECT_ID";
/// Timeout override, applied to both timeouts.
pub const ENV_TIMEOUT: &str = "EASYTEST_TIMEOUT";
/// Log filter override.
pub const ENV_LOG: &str = "EASYTEST_LOG";

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// An environment override holds an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidOverride {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Repository for the client configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigRepository {
    dir: Option<PathBuf>,
}

impl ConfigRepository {
    /// Uses the platform config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: dirs::config_dir().map(|p| p.join("easytest")),
        }
    }

    /// Uses an explicit directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Returns the path to the config file, if a directory is known.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> {
        self.dir.as_ref().map(|p| p.join("config.json"))
    }

    /// Loads the configuration. Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<ClientConfig, ConfigError> {
        let Some(path) = self.config_path() else {
            return Ok(ClientConfig::default());
        };
        if !fs::try_exists(&path).await? {
            return Ok(ClientConfig::default());
        }
        let content = fs::read_to_string(&path).await?;
        Ok(from_json(&content)?)
    }

    /// Loads the configuration and applies `EASYTEST_*` overrides.
    ///
    /// # Errors
    /// Returns an error if loading fails or an override cannot be parsed.
    pub async fn load_with_env(&self) -> Result<ClientConfig, ConfigError> {
        let mut config = self.load().await?;
        apply_overrides(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Saves the configuration, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error if no directory is known or writing fails.
    pub async fn save(&self, config: &ClientConfig) -> Result<PathBuf, ConfigError> {
        let Some(path) = self.config_path() else {
            return Err(ConfigError::NoConfigDir);
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, to_json_stable(config)?).await?;
        tracing::info!(path = %path.display(), "configuration saved");
        Ok(path)
    }

    /// Directory the repository reads from.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

/// Applies overrides looked up through `lookup`. Blank values are ignored.
///
/// # Errors
/// Returns `InvalidOverride` for a non-numeric project id or timeout.
pub fn apply_overrides(
    config: &mut ClientConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = get(ENV_BASE_URL) {
        config.base_url = base_url;
    }
    if let Some(value) = get(ENV_PROJECT_ID) {
        config.project_id = Some(value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
            name: ENV_PROJECT_ID,
            value: value.clone(),
        })?);
    }
    if let Some(value) = get(ENV_TIMEOUT) {
        let timeout: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
            name: ENV_TIMEOUT,
            value: value.clone(),
        })?;
        config.request_timeout_secs = timeout;
        config.execute_timeout_secs = timeout;
    }
    if let Some(level) = get(ENV_LOG) {
        config.log_level = level;
    }
    Ok(())
}

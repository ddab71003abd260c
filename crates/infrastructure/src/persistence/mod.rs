//! Persistence implementations for file-based storage.

mod config_repository;
mod file_system;
mod key_value_store;

pub use config_repository::{
    ConfigError, ConfigRepository, ENV_BASE_URL, ENV_LOG, ENV_PROJECT_ID, ENV_TIMEOUT,
    apply_overrides,
};
pub use file_system::TokioFileSystem;
pub use key_value_store::FileKeyValueStore;

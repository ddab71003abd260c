//! EasyTest Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the platform HTTP client, the
//! file-backed key/value store and the configuration file.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::{PlatformClient, RefreshEndpoint};
pub use persistence::{
    ConfigError, ConfigRepository, FileKeyValueStore, TokioFileSystem, apply_overrides,
};
pub use serialization::{SerializationError, from_json, to_json_stable};

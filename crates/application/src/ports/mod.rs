//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod collection_repository;
mod environment_repository;
mod file_system;
mod gateway;
mod key_value_store;
mod test_case_repository;
mod token_issuer;

pub use collection_repository::CollectionRepository;
pub use environment_repository::EnvironmentRepository;
pub use file_system::{FileSystem, FileSystemError};
pub use gateway::{ExecutionGateway, GatewayError};
pub use key_value_store::{KeyValueStore, StorageError};
pub use test_case_repository::TestCaseRepository;
pub use token_issuer::TokenIssuer;

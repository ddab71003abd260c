//! EasyTest Application - Request composition, workspace state and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the backend and local storage)
//! - Environment and collection use cases
//! - The request composer and variable substitution
//! - Workspace draft persistence and unsaved-change detection
//! - Authentication session handling with single-flight refresh

pub mod auth;
pub mod composer;
pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;
pub mod workspace;

#[cfg(test)]
mod test_support;

pub use auth::{RefreshCoordinator, SESSION_KEY, SessionStore};
pub use composer::{
    build_body, compose, compose_url, generate_curl, join_base_url, merge_headers, merge_params,
};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    CollectionRepository, EnvironmentRepository, ExecutionGateway, FileSystem, FileSystemError,
    GatewayError, KeyValueStore, StorageError, TestCaseRepository, TokenIssuer,
};
pub use use_cases::{
    DeleteCollection, DeleteEnvironment, GetEnvironment, ListCollections, ListEnvironments,
    ListEnvironmentsOutput, RunCollection, SaveCollection, SaveEnvironment, SetDefaultEnvironment,
};
pub use variable_resolver::{find_unresolved, substitute_variables};
pub use workspace::{
    ChangeTracker, DraftEdit, DraftStore, LoadedCase, SwitchOutcome, UnsavedChoice,
    WorkspacePorts, WorkspaceSession,
};

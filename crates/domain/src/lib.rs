//! EasyTest Domain - Core types for the request composer
//!
//! This crate defines the domain model for the API-test workspace:
//! drafts, environments, composed requests, test cases and collections, and
//! the execution gateway wire shapes. All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod collection;
pub mod envelope;
pub mod environment;
pub mod error;
pub mod execution;
pub mod request;
pub mod settings;
pub mod state;
pub mod test_case;

mod serde_util;

pub use auth::{AuthSession, LoginRequest, LoginResponse, RefreshResponse, UserProfile};
pub use collection::{CaseRunResult, Collection, CollectionInput, CollectionRun};
pub use envelope::ApiEnvelope;
pub use environment::{Environment, EnvironmentInput, HeaderMap, VariableMap, VariableValue};
pub use error::{DomainError, DomainResult, ValidationError};
pub use execution::{
    AssertionSummary, ExecutePayload, ExecutionResult, ResponseSize, ScriptExecution,
    ScriptReport,
};
pub use request::{
    BodyType, ComposedRequest, DraftBaseline, DraftRequest, HttpMethod, KeyValue, RequestBody,
    StoredDraft, StringMap,
};
pub use settings::ClientConfig;
pub use state::SendState;
pub use test_case::{ApiTestCase, CaseQuery, TestCaseInput};

//! Application use cases (business logic orchestration).

pub mod collection;
pub mod environment;

pub use collection::{DeleteCollection, ListCollections, RunCollection, SaveCollection};
pub use environment::{
    DeleteEnvironment, GetEnvironment, ListEnvironments, ListEnvironmentsOutput,
    SaveEnvironment, SetDefaultEnvironment,
};

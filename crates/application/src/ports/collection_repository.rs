//! Collection repository port

use std::sync::Arc;

use async_trait::async_trait;
use easytest_domain::{Collection, CollectionInput, CollectionRun};

use super::GatewayError;

/// Repository trait for test case collections.
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Lists collections, optionally scoped to a project.
    ///
    /// # Errors
    /// Returns an error if the backend call fails.
    async fn list(&self, project_id: Option<u64>) -> Result<Vec<Collection>, GatewayError>;

    /// Creates a collection.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the input.
    async fn create(&self, input: &CollectionInput) -> Result<Collection, GatewayError>;

    /// Renames or redescribes a collection.
    ///
    /// # Errors
    /// Returns a 404 `GatewayError::Status` if it does not exist.
    async fn update(&self, id: u64, input: &CollectionInput) -> Result<Collection, GatewayError>;

    /// Deletes a collection and its cases.
    ///
    /// # Errors
    /// Returns an error if the backend call fails.
    async fn delete(&self, id: u64) -> Result<(), GatewayError>;

    /// Runs every enabled case of a collection.
    ///
    /// With `env_id` all cases run in that environment; without it each case
    /// uses its own.
    ///
    /// # Errors
    /// Returns an error if the collection is missing or empty.
    async fn run(&self, id: u64, env_id: Option<u64>) -> Result<CollectionRun, GatewayError>;
}

#[async_trait]
impl<T: CollectionRepository + ?Sized> CollectionRepository for Arc<T> {
    async fn list(&self, project_id: Option<u64>) -> Result<Vec<Collection>, GatewayError> {
        (**self).list(project_id).await
    }

    async fn create(&self, input: &CollectionInput) -> Result<Collection, GatewayError> {
        (**self).create(input).await
    }

    async fn update(&self, id: u64, input: &CollectionInput) -> Result<Collection, GatewayError> {
        (**self).update(id, input).await
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        (**self).delete(id).await
    }

    async fn run(&self, id: u64, env_id: Option<u64>) -> Result<CollectionRun, GatewayError> {
        (**self).run(id, env_id).await
    }
}

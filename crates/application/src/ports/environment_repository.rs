//! Environment repository port
//!
//! CRUD pass-through to the backend's environment endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use easytest_domain::{Environment, EnvironmentInput};

use super::GatewayError;

/// Repository trait for environments.
#[async_trait]
pub trait EnvironmentRepository: Send + Sync {
    /// Lists environments, optionally scoped to a project.
    ///
    /// # Errors
    /// Returns an error if the backend call fails.
    async fn list(&self, project_id: Option<u64>) -> Result<Vec<Environment>, GatewayError>;

    /// Loads one environment.
    ///
    /// # Errors
    /// Returns a 404 `GatewayError::Status` if it does not exist.
    async fn get(&self, id: u64) -> Result<Environment, GatewayError>;

    /// Creates an environment.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the input.
    async fn create(&self, input: &EnvironmentInput) -> Result<Environment, GatewayError>;

    /// Updates an environment.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the input.
    async fn update(&self, id: u64, input: &EnvironmentInput) -> Result<Environment, GatewayError>;

    /// Deletes an environment.
    ///
    /// # Errors
    /// Returns an error if the backend call fails.
    async fn delete(&self, id: u64) -> Result<(), GatewayError>;

    /// Marks an environment as its project's default.
    ///
    /// # Errors
    /// Returns an error if the backend call fails.
    async fn set_default(&self, id: u64) -> Result<(), GatewayError>;

    /// Returns the default environment of a project, if one is marked.
    async fn default_environment(
        &self,
        project_id: Option<u64>,
    ) -> Result<Option<Environment>, GatewayError> {
        let environments = self.list(project_id).await?;
        Ok(environments.into_iter().find(|env| env.is_default))
    }
}

#[async_trait]
impl<T: EnvironmentRepository + ?Sized> EnvironmentRepository for Arc<T> {
    async fn list(&self, project_id: Option<u64>) -> Result<Vec<Environment>, GatewayError> {
        (**self).list(project_id).await
    }

    async fn get(&self, id: u64) -> Result<Environment, GatewayError> {
        (**self).get(id).await
    }

    async fn create(&self, input: &EnvironmentInput) -> Result<Environment, GatewayError> {
        (**self).create(input).await
    }

    async fn update(&self, id: u64, input: &EnvironmentInput) -> Result<Environment, GatewayError> {
        (**self).update(id, input).await
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        (**self).delete(id).await
    }

    async fn set_default(&self, id: u64) -> Result<(), GatewayError> {
        (**self).set_default(id).await
    }
}

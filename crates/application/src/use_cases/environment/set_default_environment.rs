//! Set default environment use case

use crate::ports::{EnvironmentRepository, GatewayError};

/// Marks an environment as its project's default.
pub struct SetDefaultEnvironment<R> {
    repository: R,
}

impl<R: EnvironmentRepository> SetDefaultEnvironment<R> {
    /// Creates a new `SetDefaultEnvironment` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the backend call fails.
    pub async fn execute(&self, id: u64) -> Result<(), GatewayError> {
        self.repository.set_default(id).await?;
        tracing::info!(environment = id, "default environment set");
        Ok(())
    }
}

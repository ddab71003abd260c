//! List environments use case

use easytest_domain::Environment;

use crate::ports::{EnvironmentRepository, GatewayError};

/// Output containing the list of environments.
pub struct ListEnvironmentsOutput {
    /// Environments visible to the project.
    pub environments: Vec<Environment>,
    /// The project's default environment, if one is marked.
    pub default_id: Option<u64>,
}

/// Lists the environments of a project.
pub struct ListEnvironments<R> {
    repository: R,
}

impl<R: EnvironmentRepository> ListEnvironments<R> {
    /// Creates a new `ListEnvironments` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the backend call fails.
    pub async fn execute(
        &self,
        project_id: Option<u64>,
    ) -> Result<ListEnvironmentsOutput, GatewayError> {
        let environments = self.repository.list(project_id).await?;
        let default_id = environments
            .iter()
            .find(|env| env.is_default)
            .map(|env| env.id);
        Ok(ListEnvironmentsOutput {
            environments,
            default_id,
        })
    }
}

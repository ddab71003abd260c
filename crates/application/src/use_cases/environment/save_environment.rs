//! Save environment use case

use easytest_domain::{DomainError, Environment, EnvironmentInput};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::EnvironmentRepository;

/// Creates an environment, or updates it when an id is given.
pub struct SaveEnvironment<R> {
    repository: R,
}

impl<R: EnvironmentRepository> SaveEnvironment<R> {
    /// Creates a new `SaveEnvironment` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `InvalidEnvironment` for a blank name, or the backend error.
    pub async fn execute(
        &self,
        id: Option<u64>,
        input: &EnvironmentInput,
    ) -> ApplicationResult<Environment> {
        if input.name.trim().is_empty() {
            return Err(ApplicationError::Domain(DomainError::InvalidEnvironment(
                "name is required".to_string(),
            )));
        }
        let saved = match id {
            Some(id) => self.repository.update(id, input).await?,
            None => self.repository.create(input).await?,
        };
        tracing::info!(environment = saved.id, name = %saved.name, "environment saved");
        Ok(saved)
    }
}

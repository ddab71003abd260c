//! Get environment use case

use easytest_domain::Environment;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::EnvironmentRepository;

/// Loads one environment by id.
pub struct GetEnvironment<R> {
    repository: R,
}

impl<R: EnvironmentRepository> GetEnvironment<R> {
    /// Creates a new `GetEnvironment` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `ApplicationError::NotFound` when the backend answers 404,
    /// or the gateway error otherwise.
    pub async fn execute(&self, id: u64) -> ApplicationResult<Environment> {
        match self.repository.get(id).await {
            Ok(environment) => Ok(environment),
            Err(error) if error.is_not_found() => {
                Err(ApplicationError::NotFound(format!("environment {id}")))
            }
            Err(error) => Err(error.into()),
        }
    }
}

//! List collections use case

use easytest_domain::Collection;

use crate::ports::{CollectionRepository, GatewayError};

/// Lists the collections of a project, ordered by position then name.
pub struct ListCollections<R> {
    repository: R,
}

impl<R: CollectionRepository> ListCollections<R> {
    /// Creates a new `ListCollections` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the backend call fails.
    pub async fn execute(&self, project_id: Option<u64>) -> Result<Vec<Collection>, GatewayError> {
        let mut collections = self.repository.list(project_id).await?;
        collections.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(collections)
    }
}

//! Delete collection use case

use super::collection_error;
use crate::error::ApplicationResult;
use crate::ports::CollectionRepository;

/// Deletes a collection together with its cases.
pub struct DeleteCollection<R> {
    repository: R,
}

impl<R: CollectionRepository> DeleteCollection<R> {
    /// Creates a new `DeleteCollection` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `NotFound` for a missing collection, or the backend error.
    pub async fn execute(&self, id: u64) -> ApplicationResult<()> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| collection_error(e, id))?;
        tracing::info!(collection = id, "collection deleted");
        Ok(())
    }
}

//! Save collection use case

use easytest_domain::{Collection, CollectionInput, ValidationError};

use super::collection_error;
use crate::error::ApplicationResult;
use crate::ports::CollectionRepository;

/// Creates a collection, or renames it when an id is given.
pub struct SaveCollection<R> {
    repository: R,
}

impl<R: CollectionRepository> SaveCollection<R> {
    /// Creates a new `SaveCollection` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `MissingName` for a blank name, `NotFound` when updating a
    /// missing collection, or the backend error.
    pub async fn execute(
        &self,
        id: Option<u64>,
        input: &CollectionInput,
    ) -> ApplicationResult<Collection> {
        if input.name.trim().is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        let saved = match id {
            Some(id) => self
                .repository
                .update(id, input)
                .await
                .map_err(|e| collection_error(e, id))?,
            None => self.repository.create(input).await?,
        };
        tracing::info!(collection = saved.id, name = %saved.name, "collection saved");
        Ok(saved)
    }
}

//! Delete environment use case

use crate::error::ApplicationResult;
use crate::ports::EnvironmentRepository;
use crate::workspace::DraftStore;

/// Deletes an environment and forgets it as the stored selection.
pub struct DeleteEnvironment<R> {
    repository: R,
    drafts: DraftStore,
}

impl<R: EnvironmentRepository> DeleteEnvironment<R> {
    /// Creates a new `DeleteEnvironment` use case.
    pub const fn new(repository: R, drafts: DraftStore) -> Self {
        Self { repository, drafts }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns the backend error, or a storage error if the selection slot
    /// cannot be removed.
    pub async fn execute(&self, id: u64, project_id: Option<u64>) -> ApplicationResult<()> {
        self.repository.delete(id).await?;
        if self.drafts.load_selection(project_id).await == Some(id) {
            self.drafts.save_selection(project_id, None).await?;
        }
        tracing::info!(environment = id, "environment deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{FakeEnvironments, MemoryStore};
    use crate::workspace::selection_key;
    use easytest_domain::Environment;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_deleting_selected_environment_clears_selection() {
        let store = Arc::new(MemoryStore::with_slot(&selection_key(Some(3)), "1"));
        let repository = FakeEnvironments::with(vec![Environment::new(1, "dev", "")]);
        let use_case = DeleteEnvironment::new(repository, DraftStore::new(store.clone()));

        use_case.execute(1, Some(3)).await.unwrap();
        assert_eq!(store.slot(&selection_key(Some(3))), None);
    }

    #[tokio::test]
    async fn test_other_selection_is_kept() {
        let store = Arc::new(MemoryStore::with_slot(&selection_key(None), "2"));
        let repository = FakeEnvironments::with(vec![
            Environment::new(1, "dev", ""),
            Environment::new(2, "prod", ""),
        ]);
        let use_case = DeleteEnvironment::new(repository, DraftStore::new(store.clone()));

        use_case.execute(1, None).await.unwrap();
        assert_eq!(store.slot(&selection_key(None)).as_deref(), Some("2"));
    }
}

//! Run collection use case

use easytest_domain::CollectionRun;

use super::collection_error;
use crate::error::ApplicationResult;
use crate::ports::CollectionRepository;

/// Runs every enabled case of a collection on the backend.
pub struct RunCollection<R> {
    repository: R,
}

impl<R: CollectionRepository> RunCollection<R> {
    /// Creates a new `RunCollection` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// With `env_id` every case runs in that environment; without it each
    /// case keeps its own.
    ///
    /// # Errors
    /// Returns `NotFound` for a missing collection, or the backend error,
    /// e.g. for a collection without enabled cases.
    pub async fn execute(&self, id: u64, env_id: Option<u64>) -> ApplicationResult<CollectionRun> {
        tracing::info!(collection = id, environment = ?env_id, "running collection");
        let run = self
            .repository
            .run(id, env_id)
            .await
            .map_err(|e| collection_error(e, id))?;
        tracing::info!(
            collection = id,
            total = run.total,
            passed = run.passed,
            failed = run.failed,
            "collection run finished"
        );
        Ok(run)
    }
}

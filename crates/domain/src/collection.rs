//! Test case collections and collection runs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::serde_util::null_as_default;

/// A named group of test cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Backend identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Owning project.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// Enclosing collection, for nested trees.
    #[serde(default)]
    pub parent_id: Option<u64>,
    /// Position among siblings.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_order: i64,
    /// Number of cases in the collection.
    #[serde(default, deserialize_with = "null_as_default")]
    pub case_count: u64,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Fields sent when creating or updating a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct CollectionInput {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Owning project; only honoured on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
}

/// Outcome of one case inside a collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRunResult {
    /// Case identifier.
    pub case_id: u64,
    /// Case name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Method as sent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    /// Resolved URL as sent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Whether the request and its scripts passed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub passed: bool,
    /// Response status, absent when no response arrived.
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Elapsed milliseconds.
    #[serde(default)]
    pub response_time: Option<f64>,
    /// Failure message.
    #[serde(default)]
    pub error: Option<String>,
    /// Environment the case ran in.
    #[serde(default)]
    pub environment_id: Option<u64>,
    /// Name of that environment.
    #[serde(default)]
    pub environment_name: Option<String>,
}

/// Report returned after running every enabled case of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRun {
    /// Execution record id.
    #[serde(default)]
    pub test_run_id: Option<u64>,
    /// Generated report id.
    #[serde(default)]
    pub report_id: Option<u64>,
    /// Cases executed.
    #[serde(default)]
    pub total: u64,
    /// Cases that passed.
    #[serde(default)]
    pub passed: u64,
    /// Cases that failed.
    #[serde(default)]
    pub failed: u64,
    /// Total duration in milliseconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: f64,
    /// Per-case outcomes in execution order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<CaseRunResult>,
}

impl CollectionRun {
    /// Returns true when every case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0 && self.passed == self.total
    }
}

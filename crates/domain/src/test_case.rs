//! Stored API test cases.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::request::{
    BodyType, DraftRequest, HttpMethod, KeyValue, StringMap, with_trailing_blank,
};
use crate::serde_util::{lenient_map, null_as_default};

/// A test case as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTestCase {
    /// Backend identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// HTTP method.
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: HttpMethod,
    /// Request URL, possibly relative.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Stored headers.
    #[serde(default, deserialize_with = "lenient_map")]
    pub headers: BTreeMap<String, String>,
    /// Stored query parameters.
    #[serde(default, deserialize_with = "lenient_map")]
    pub params: BTreeMap<String, String>,
    /// Stored body, JSON for json cases and text otherwise.
    #[serde(default)]
    pub body: Option<serde_json::Value>,
    /// Body discriminator; the backend defaults it to `json`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub body_type: BodyType,
    /// Pre-request script.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pre_script: String,
    /// Post-response script.
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_script: String,
    /// Environment bound to the case.
    #[serde(default)]
    pub environment_id: Option<u64>,
    /// Owning project.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// Owning collection.
    #[serde(default)]
    pub collection_id: Option<u64>,
    /// Gateway timeout in seconds.
    #[serde(default = "default_timeout", deserialize_with = "timeout_or_default")]
    pub timeout: u64,
    /// `passed`, `failed` or `pending`.
    #[serde(default)]
    pub last_status: Option<String>,
    /// Last execution time.
    #[serde(default)]
    pub last_run_at: Option<NaiveDateTime>,
}

const fn default_timeout() -> u64 {
    30
}

fn timeout_or_default<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_else(default_timeout))
}

impl ApiTestCase {
    /// Converts the case into an editable draft.
    ///
    /// Map entries become rows sorted by key, each list gains a blank row,
    /// and JSON bodies are pretty-printed.
    #[must_use]
    pub fn to_draft(&self) -> DraftRequest {
        DraftRequest {
            method: self.method,
            url: self.url.clone(),
            name: self.name.clone(),
            headers: rows_from_map(&self.headers),
            params: rows_from_map(&self.params),
            body: body_text(self.body.as_ref()),
            body_type: self.body_type,
            pre_script: self.pre_script.clone(),
            post_script: self.post_script.clone(),
        }
    }
}

fn rows_from_map(map: &BTreeMap<String, String>) -> Vec<KeyValue> {
    with_trailing_blank(
        map.iter()
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect(),
    )
}

fn body_text(body: Option<&serde_json::Value>) -> String {
    match body {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
    }
}

/// Fields sent when creating or updating a test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCaseInput {
    /// Display name.
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL as typed, unresolved.
    pub url: String,
    /// Filled headers.
    pub headers: StringMap,
    /// Filled parameters.
    pub params: StringMap,
    /// Body payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Body discriminator.
    pub body_type: BodyType,
    /// Pre-request script.
    pub pre_script: String,
    /// Post-response script.
    pub post_script: String,
    /// Environment bound to the case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<u64>,
    /// Owning project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    /// Owning collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<u64>,
}

impl TestCaseInput {
    /// Builds the input from a draft and an already validated body.
    ///
    /// Duplicate row keys keep the last value.
    #[must_use]
    pub fn from_draft(draft: &DraftRequest, body: Option<serde_json::Value>) -> Self {
        Self {
            name: draft.name.trim().to_string(),
            method: draft.method,
            url: draft.url.clone(),
            headers: fold_rows(&draft.headers),
            params: fold_rows(&draft.params),
            body,
            body_type: draft.body_type,
            pre_script: draft.pre_script.clone(),
            post_script: draft.post_script.clone(),
            environment_id: None,
            project_id: None,
            collection_id: None,
        }
    }
}

fn fold_rows(rows: &[KeyValue]) -> StringMap {
    let mut map = IndexMap::new();
    for row in rows.iter().filter(|row| row.is_filled()) {
        map.insert(row.key.clone(), row.value.clone());
    }
    map
}

/// Filters for listing test cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaseQuery {
    /// Restrict to a project.
    pub project_id: Option<u64>,
    /// Restrict to a collection.
    pub collection_id: Option<u64>,
}

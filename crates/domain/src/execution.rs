//! Execution gateway wire types
//!
//! The payload posted to `/api-test/execute` and the result it returns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::request::{BodyType, ComposedRequest, HttpMethod, StringMap};

/// Request payload for the execution gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutePayload {
    /// HTTP method.
    pub method: HttpMethod,
    /// Composed and substituted URL.
    pub url: String,
    /// Final headers.
    pub headers: StringMap,
    /// Final query parameters.
    pub params: StringMap,
    /// Body payload, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Body discriminator.
    pub body_type: BodyType,
    /// Timeout in seconds.
    pub timeout: u64,
    /// Selected environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_id: Option<u64>,
    /// Pre-request script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_script: Option<String>,
    /// Post-response script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_script: Option<String>,
}

impl ExecutePayload {
    /// Builds the payload from a composed request.
    ///
    /// Empty scripts are omitted.
    #[must_use]
    pub fn new(
        composed: ComposedRequest,
        timeout: u64,
        env_id: Option<u64>,
        pre_script: &str,
        post_script: &str,
    ) -> Self {
        Self {
            method: composed.method,
            url: composed.url,
            headers: composed.headers,
            params: composed.params,
            body: composed.body.as_ref().map(crate::request::RequestBody::to_value),
            body_type: composed.body_type,
            timeout,
            env_id,
            pre_script: non_empty(pre_script),
            post_script: non_empty(post_script),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Size of the response body, reported either as bytes or as a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseSize {
    /// Size in bytes.
    Bytes(u64),
    /// Preformatted label such as `1.23 KB`.
    Label(String),
}

impl fmt::Display for ResponseSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => write!(f, "{bytes} B"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Assertion tallies reported by the post-response script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AssertionSummary {
    /// Assertions evaluated.
    pub total: u32,
    /// Assertions that passed.
    pub passed: u32,
    /// Assertions that failed.
    pub failed: u32,
    /// Per-assertion records, passed through as-is.
    pub details: Vec<serde_json::Value>,
}

/// Report for one script phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScriptReport {
    /// Whether the script ran.
    pub executed: bool,
    /// Whether it finished without failure.
    pub passed: bool,
    /// Error message when it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Duration in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Environment variables changed by the script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_changes: Option<serde_json::Value>,
    /// Local variables set by the script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
    /// Assertion tallies. Absent or an empty list when none ran.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "summary_or_list"
    )]
    pub assertions: Option<AssertionSummary>,
}

/// Script reports for both phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScriptExecution {
    /// Pre-request phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_script: Option<ScriptReport>,
    /// Post-response phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_script: Option<ScriptReport>,
}

/// Result returned by the execution gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExecutionResult {
    /// Whether the request was performed.
    pub success: bool,
    /// HTTP status of the target response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Response headers.
    pub headers: IndexMap<String, String>,
    /// Response body, JSON when the target returned JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Round-trip time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
    /// Body size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_size: Option<ResponseSize>,
    /// Failure message when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Response cookies.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cookies: BTreeMap<String, String>,
    /// Script reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_execution: Option<ScriptExecution>,
}

impl ExecutionResult {
    /// Creates a failed result carrying only an error message.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Returns true when the request ran and every script phase passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        let phase_ok = |report: &Option<ScriptReport>| {
            report.as_ref().is_none_or(|r| !r.executed || r.passed)
        };
        self.success
            && self
                .script_execution
                .as_ref()
                .is_none_or(|s| phase_ok(&s.pre_script) && phase_ok(&s.post_script))
    }
}

fn summary_or_list<'de, D>(deserializer: D) -> Result<Option<AssertionSummary>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Array(items)) if items.is_empty() => Ok(None),
        Some(serde_json::Value::Array(items)) => Ok(Some(AssertionSummary {
            total: u32::try_from(items.len()).unwrap_or(u32::MAX),
            passed: 0,
            failed: 0,
            details: items,
        })),
        Some(other) => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request::RequestBody;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn composed() -> ComposedRequest {
        let mut headers = StringMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ComposedRequest {
            method: HttpMethod::Post,
            url: "https://api.test/users".to_string(),
            headers,
            params: StringMap::new(),
            body: Some(RequestBody::Json(json!({"name": "a"}))),
            body_type: BodyType::Json,
        }
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = ExecutePayload::new(composed(), 30, Some(2), "", "pm.test('x')");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "method": "POST",
                "url": "https://api.test/users",
                "headers": {"Content-Type": "application/json"},
                "params": {},
                "body": {"name": "a"},
                "body_type": "json",
                "timeout": 30,
                "env_id": 2,
                "post_script": "pm.test('x')"
            })
        );
    }

    #[test]
    fn test_result_deserializes_full_response() {
        let json = json!({
            "success": true,
            "status_code": 200,
            "headers": {"content-type": "application/json"},
            "body": {"ok": true},
            "response_time": 12.5,
            "response_size": "1.23 KB",
            "cookies": {"sid": "x"},
            "script_execution": {
                "pre_script": {"executed": false, "passed": true},
                "post_script": {
                    "executed": true,
                    "passed": true,
                    "assertions": {"total": 1, "passed": 1, "failed": 0, "details": []}
                }
            }
        });
        let result: ExecutionResult = serde_json::from_value(json).unwrap();
        assert_eq!(result.status_code, Some(200));
        assert_eq!(
            result.response_size,
            Some(ResponseSize::Label("1.23 KB".to_string()))
        );
        let post = result
            .script_execution
            .as_ref()
            .and_then(|s| s.post_script.as_ref())
            .unwrap();
        assert_eq!(post.assertions.as_ref().map(|a| a.passed), Some(1));
        assert!(result.all_passed());
    }

    #[test]
    fn test_result_tolerates_failure_shape() {
        let json = json!({
            "success": false,
            "error": "connection refused",
            "response_time": 3,
            "script_execution": {"post_script": {"executed": true, "passed": false, "assertions": []}}
        });
        let result: ExecutionResult = serde_json::from_value(json).unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("connection refused"));
        assert!(!result.all_passed());
    }

    #[test]
    fn test_numeric_response_size() {
        let result: ExecutionResult =
            serde_json::from_value(json!({"success": true, "response_size": 512})).unwrap();
        assert_eq!(result.response_size, Some(ResponseSize::Bytes(512)));
    }

    #[test]
    fn test_failure_constructor() {
        let result = ExecutionResult::failure("timed out");
        assert!(!result.success);
        assert_eq!(result.status_code, None);
        assert_eq!(result.error.as_deref(), Some("timed out"));
    }
}

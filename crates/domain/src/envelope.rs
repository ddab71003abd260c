//! Response envelope shared by every platform endpoint.

use serde::{Deserialize, Serialize};

/// `{ code, message, data, timestamp, errors }` wrapper around API payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Application status code, mirrors the HTTP status.
    pub code: u16,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Payload, absent for errors and for some mutations.
    #[serde(default = "none")]
    pub data: Option<T>,
    /// Server timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Field-level error details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

const fn none<T>() -> Option<T> {
    None
}

impl<T> ApiEnvelope<T> {
    /// Returns true for a 2xx code.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code >= 200 && self.code < 300
    }
}

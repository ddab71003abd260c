//! The in-progress request edited in the workspace.

use serde::{Deserialize, Serialize};

use super::body::BodyType;
use super::key_value::{KeyValue, filled_rows, with_trailing_blank};
use super::method::HttpMethod;

/// Body text a fresh draft starts with.
pub const DEFAULT_BODY: &str = "{}";

/// The request currently being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Relative path or absolute URL.
    pub url: String,
    /// Optional human label, used as the test case name on save.
    pub name: String,
    /// Header rows, including placeholder rows.
    pub headers: Vec<KeyValue>,
    /// Query parameter rows, including placeholder rows.
    pub params: Vec<KeyValue>,
    /// Raw body text.
    pub body: String,
    /// How `body` is interpreted.
    pub body_type: BodyType,
    /// Pre-request script, forwarded verbatim.
    pub pre_script: String,
    /// Post-response script, forwarded verbatim.
    pub post_script: String,
}

impl Default for DraftRequest {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            url: String::new(),
            name: String::new(),
            headers: vec![KeyValue::blank()],
            params: vec![KeyValue::blank()],
            body: DEFAULT_BODY.to_string(),
            body_type: BodyType::default(),
            pre_script: String::new(),
            post_script: String::new(),
        }
    }
}

impl DraftRequest {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the persisted form differs from a fresh draft.
    ///
    /// Incomplete rows do not count; the method, body, body type and
    /// scripts do.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.to_stored() != Self::default().to_stored()
    }

    /// Returns the filled header rows.
    #[must_use]
    pub fn filled_headers(&self) -> Vec<KeyValue> {
        filled_rows(&self.headers)
    }

    /// Returns the filled parameter rows.
    #[must_use]
    pub fn filled_params(&self) -> Vec<KeyValue> {
        filled_rows(&self.params)
    }

    /// Returns true when the body differs from an empty or default body.
    #[must_use]
    pub fn has_custom_body(&self) -> bool {
        let trimmed = self.body.trim();
        !trimmed.is_empty() && trimmed != DEFAULT_BODY
    }

    /// Converts the draft into its persisted form.
    #[must_use]
    pub fn to_stored(&self) -> StoredDraft {
        StoredDraft {
            method: self.method,
            url: self.url.clone(),
            name: self.name.clone(),
            body: self.body.clone(),
            body_type: self.body_type,
            headers: self.filled_headers(),
            params: self.filled_params(),
            pre_script: self.pre_script.clone(),
            post_script: self.post_script.clone(),
        }
    }

    /// Hydrates a draft from its persisted form.
    ///
    /// Both row lists gain one trailing blank row.
    #[must_use]
    pub fn from_stored(stored: StoredDraft) -> Self {
        Self {
            method: stored.method,
            url: stored.url,
            name: stored.name,
            headers: with_trailing_blank(filled_rows(&stored.headers)),
            params: with_trailing_blank(filled_rows(&stored.params)),
            body: stored.body,
            body_type: stored.body_type,
            pre_script: stored.pre_script,
            post_script: stored.post_script,
        }
    }

    /// Snapshots the fields tracked by unsaved-change detection.
    #[must_use]
    pub fn baseline(&self) -> DraftBaseline {
        DraftBaseline {
            name: self.name.clone(),
            method: self.method,
            url: self.url.clone(),
            body: self.body.clone(),
            headers: self.filled_headers(),
            params: self.filled_params(),
            pre_script: self.pre_script.clone(),
            post_script: self.post_script.clone(),
        }
    }

    /// Returns true when the tracked fields differ from `baseline`.
    #[must_use]
    pub fn differs_from(&self, baseline: &DraftBaseline) -> bool {
        self.baseline() != *baseline
    }
}

/// The draft blob kept in local storage for crash recovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoredDraft {
    /// HTTP method.
    pub method: HttpMethod,
    /// URL text.
    pub url: String,
    /// Name text.
    pub name: String,
    /// Body text.
    pub body: String,
    /// Body discriminator.
    pub body_type: BodyType,
    /// Filled header rows.
    pub headers: Vec<KeyValue>,
    /// Filled parameter rows.
    pub params: Vec<KeyValue>,
    /// Pre-request script.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pre_script: String,
    /// Post-response script.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub post_script: String,
}

/// Field values captured when a stored test case is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftBaseline {
    /// Name at load time.
    pub name: String,
    /// Method at load time.
    pub method: HttpMethod,
    /// URL at load time.
    pub url: String,
    /// Body text at load time.
    pub body: String,
    /// Filled header rows at load time.
    pub headers: Vec<KeyValue>,
    /// Filled parameter rows at load time.
    pub params: Vec<KeyValue>,
    /// Pre-request script at load time.
    pub pre_script: String,
    /// Post-response script at load time.
    pub post_script: String,
}

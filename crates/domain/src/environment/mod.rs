//! Environment and variable domain types

mod variable;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use variable::VariableValue;

use crate::serde_util::{lenient_map, null_as_default};

/// Variables keyed by name.
pub type VariableMap = BTreeMap<String, VariableValue>;

/// Headers keyed by name.
pub type HeaderMap = BTreeMap<String, String>;

/// A named set of base URL, headers and variables applied to requests.
///
/// Owned by the backend; the workspace only caches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Environment {
    /// Backend identifier.
    pub id: u64,
    /// Owning project, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    /// Display label.
    pub name: String,
    /// Base URL prepended to relative request URLs. May be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub base_url: String,
    /// Headers added to requests that do not set them.
    #[serde(default, deserialize_with = "lenient_map")]
    pub headers: HeaderMap,
    /// Values substituted for `{{name}}` tokens.
    #[serde(default, deserialize_with = "lenient_map")]
    pub variables: VariableMap,
    /// Whether this is the project's default environment.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_default: bool,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Environment {
    /// Creates an environment with a base URL and nothing else.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Adds a header, builder style.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Adds a variable, builder style.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<VariableValue>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Returns the substitution text for a variable.
    #[must_use]
    pub fn variable_text(&self, name: &str) -> Option<String> {
        self.variables.get(name).map(VariableValue::to_text)
    }

    /// Converts into the input shape used for create and update calls.
    #[must_use]
    pub fn to_input(&self) -> EnvironmentInput {
        EnvironmentInput {
            project_id: self.project_id,
            name: self.name.clone(),
            base_url: self.base_url.clone(),
            headers: self.headers.clone(),
            variables: self.variables.clone(),
            is_default: self.is_default,
            description: self.description.clone(),
        }
    }
}

/// Fields sent when creating or updating an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EnvironmentInput {
    /// Owning project, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    /// Display label.
    pub name: String,
    /// Base URL.
    #[serde(default)]
    pub base_url: String,
    /// Environment headers.
    #[serde(default)]
    pub headers: HeaderMap,
    /// Environment variables.
    #[serde(default)]
    pub variables: VariableMap,
    /// Default flag.
    #[serde(default)]
    pub is_default: bool,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

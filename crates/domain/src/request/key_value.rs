//! Editable key/value rows for headers and query parameters.

use serde::{Deserialize, Serialize};

/// One row of the header or parameter editor.
///
/// Rows may be incomplete while the user types; only filled rows take part
/// in composition and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct KeyValue {
    /// Header or parameter name.
    #[serde(default)]
    pub key: String,
    /// Header or parameter value.
    #[serde(default)]
    pub value: String,
}

impl KeyValue {
    /// Creates a row.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates the empty placeholder row shown at the end of the editor.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
        }
    }

    /// Returns true when both key and value are non-empty.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }
}

/// Returns the filled rows, in order.
#[must_use]
pub fn filled_rows(rows: &[KeyValue]) -> Vec<KeyValue> {
    rows.iter().filter(|row| row.is_filled()).cloned().collect()
}

/// Appends one blank row for the editor.
#[must_use]
pub fn with_trailing_blank(mut rows: Vec<KeyValue>) -> Vec<KeyValue> {
    rows.push(KeyValue::blank());
    rows
}

//! JSON serialization helpers for stable file output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to pretty JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Field order as declared on the type
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use easytest_domain::ClientConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_has_trailing_newline_and_two_space_indent() {
        let json = to_json_stable(&ClientConfig::default()).unwrap();
        assert!(json.ends_with('\n'));
        assert!(json.contains("\n  \"base_url\""));
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let json = to_json_stable(&ClientConfig::default()).unwrap();
        let base = json.find("base_url").unwrap();
        let log = json.find("log_level").unwrap();
        assert!(base < log);
    }

    #[test]
    fn test_from_json_reports_deserialize_error() {
        let result: Result<ClientConfig, _> = from_json("{\"base_url\": 5}");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }

    #[test]
    fn test_reads_own_output() {
        let config = ClientConfig {
            project_id: Some(3),
            ..ClientConfig::default()
        };
        let restored: ClientConfig = from_json(&to_json_stable(&config).unwrap()).unwrap();
        assert_eq!(restored, config);
    }
}

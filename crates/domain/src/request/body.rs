//! HTTP Request body types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Discriminator for how the draft body text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    /// No body is sent.
    None,
    /// Body text is parsed as JSON.
    #[default]
    Json,
    /// Form fields, forwarded as text.
    Form,
    /// URL-encoded text, forwarded verbatim.
    Urlencoded,
    /// Arbitrary text, forwarded verbatim.
    Raw,
}

impl BodyType {
    /// Returns the wire name of this body type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::Form => "form",
            Self::Urlencoded => "urlencoded",
            Self::Raw => "raw",
        }
    }

    /// Content-Type injected when no header provides one.
    #[must_use]
    pub const fn default_content_type(self) -> Option<&'static str> {
        match self {
            Self::Json => Some("application/json"),
            Self::Form | Self::Urlencoded => Some("application/x-www-form-urlencoded"),
            Self::None | Self::Raw => None,
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "json" => Ok(Self::Json),
            "form" => Ok(Self::Form),
            "urlencoded" => Ok(Self::Urlencoded),
            "raw" => Ok(Self::Raw),
            other => Err(ValidationError::UnsupportedBodyType(other.to_string())),
        }
    }
}

/// A built request body, one variant per body type that sends a payload.
///
/// Serializes to the bare payload: JSON bodies as their value, the others as
/// a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequestBody {
    /// Parsed JSON document.
    Json(serde_json::Value),
    /// Form text.
    Form(String),
    /// URL-encoded text.
    Urlencoded(String),
    /// Raw text.
    Raw(String),
}

impl RequestBody {
    /// Returns the body type this payload was built for.
    #[must_use]
    pub const fn body_type(&self) -> BodyType {
        match self {
            Self::Json(_) => BodyType::Json,
            Self::Form(_) => BodyType::Form,
            Self::Urlencoded(_) => BodyType::Urlencoded,
            Self::Raw(_) => BodyType::Raw,
        }
    }

    /// Returns the payload as a JSON value for the wire.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Form(text) | Self::Urlencoded(text) | Self::Raw(text) => {
                serde_json::Value::String(text.clone())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_content_types() {
        assert_eq!(
            BodyType::Json.default_content_type(),
            Some("application/json")
        );
        assert_eq!(
            BodyType::Form.default_content_type(),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            BodyType::Urlencoded.default_content_type(),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(BodyType::Raw.default_content_type(), None);
        assert_eq!(BodyType::None.default_content_type(), None);
    }

    #[test]
    fn test_body_type_parse() {
        assert_eq!("JSON".parse::<BodyType>().unwrap(), BodyType::Json);
        assert_eq!(
            "xml".parse::<BodyType>(),
            Err(ValidationError::UnsupportedBodyType("xml".to_string()))
        );
    }

    #[test]
    fn test_body_serializes_as_bare_payload() {
        let json_body = RequestBody::Json(json!({"a": 1}));
        assert_eq!(serde_json::to_value(&json_body).unwrap(), json!({"a": 1}));

        let raw = RequestBody::Raw("hello".to_string());
        assert_eq!(serde_json::to_value(&raw).unwrap(), json!("hello"));
        assert_eq!(raw.body_type(), BodyType::Raw);
    }
}

//! Body building.

use easytest_domain::{BodyType, RequestBody, ValidationError};

/// Builds the body payload for a body type.
///
/// JSON text is parsed and a parse failure is a hard error, blank text
/// included. The text types pass through unmodified.
///
/// # Errors
///
/// Returns [`ValidationError::MalformedBody`] when JSON text does not parse.
pub fn build_body(body_type: BodyType, raw_text: &str) -> Result<Option<RequestBody>, ValidationError> {
    match body_type {
        BodyType::None => Ok(None),
        BodyType::Json => serde_json::from_str(raw_text)
            .map(|value| Some(RequestBody::Json(value)))
            .map_err(|e| ValidationError::MalformedBody {
                message: e.to_string(),
            }),
        BodyType::Form => Ok(Some(RequestBody::Form(raw_text.to_string()))),
        BodyType::Urlencoded => Ok(Some(RequestBody::Urlencoded(raw_text.to_string()))),
        BodyType::Raw => Ok(Some(RequestBody::Raw(raw_text.to_string()))),
    }
}

//! Header merging.

use easytest_domain::{BodyType, HeaderMap, KeyValue, StringMap, VariableMap};

use crate::variable_resolver::substitute_variables;

/// Header that carries the body media type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Merges draft rows with environment headers.
///
/// Filled draft rows come first and always keep their value. An environment
/// header is added only when no draft row uses the exact same key.
#[must_use]
pub fn merge_headers(draft_headers: &[KeyValue], environment_headers: &HeaderMap) -> StringMap {
    let mut merged = StringMap::new();
    for row in draft_headers.iter().filter(|row| row.is_filled()) {
        merged.insert(row.key.clone(), row.value.clone());
    }
    for (key, value) in environment_headers {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Returns true when any key equals `Content-Type`, ignoring case.
#[must_use]
pub fn has_content_type(headers: &StringMap) -> bool {
    headers.keys().any(|key| key.eq_ignore_ascii_case(CONTENT_TYPE))
}

/// Injects the body type's default `Content-Type` when none is present.
pub fn apply_content_type_default(headers: &mut StringMap, body_type: BodyType) {
    if let Some(content_type) = body_type.default_content_type()
        && !has_content_type(headers)
    {
        headers.insert(CONTENT_TYPE.to_string(), content_type.to_string());
    }
}

/// Substitutes variables in every header value. Keys are left as typed.
pub fn substitute_header_values(headers: &mut StringMap, variables: &VariableMap) {
    for value in headers.values_mut() {
        *value = substitute_variables(value, variables);
    }
}

//! The fully resolved request handed to the execution gateway.

use indexmap::IndexMap;
use serde::Serialize;

use super::body::{BodyType, RequestBody};
use super::method::HttpMethod;

/// Ordered string map used for final headers and parameters.
pub type StringMap = IndexMap<String, String>;

/// A draft after URL joining, variable substitution and merging.
///
/// Derived fresh for every send; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Final URL.
    pub url: String,
    /// Final headers, keys unique.
    pub headers: StringMap,
    /// Final query parameters, keys unique.
    pub params: StringMap,
    /// Built body, absent when nothing is sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Body discriminator forwarded to the gateway.
    pub body_type: BodyType,
}

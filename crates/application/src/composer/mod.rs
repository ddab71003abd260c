//! Request composer
//!
//! Derives a [`ComposedRequest`] from a [`DraftRequest`] and an optional
//! [`Environment`]. Everything here is synchronous and free of I/O; the only
//! failure is a JSON body that does not parse.

mod body;
mod curl;
mod headers;
mod params;
mod url;

pub use body::build_body;
pub use curl::generate_curl;
pub use headers::{
    CONTENT_TYPE, apply_content_type_default, has_content_type, merge_headers,
    substitute_header_values,
};
pub use params::merge_params;
pub use url::{compose_url, is_absolute_url, join_base_url};

use easytest_domain::{
    ComposedRequest, DraftRequest, Environment, HeaderMap, StringMap, ValidationError,
};

/// Composes the final request.
///
/// The body is built only for methods that carry one, and the default
/// `Content-Type` is injected only in that case.
///
/// # Errors
///
/// Returns [`ValidationError::MalformedBody`] when a JSON body does not parse.
pub fn compose(
    draft: &DraftRequest,
    environment: Option<&Environment>,
) -> Result<ComposedRequest, ValidationError> {
    let body = if draft.method.has_body() {
        build_body(draft.body_type, &draft.body)?
    } else {
        None
    };

    Ok(ComposedRequest {
        method: draft.method,
        url: compose_url(&draft.url, environment),
        headers: compose_headers(draft, environment),
        params: merge_params(&draft.params),
        body,
        body_type: draft.body_type,
    })
}

/// Merges, defaults and substitutes the headers for a draft.
pub(crate) fn compose_headers(draft: &DraftRequest, environment: Option<&Environment>) -> StringMap {
    let empty = HeaderMap::new();
    let environment_headers = environment.map_or(&empty, |env| &env.headers);

    let mut headers = merge_headers(&draft.headers, environment_headers);
    if draft.method.has_body() {
        apply_content_type_default(&mut headers, draft.body_type);
    }
    if let Some(env) = environment {
        substitute_header_values(&mut headers, &env.variables);
    }
    headers
}

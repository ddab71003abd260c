//! cURL export.

use easytest_domain::{DraftRequest, Environment, StringMap};

use super::params::merge_params;
use super::url::compose_url;
use super::compose_headers;

/// Renders the draft as a cURL command, one clause per line.
///
/// Uses the final URL (with the query string appended) and the merged,
/// substituted headers. The body clause carries the raw body text and is
/// emitted only for body-carrying methods with a non-default body. Values
/// are wrapped in single quotes and not otherwise escaped.
#[must_use]
pub fn generate_curl(draft: &DraftRequest, environment: Option<&Environment>) -> String {
    let url = with_query(
        &compose_url(&draft.url, environment),
        &merge_params(&draft.params),
    );
    let headers = compose_headers(draft, environment);

    let mut parts = vec![format!("curl -X {} '{}'", draft.method, url)];

    for (key, value) in &headers {
        parts.push(format!("-H '{key}: {value}'"));
    }

    if draft.method.has_body()
        && draft.body_type != easytest_domain::BodyType::None
        && draft.has_custom_body()
    {
        parts.push(format!("-d '{}'", draft.body));
    }

    parts.join(" \\\n  ")
}

fn with_query(url: &str, params: &StringMap) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let pairs: Vec<(&str, &str)> = params
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    let query = serde_urlencoded::to_string(pairs).unwrap_or_default();
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

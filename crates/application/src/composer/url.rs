//! URL joining.

use easytest_domain::Environment;

use crate::variable_resolver::substitute_variables;

/// Returns true for `http://` and `https://` URLs.
#[must_use]
pub fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Joins a draft URL onto a base URL.
///
/// Absolute draft URLs win over the base, an empty draft yields the base
/// as-is, and otherwise exactly one `/` separates the two.
#[must_use]
pub fn join_base_url(base_url: &str, draft_url: &str) -> String {
    if base_url.is_empty() || is_absolute_url(draft_url) {
        return draft_url.to_string();
    }
    if draft_url.is_empty() {
        return base_url.to_string();
    }

    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    if draft_url.starts_with('/') {
        format!("{base}{draft_url}")
    } else {
        format!("{base}/{draft_url}")
    }
}

/// Builds the final URL for a draft and substitutes environment variables.
#[must_use]
pub fn compose_url(draft_url: &str, environment: Option<&Environment>) -> String {
    match environment {
        Some(env) => substitute_variables(&join_base_url(&env.base_url, draft_url), &env.variables),
        None => draft_url.to_string(),
    }
}

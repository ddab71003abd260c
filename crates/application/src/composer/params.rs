//! Query parameter folding.

use easytest_domain::{KeyValue, StringMap};

/// Folds filled rows into a map. The last occurrence of a key wins; keys
/// keep the position of their first occurrence.
#[must_use]
pub fn merge_params(draft_params: &[KeyValue]) -> StringMap {
    let mut params = StringMap::new();
    for row in draft_params.iter().filter(|row| row.is_filled()) {
        params.insert(row.key.clone(), row.value.clone());
    }
    params
}

//! Field edits applied to the draft.

use easytest_domain::{BodyType, DraftRequest, HttpMethod, KeyValue};

/// A single change to the draft, as produced by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    /// Change the method.
    Method(HttpMethod),
    /// Replace the URL.
    Url(String),
    /// Replace the name.
    Name(String),
    /// Replace the body text.
    Body(String),
    /// Change the body type.
    BodyType(BodyType),
    /// Replace the pre-request script.
    PreScript(String),
    /// Replace the post-response script.
    PostScript(String),
    /// Replace every header row.
    Headers(Vec<KeyValue>),
    /// Replace every parameter row.
    Params(Vec<KeyValue>),
    /// Set one header, updating the first row with the same key.
    SetHeader(KeyValue),
    /// Set one parameter, updating the first row with the same key.
    SetParam(KeyValue),
    /// Remove every header row with this key.
    RemoveHeader(String),
    /// Remove every parameter row with this key.
    RemoveParam(String),
}

impl DraftEdit {
    /// Applies the edit. Row lists always end with a blank row afterwards.
    pub fn apply(self, draft: &mut DraftRequest) {
        match self {
            Self::Method(method) => draft.method = method,
            Self::Url(url) => draft.url = url,
            Self::Name(name) => draft.name = name,
            Self::Body(body) => draft.body = body,
            Self::BodyType(body_type) => draft.body_type = body_type,
            Self::PreScript(script) => draft.pre_script = script,
            Self::PostScript(script) => draft.post_script = script,
            Self::Headers(rows) => draft.headers = rows,
            Self::Params(rows) => draft.params = rows,
            Self::SetHeader(row) => upsert_row(&mut draft.headers, row),
            Self::SetParam(row) => upsert_row(&mut draft.params, row),
            Self::RemoveHeader(key) => draft.headers.retain(|row| row.key != key),
            Self::RemoveParam(key) => draft.params.retain(|row| row.key != key),
        }
        ensure_trailing_blank(&mut draft.headers);
        ensure_trailing_blank(&mut draft.params);
    }
}

fn upsert_row(rows: &mut Vec<KeyValue>, row: KeyValue) {
    if let Some(existing) = rows.iter_mut().find(|existing| existing.key == row.key) {
        existing.value = row.value;
        return;
    }
    let insert_at = rows
        .iter()
        .rposition(|existing| *existing != KeyValue::blank())
        .map_or(0, |index| index + 1);
    rows.insert(insert_at, row);
}

fn ensure_trailing_blank(rows: &mut Vec<KeyValue>) {
    if rows.last() != Some(&KeyValue::blank()) {
        rows.push(KeyValue::blank());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_header_appends_before_blank() {
        let mut draft = DraftRequest::new();
        DraftEdit::SetHeader(KeyValue::new("X-A", "1")).apply(&mut draft);
        DraftEdit::SetHeader(KeyValue::new("X-B", "2")).apply(&mut draft);
        assert_eq!(
            draft.headers,
            vec![
                KeyValue::new("X-A", "1"),
                KeyValue::new("X-B", "2"),
                KeyValue::blank()
            ]
        );
    }

    #[test]
    fn test_set_header_updates_existing_key() {
        let mut draft = DraftRequest::new();
        DraftEdit::SetHeader(KeyValue::new("X-A", "1")).apply(&mut draft);
        DraftEdit::SetHeader(KeyValue::new("X-A", "9")).apply(&mut draft);
        assert_eq!(
            draft.headers,
            vec![KeyValue::new("X-A", "9"), KeyValue::blank()]
        );
    }

    #[test]
    fn test_remove_param_keeps_placeholder() {
        let mut draft = DraftRequest::new();
        DraftEdit::SetParam(KeyValue::new("q", "x")).apply(&mut draft);
        DraftEdit::RemoveParam("q".to_string()).apply(&mut draft);
        assert_eq!(draft.params, vec![KeyValue::blank()]);
    }

    #[test]
    fn test_replacing_rows_adds_placeholder() {
        let mut draft = DraftRequest::new();
        DraftEdit::Headers(vec![KeyValue::new("A", "1")]).apply(&mut draft);
        assert_eq!(draft.headers.len(), 2);
    }
}

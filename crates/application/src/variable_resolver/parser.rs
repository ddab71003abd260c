//! Variable parser for {{variable}} syntax
//!
//! Parses strings to extract variable references with their positions.
//! A reference is `{{` followed by one or more ASCII word characters
//! (`[A-Za-z0-9_]`) and `}}`. Anything else, including `{{ spaced }}`, is
//! plain text.

use std::ops::Range;

/// Represents a parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without {{ }}).
    pub name: String,

    /// Byte range in the original string where this reference appears.
    pub span: Range<usize>,
}

impl VariableReference {
    /// Creates a new variable reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

const fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Parses a string and extracts all variable references, left to right.
///
/// # Examples
///
/// ```
/// use easytest_application::variable_resolver::parser::parse_variables;
///
/// let refs = parse_variables("{{host}}/users/{{id}}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "host");
/// assert_eq!(refs[1].span, 15..21);
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    let bytes = input.as_bytes();
    let mut references = Vec::new();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] != b'{' || bytes[i + 1] != b'{' {
            i += 1;
            continue;
        }

        let name_start = i + 2;
        let mut j = name_start;
        while j < bytes.len() && is_word_byte(bytes[j]) {
            j += 1;
        }

        let closed = j + 1 < bytes.len() && bytes[j] == b'}' && bytes[j + 1] == b'}';
        if j > name_start && closed {
            references.push(VariableReference::new(&input[name_start..j], i..j + 2));
            i = j + 2;
        } else {
            i += 1;
        }
    }

    references
}

/// Returns true if the input string contains any variable references.
#[must_use]
pub fn has_variables(input: &str) -> bool {
    input.contains("{{") && !parse_variables(input).is_empty()
}

/// Extracts the variable names in order of appearance, without duplicates.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for reference in parse_variables(input) {
        if !names.contains(&reference.name) {
            names.push(reference.name);
        }
    }
    names
}

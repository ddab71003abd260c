//! Variable resolution engine
//!
//! Substitutes `{{variable}}` references with environment values in a single
//! left-to-right pass. Substituted text is never rescanned, so a value that
//! itself contains `{{..}}` ends up in the output verbatim.

use easytest_domain::{Environment, VariableMap};

use super::parser::parse_variables;

/// Result of variable resolution for a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The string with every known variable substituted.
    pub resolved: String,

    /// Names that were substituted, in order of appearance.
    pub resolved_variables: Vec<String>,

    /// Names left in place because no value exists.
    pub unresolved: Vec<String>,

    /// Whether all variables were successfully resolved.
    pub is_complete: bool,
}

impl ResolutionResult {
    /// Creates a result for input with no variables.
    #[must_use]
    pub fn no_variables(input: &str) -> Self {
        Self {
            resolved: input.to_string(),
            resolved_variables: Vec::new(),
            unresolved: Vec::new(),
            is_complete: true,
        }
    }
}

/// Resolves `{{variable}}` references against a variable map.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    variables: Option<&'a VariableMap>,
}

impl<'a> VariableResolver<'a> {
    /// Creates a resolver over the given variables.
    #[must_use]
    pub const fn new(variables: &'a VariableMap) -> Self {
        Self {
            variables: Some(variables),
        }
    }

    /// Creates a resolver for an optional environment.
    #[must_use]
    pub fn for_environment(environment: Option<&'a Environment>) -> Self {
        Self {
            variables: environment.map(|env| &env.variables),
        }
    }

    /// Resolves all variables in the input string.
    #[must_use]
    pub fn resolve(&self, input: &str) -> ResolutionResult {
        let references = parse_variables(input);

        if references.is_empty() {
            return ResolutionResult::no_variables(input);
        }

        let mut resolved_variables = Vec::new();
        let mut unresolved = Vec::new();
        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for var_ref in &references {
            result.push_str(&input[last_end..var_ref.span.start]);

            match self.lookup(&var_ref.name) {
                Some(value) => {
                    result.push_str(&value);
                    resolved_variables.push(var_ref.name.clone());
                }
                None => {
                    result.push_str(&input[var_ref.span.clone()]);
                    if !unresolved.contains(&var_ref.name) {
                        unresolved.push(var_ref.name.clone());
                    }
                }
            }

            last_end = var_ref.span.end;
        }

        result.push_str(&input[last_end..]);

        let is_complete = unresolved.is_empty();
        ResolutionResult {
            resolved: result,
            resolved_variables,
            unresolved,
            is_complete,
        }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.variables?.get(name).map(|value| value.to_text())
    }
}

/// Replaces every `{{name}}` whose name exists in `variables`.
///
/// Unknown names are left untouched; the call never fails.
#[must_use]
pub fn substitute_variables(text: &str, variables: &VariableMap) -> String {
    VariableResolver::new(variables).resolve(text).resolved
}

/// Lists the distinct names in `text` that `variables` cannot resolve.
#[must_use]
pub fn find_unresolved(text: &str, variables: &VariableMap) -> Vec<String> {
    VariableResolver::new(variables).resolve(text).unresolved
}

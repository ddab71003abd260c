//! Variable resolution module
//!
//! Provides parsing and resolution of `{{variable}}` syntax in strings.
//!
//! # Usage
//!
//! ```
//! use easytest_application::variable_resolver::substitute_variables;
//! use easytest_domain::Environment;
//!
//! let env = Environment::new(1, "dev", "").with_variable("host", "localhost");
//! let resolved = substitute_variables("http://{{host}}/api", &env.variables);
//! assert_eq!(resolved, "http://localhost/api");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{ResolutionResult, VariableResolver, find_unresolved, substitute_variables};
pub use parser::{VariableReference, extract_variable_names, has_variables, parse_variables};

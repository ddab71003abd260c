//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use easytest_application::{DraftEdit, UnsavedChoice};
use easytest_domain::{BodyType, HttpMethod, KeyValue, ValidationError, VariableValue};
use structopt::StructOpt;

/// Compose, save and send API test requests from the terminal.
///
/// The draft, the environment selection and the loaded case survive between
/// invocations.
#[derive(Debug, StructOpt)]
#[structopt(name = "easytest")]
pub struct Opts {
    /// Platform server origin, e.g. http://127.0.0.1:5211
    #[structopt(long)]
    pub base_url: Option<String>,

    /// Project that scopes environments and test cases
    #[structopt(long)]
    pub project: Option<u64>,

    /// Directory holding the draft and session slots
    #[structopt(long, parse(from_os_str))]
    pub data_dir: Option<PathBuf>,

    /// Directory holding config.json
    #[structopt(long, parse(from_os_str))]
    pub config_dir: Option<PathBuf>,

    /// Tracing filter, e.g. debug or easytest_infrastructure=trace
    #[structopt(long)]
    pub log: Option<String>,

    #[structopt(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, StructOpt)]
pub enum Command {
    /// Sign in to the platform
    Login {
        /// Login name
        username: String,
        /// Password
        #[structopt(long, env = "EASYTEST_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List environments of the project
    Envs,
    /// Print one environment
    Env {
        /// Environment id
        id: u64,
    },
    /// Create or update an environment
    EnvSave {
        /// Environment to update; creates one when absent
        #[structopt(long)]
        id: Option<u64>,
        /// Display name
        #[structopt(long)]
        name: String,
        /// Base URL prepended to relative request URLs
        #[structopt(long, default_value = "")]
        base_url: String,
        /// Header as KEY=VALUE, repeatable
        #[structopt(long = "header", parse(try_from_str = parse_pair))]
        headers: Vec<(String, String)>,
        /// Variable as KEY=VALUE, repeatable; numbers and booleans keep their type
        #[structopt(long = "var", parse(try_from_str = parse_pair))]
        variables: Vec<(String, String)>,
    },
    /// Delete an environment
    EnvDelete {
        /// Environment id
        id: u64,
    },
    /// Mark an environment as the project default
    EnvDefault {
        /// Environment id
        id: u64,
    },
    /// Select an environment, or none
    Use {
        /// Environment id; omit to use no environment
        id: Option<u64>,
    },
    /// Set a draft field
    Set {
        /// method, url, name, body, body-type, pre-script or post-script
        field: DraftField,
        /// New value
        value: String,
    },
    /// Set a header row, or remove it when no value is given
    Header {
        /// Header name
        key: String,
        /// Header value
        value: Option<String>,
    },
    /// Set a query parameter row, or remove it when no value is given
    Param {
        /// Parameter name
        key: String,
        /// Parameter value
        value: Option<String>,
    },
    /// Print the draft and workspace state
    Show,
    /// Print the request that would be sent
    Compose,
    /// Print the draft as a curl command
    Curl,
    /// Send the draft through the execution gateway
    Send,
    /// List stored test cases
    Cases {
        /// Restrict to a collection
        #[structopt(long)]
        collection: Option<u64>,
    },
    /// Load a stored test case into the draft
    Open {
        /// Test case id
        id: u64,
        #[structopt(flatten)]
        unsaved: UnsavedFlags,
    },
    /// Run a stored test case in the selected environment
    Run {
        /// Test case id
        id: u64,
    },
    /// List collections of the project
    Collections,
    /// Create or rename a collection
    CollectionSave {
        /// Collection to rename; creates one when absent
        #[structopt(long)]
        id: Option<u64>,
        /// Display name
        #[structopt(long)]
        name: String,
        /// Free-form description
        #[structopt(long, default_value = "")]
        description: String,
    },
    /// Delete a collection and its test cases
    CollectionDelete {
        /// Collection id
        id: u64,
    },
    /// Run every enabled test case of a collection
    RunCollection {
        /// Collection id
        id: u64,
        /// Run all cases in this environment instead of their own
        #[structopt(long)]
        env: Option<u64>,
    },
    /// Save the draft as a test case
    Save {
        /// Start a blank request afterwards
        #[structopt(long)]
        reset: bool,
    },
    /// Blank the draft
    Clear {
        /// Confirm clearing
        #[structopt(long)]
        yes: bool,
    },
    /// Start a blank request
    New {
        #[structopt(flatten)]
        unsaved: UnsavedFlags,
    },
    /// Print the effective configuration
    Config {
        /// Write it to config.json
        #[structopt(long)]
        save: bool,
    },
}

/// What to do with unsaved edits when switching cases.
#[derive(Debug, Clone, Copy, StructOpt)]
pub struct UnsavedFlags {
    /// Save the current case first
    #[structopt(long, conflicts_with = "discard")]
    pub save: bool,
    /// Drop unsaved edits
    #[structopt(long)]
    pub discard: bool,
}

impl UnsavedFlags {
    /// The choice the flags express, if any.
    #[must_use]
    pub const fn choice(self) -> Option<UnsavedChoice> {
        if self.save {
            Some(UnsavedChoice::SaveThenSwitch)
        } else if self.discard {
            Some(UnsavedChoice::DiscardAndSwitch)
        } else {
            None
        }
    }
}

/// Draft fields settable with `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// HTTP method.
    Method,
    /// Request URL.
    Url,
    /// Request name.
    Name,
    /// Raw body text.
    Body,
    /// Body type.
    BodyType,
    /// Pre-request script.
    PreScript,
    /// Post-response script.
    PostScript,
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "method" => Ok(Self::Method),
            "url" => Ok(Self::Url),
            "name" => Ok(Self::Name),
            "body" => Ok(Self::Body),
            "body-type" => Ok(Self::BodyType),
            "pre-script" => Ok(Self::PreScript),
            "post-script" => Ok(Self::PostScript),
            other => Err(format!("unknown field '{other}'")),
        }
    }
}

impl DraftField {
    /// Builds the edit setting this field to `value`.
    ///
    /// # Errors
    /// Returns a `ValidationError` for an unknown method or body type.
    pub fn edit(self, value: String) -> Result<DraftEdit, ValidationError> {
        Ok(match self {
            Self::Method => DraftEdit::Method(HttpMethod::from_str(&value)?),
            Self::Url => DraftEdit::Url(value),
            Self::Name => DraftEdit::Name(value),
            Self::Body => DraftEdit::Body(value),
            Self::BodyType => DraftEdit::BodyType(BodyType::from_str(&value)?),
            Self::PreScript => DraftEdit::PreScript(value),
            Self::PostScript => DraftEdit::PostScript(value),
        })
    }
}

/// Builds the edit for a `header` or `param` invocation.
#[must_use]
pub fn row_edit(header: bool, key: String, value: Option<String>) -> DraftEdit {
    match (header, value) {
        (true, Some(value)) => DraftEdit::SetHeader(KeyValue::new(key, value)),
        (true, None) => DraftEdit::RemoveHeader(key),
        (false, Some(value)) => DraftEdit::SetParam(KeyValue::new(key, value)),
        (false, None) => DraftEdit::RemoveParam(key),
    }
}

/// Splits `KEY=VALUE`.
///
/// # Errors
/// Returns an error when there is no `=` or the key is empty.
pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// Reads a variable value typed on the command line.
///
/// Numbers, booleans and `null` keep their JSON type; anything else is text.
#[must_use]
pub fn variable_value(raw: &str) -> VariableValue {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) if !value.is_object() && !value.is_array() && !value.is_string() => {
            VariableValue::from(value)
        }
        _ => VariableValue::from(raw),
    }
}

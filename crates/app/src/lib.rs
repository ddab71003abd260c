//! EasyTest command-line workspace.
//!
//! Drives the request composer the way the dashboard does: every invocation
//! mounts the persisted workspace, applies one command and leaves the draft
//! in local storage for the next one.

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod logging;

pub use cli::{Command, Opts};
pub use commands::run;
pub use context::{Context, load_config};
pub use error::{CliError, CliResult};

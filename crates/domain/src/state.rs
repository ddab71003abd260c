//! Send state of the workspace.

use serde::{Deserialize, Serialize};

use crate::execution::ExecutionResult;

/// Represents where the workspace is in its single send slot.
///
/// - `Idle`: nothing sent yet
/// - `Sending`: a call to the gateway is in flight, further sends are rejected
/// - `Completed`: the last result, successful or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SendState {
    /// No request has been sent yet.
    #[default]
    Idle,

    /// A request is in flight.
    Sending,

    /// The gateway answered, or the call failed and was converted.
    Completed {
        /// The rendered result.
        result: Box<ExecutionResult>,
    },
}

impl SendState {
    /// Returns true if a request is in flight.
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        matches!(self, Self::Sending)
    }

    /// Returns the last result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&ExecutionResult> {
        match self {
            Self::Completed { result } => Some(result),
            _ => None,
        }
    }
}

//! Authentication session handling.
//!
//! This module provides:
//! - The persisted session slot and its in-memory copy
//! - Single-flight access token refresh shared by every backend call

mod refresh;
mod session_store;

pub use refresh::RefreshCoordinator;
pub use session_store::{SESSION_KEY, SessionStore};

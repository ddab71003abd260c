//! Workspace state: draft persistence, unsaved-change detection and the
//! session that ties them to the ports.

mod change_tracker;
mod draft_store;
mod edit;
mod session;

pub use change_tracker::{ChangeTracker, SwitchOutcome, UnsavedChoice};
pub use draft_store::{
    DRAFT_KEY, DraftStore, ENV_SELECTION_KEY, LOADED_CASE_KEY, LoadedCase, selection_key,
};
pub use edit::DraftEdit;
pub use session::{WorkspacePorts, WorkspaceSession};

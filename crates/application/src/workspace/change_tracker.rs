//! Unsaved-change detection for drafts hydrated from stored test cases.

use easytest_domain::DraftRequest;
use serde::{Deserialize, Serialize};

use super::draft_store::LoadedCase;

/// What to do with unsaved edits when switching away from a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsavedChoice {
    /// Save the current case, then switch.
    SaveThenSwitch,
    /// Drop the edits and switch.
    DiscardAndSwitch,
    /// Stay on the current case.
    Cancel,
}

/// Result of asking to switch the active case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SwitchOutcome {
    /// The requested case is already loaded; nothing happened.
    Unchanged,
    /// The draft now holds the requested case (or a blank request).
    Switched {
        /// Case now loaded, `None` for a new blank request.
        case_id: Option<u64>,
    },
    /// The current case has unsaved edits; call again with a choice.
    NeedsConfirmation {
        /// Case with unsaved edits.
        current: u64,
    },
    /// The user chose to stay.
    Cancelled,
}

/// Tracks the loaded case and whether the draft diverged from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    loaded: Option<LoadedCase>,
    dirty: bool,
}

impl ChangeTracker {
    /// Creates a tracker with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots `draft` as the baseline of `case_id`.
    pub fn load(&mut self, case_id: u64, draft: &DraftRequest) {
        self.loaded = Some(LoadedCase {
            case_id,
            baseline: draft.baseline(),
        });
        self.dirty = false;
    }

    /// Restores a previously persisted baseline and recomputes the flag.
    pub fn restore(&mut self, loaded: LoadedCase, draft: &DraftRequest) {
        self.loaded = Some(loaded);
        self.recompute(draft);
    }

    /// Recomputes the dirty flag after an edit.
    pub fn recompute(&mut self, draft: &DraftRequest) {
        self.dirty = self
            .loaded
            .as_ref()
            .is_some_and(|loaded| draft.differs_from(&loaded.baseline));
    }

    /// Records a successful save: the saved values become the baseline.
    pub fn mark_saved(&mut self, case_id: u64, draft: &DraftRequest) {
        self.load(case_id, draft);
    }

    /// Forgets the loaded case.
    pub fn reset(&mut self) {
        self.loaded = None;
        self.dirty = false;
    }

    /// Returns true when the draft has unsaved edits.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the loaded case id.
    #[must_use]
    pub fn loaded_case_id(&self) -> Option<u64> {
        self.loaded.as_ref().map(|loaded| loaded.case_id)
    }

    /// Returns the loaded case and its baseline.
    #[must_use]
    pub const fn loaded(&self) -> Option<&LoadedCase> {
        self.loaded.as_ref()
    }

    /// Decides whether switching to `target` may proceed.
    ///
    /// Returns `Some(outcome)` when the switch stops here, `None` when the
    /// caller should go ahead (saving first if the choice says so).
    #[must_use]
    pub fn gate_switch(
        &self,
        target: Option<u64>,
        choice: Option<UnsavedChoice>,
    ) -> Option<SwitchOutcome> {
        if target.is_some() && target == self.loaded_case_id() {
            return Some(SwitchOutcome::Unchanged);
        }
        if !self.dirty {
            return None;
        }
        let current = self.loaded_case_id()?;
        match choice {
            None => Some(SwitchOutcome::NeedsConfirmation { current }),
            Some(UnsavedChoice::Cancel) => Some(SwitchOutcome::Cancelled),
            Some(UnsavedChoice::SaveThenSwitch | UnsavedChoice::DiscardAndSwitch) => None,
        }
    }
}

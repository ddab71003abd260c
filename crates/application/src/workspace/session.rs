//! The workspace session: an explicit, injectable state container for one
//! request tab.

use std::sync::Arc;

use easytest_domain::{
    ApiTestCase, ComposedRequest, DraftRequest, Environment, ExecutePayload, ExecutionResult,
    SendState, TestCaseInput, ValidationError,
};
use tracing::{debug, info, warn};

use super::change_tracker::{ChangeTracker, SwitchOutcome, UnsavedChoice};
use super::draft_store::DraftStore;
use super::edit::DraftEdit;
use crate::composer::{build_body, compose, generate_curl};
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{
    EnvironmentRepository, ExecutionGateway, GatewayError, KeyValueStore, TestCaseRepository,
};
use crate::variable_resolver::find_unresolved;

/// Adapters a session talks to.
#[derive(Clone)]
pub struct WorkspacePorts {
    /// Local storage.
    pub store: Arc<dyn KeyValueStore>,
    /// Environment CRUD.
    pub environments: Arc<dyn EnvironmentRepository>,
    /// Test case CRUD.
    pub cases: Arc<dyn TestCaseRepository>,
    /// Execution gateway.
    pub gateway: Arc<dyn ExecutionGateway>,
}

/// Resets the send slot if a send is dropped before it completes.
struct SendingGuard<'a> {
    state: &'a mut SendState,
}

impl<'a> SendingGuard<'a> {
    fn begin(state: &'a mut SendState) -> Self {
        *state = SendState::Sending;
        Self { state }
    }

    fn complete(self, result: ExecutionResult) {
        *self.state = SendState::Completed {
            result: Box::new(result),
        };
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        if self.state.is_sending() {
            *self.state = SendState::Idle;
        }
    }
}

/// Draft, environment selection, loaded case and send slot of one tab.
pub struct WorkspaceSession {
    drafts: DraftStore,
    environments: Arc<dyn EnvironmentRepository>,
    cases: Arc<dyn TestCaseRepository>,
    gateway: Arc<dyn ExecutionGateway>,
    project_id: Option<u64>,
    timeout_secs: u64,
    draft: DraftRequest,
    environment_list: Vec<Environment>,
    selected_env: Option<u64>,
    tracker: ChangeTracker,
    send_state: SendState,
}

impl WorkspaceSession {
    /// Creates a session with a blank draft. Call [`Self::mount`] next.
    #[must_use]
    pub fn new(ports: WorkspacePorts, project_id: Option<u64>, timeout_secs: u64) -> Self {
        Self {
            drafts: DraftStore::new(ports.store),
            environments: ports.environments,
            cases: ports.cases,
            gateway: ports.gateway,
            project_id,
            timeout_secs,
            draft: DraftRequest::new(),
            environment_list: Vec::new(),
            selected_env: None,
            tracker: ChangeTracker::new(),
            send_state: SendState::Idle,
        }
    }

    /// Restores the draft, environments, selection and loaded case.
    ///
    /// Every step is best effort: failures are logged and the session keeps
    /// its defaults.
    pub async fn mount(&mut self) {
        if let Some(draft) = self.drafts.restore_draft().await {
            debug!(url = %draft.url, "restored draft");
            self.draft = draft;
        }

        self.refresh_environments().await;

        let stored = self
            .drafts
            .load_selection(self.project_id)
            .await
            .filter(|id| self.environment(*id).is_some());
        self.selected_env = stored.or_else(|| {
            self.environment_list
                .iter()
                .find(|env| env.is_default)
                .map(|env| env.id)
        });

        if let Some(loaded) = self.drafts.load_loaded_case().await {
            self.tracker.restore(loaded, &self.draft);
        }
    }

    /// Reloads the environment list from the backend.
    ///
    /// A failed load keeps the previous list.
    pub async fn refresh_environments(&mut self) {
        match self.environments.list(self.project_id).await {
            Ok(list) => {
                self.environment_list = list;
                if self
                    .selected_env
                    .is_some_and(|id| self.environment(id).is_none())
                {
                    self.selected_env = None;
                }
            }
            Err(e) => warn!(error = %e, "failed to load environments"),
        }
    }

    /// Returns the draft.
    #[must_use]
    pub const fn draft(&self) -> &DraftRequest {
        &self.draft
    }

    /// Returns the cached environments.
    #[must_use]
    pub fn environments(&self) -> &[Environment] {
        &self.environment_list
    }

    /// Returns the selected environment id.
    #[must_use]
    pub const fn selected_environment_id(&self) -> Option<u64> {
        self.selected_env
    }

    /// Returns the selected environment.
    #[must_use]
    pub fn selected_environment(&self) -> Option<&Environment> {
        self.selected_env.and_then(|id| self.environment(id))
    }

    fn environment(&self, id: u64) -> Option<&Environment> {
        self.environment_list.iter().find(|env| env.id == id)
    }

    /// Returns true when the loaded case has unsaved edits.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// Returns the loaded case id.
    #[must_use]
    pub fn loaded_case_id(&self) -> Option<u64> {
        self.tracker.loaded_case_id()
    }

    /// Returns the send slot.
    #[must_use]
    pub const fn send_state(&self) -> &SendState {
        &self.send_state
    }

    /// Applies an edit, recomputes the dirty flag and auto-saves the draft.
    pub async fn apply(&mut self, edit: DraftEdit) {
        edit.apply(&mut self.draft);
        self.tracker.recompute(&self.draft);
        self.autosave().await;
    }

    async fn autosave(&self) {
        if let Err(e) = self.drafts.save_draft(&self.draft).await {
            warn!(error = %e, "failed to save draft");
        }
    }

    /// Selects an environment and persists the choice.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub async fn select_environment(&mut self, environment_id: Option<u64>) -> ApplicationResult<()> {
        if let Some(id) = environment_id
            && self.environment(id).is_none()
        {
            return Err(ApplicationError::NotFound(format!("environment {id}")));
        }
        self.selected_env = environment_id;
        self.drafts
            .save_selection(self.project_id, environment_id)
            .await?;
        info!(environment = ?environment_id, "environment selected");
        Ok(())
    }

    /// Composes the draft against the selected environment.
    ///
    /// # Errors
    /// Returns `ValidationError::MalformedBody` for unparsable JSON.
    pub fn compose(&self) -> Result<ComposedRequest, ValidationError> {
        compose(&self.draft, self.selected_environment())
    }

    /// Renders the draft as a cURL command.
    #[must_use]
    pub fn curl(&self) -> String {
        generate_curl(&self.draft, self.selected_environment())
    }

    /// Lists variables referenced by the URL or headers that the selected
    /// environment does not define.
    #[must_use]
    pub fn unresolved_variables(&self) -> Vec<String> {
        let empty = easytest_domain::VariableMap::new();
        let variables = self
            .selected_environment()
            .map_or(&empty, |env| &env.variables);

        let mut texts = vec![self.draft.url.clone()];
        if let Some(env) = self.selected_environment() {
            texts.push(env.base_url.clone());
            texts.extend(env.headers.values().cloned());
        }
        texts.extend(self.draft.filled_headers().into_iter().map(|row| row.value));

        let mut names: Vec<String> = Vec::new();
        for text in &texts {
            for name in find_unresolved(text, variables) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Composes the draft and sends it through the gateway.
    ///
    /// Gateway failures come back as an `ExecutionResult` with
    /// `success: false`; they are never returned as errors.
    ///
    /// Takes `&mut self`, so one session never has two sends in flight.
    ///
    /// # Errors
    /// Returns `MissingUrl` for an empty URL and `MalformedBody` for
    /// unparsable JSON. Nothing is sent in those cases.
    pub async fn send(&mut self) -> ApplicationResult<ExecutionResult> {
        if self.draft.url.trim().is_empty() {
            return Err(ValidationError::MissingUrl.into());
        }

        let composed = self.compose()?;
        let payload = ExecutePayload::new(
            composed,
            self.timeout_secs,
            self.selected_env,
            &self.draft.pre_script,
            &self.draft.post_script,
        );

        info!(method = %payload.method, url = %payload.url, "sending request");
        let guard = SendingGuard::begin(&mut self.send_state);
        let result = into_result(self.gateway.execute(&payload).await);
        guard.complete(result.clone());
        Ok(result)
    }

    /// Runs a stored case through the gateway in the selected environment.
    ///
    /// Gateway failures come back as a failed `ExecutionResult`.
    pub async fn run_case(&mut self, case_id: u64) -> ExecutionResult {
        info!(case_id, environment = ?self.selected_env, "running test case");
        let guard = SendingGuard::begin(&mut self.send_state);
        let result = into_result(self.gateway.run_case(case_id, self.selected_env).await);
        guard.complete(result.clone());
        result
    }

    /// Switches the draft to a stored case.
    ///
    /// Opening the case that is already loaded does nothing. With unsaved
    /// edits and no `choice`, nothing changes and `NeedsConfirmation` is
    /// returned.
    ///
    /// # Errors
    /// Returns an error if saving (for `SaveThenSwitch`) or loading fails.
    pub async fn open_case(
        &mut self,
        case_id: u64,
        choice: Option<UnsavedChoice>,
    ) -> ApplicationResult<SwitchOutcome> {
        if let Some(outcome) = self.tracker.gate_switch(Some(case_id), choice) {
            return Ok(outcome);
        }
        if self.tracker.is_dirty() && choice == Some(UnsavedChoice::SaveThenSwitch) {
            self.save(false).await?;
        }

        let case = self.cases.get(case_id).await.map_err(|e| {
            if e.is_not_found() {
                ApplicationError::NotFound(format!("test case {case_id}"))
            } else {
                e.into()
            }
        })?;
        self.load_case(&case).await;
        Ok(SwitchOutcome::Switched {
            case_id: Some(case_id),
        })
    }

    async fn load_case(&mut self, case: &ApiTestCase) {
        self.draft = case.to_draft();
        self.tracker.load(case.id, &self.draft);
        self.autosave().await;
        if let Err(e) = self.drafts.save_loaded_case(self.tracker.loaded()).await {
            warn!(error = %e, "failed to save loaded case");
        }
        info!(case_id = case.id, name = %case.name, "test case loaded");
    }

    /// Starts a blank request, with the same unsaved-edit rules as
    /// [`Self::open_case`].
    ///
    /// # Errors
    /// Returns an error if saving (for `SaveThenSwitch`) or storage fails.
    pub async fn new_request(
        &mut self,
        choice: Option<UnsavedChoice>,
    ) -> ApplicationResult<SwitchOutcome> {
        if let Some(outcome) = self.tracker.gate_switch(None, choice) {
            return Ok(outcome);
        }
        if self.tracker.is_dirty() && choice == Some(UnsavedChoice::SaveThenSwitch) {
            self.save(false).await?;
        }
        self.reset().await?;
        Ok(SwitchOutcome::Switched { case_id: None })
    }

    /// Saves the draft as a test case, creating it or updating the loaded one.
    ///
    /// The saved values become the new baseline. With `reset_after`, the
    /// draft is blanked afterwards.
    ///
    /// # Errors
    /// Returns `MissingName`, `MissingUrl` or `MalformedBody` before any
    /// call, or the backend error.
    pub async fn save(&mut self, reset_after: bool) -> ApplicationResult<ApiTestCase> {
        if self.draft.name.trim().is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        if self.draft.url.trim().is_empty() {
            return Err(ValidationError::MissingUrl.into());
        }
        // A case stored without a body loads as blank text and saves back as none.
        let body = if self.draft.body.trim().is_empty() {
            None
        } else {
            build_body(self.draft.body_type, &self.draft.body)?.map(|body| body.to_value())
        };

        let mut input = TestCaseInput::from_draft(&self.draft, body);
        input.project_id = self.project_id;
        input.environment_id = self.selected_env;

        let saved = match self.tracker.loaded_case_id() {
            Some(id) => self.cases.update(id, &input).await?,
            None => self.cases.create(&input).await?,
        };
        info!(case_id = saved.id, name = %saved.name, "test case saved");

        if reset_after {
            self.reset().await?;
        } else {
            self.tracker.mark_saved(saved.id, &self.draft);
            self.drafts.save_loaded_case(self.tracker.loaded()).await?;
        }
        Ok(saved)
    }

    /// Blanks the draft and removes its slot. Requires confirmation.
    ///
    /// Returns `false` and changes nothing when `confirmed` is false.
    ///
    /// # Errors
    /// Returns a storage error if the slots cannot be removed.
    pub async fn clear(&mut self, confirmed: bool) -> ApplicationResult<bool> {
        if !confirmed {
            return Ok(false);
        }
        self.reset().await?;
        Ok(true)
    }

    async fn reset(&mut self) -> ApplicationResult<()> {
        self.draft = DraftRequest::new();
        self.tracker.reset();
        self.drafts.clear_draft().await?;
        self.drafts.save_loaded_case(None).await?;
        Ok(())
    }
}

fn into_result(outcome: Result<ExecutionResult, GatewayError>) -> ExecutionResult {
    match outcome {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "gateway call failed");
            ExecutionResult::failure(e.to_string())
        }
    }
}

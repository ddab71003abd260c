//! Command handlers.

use std::io::Write;

use easytest_application::{
    DeleteCollection, DeleteEnvironment, DraftStore, GetEnvironment, ListCollections,
    ListEnvironments, RunCollection, SaveCollection, SaveEnvironment, SetDefaultEnvironment,
    SwitchOutcome, TestCaseRepository,
};
use easytest_domain::{CaseQuery, CollectionInput, EnvironmentInput};
use serde::Serialize;
use serde_json::json;

use crate::cli::{Command, row_edit, variable_value};
use crate::context::Context;
use crate::error::{CliError, CliResult};

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> CliResult<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn switch_result<W: Write>(out: &mut W, outcome: SwitchOutcome) -> CliResult<()> {
    match outcome {
        SwitchOutcome::NeedsConfirmation { current } => Err(CliError::Usage(format!(
            "test case {current} has unsaved changes, pass --save or --discard"
        ))),
        SwitchOutcome::Cancelled => Err(CliError::Usage("switch cancelled".to_string())),
        SwitchOutcome::Unchanged => {
            writeln!(out, "already open")?;
            Ok(())
        }
        SwitchOutcome::Switched { case_id: Some(id) } => {
            writeln!(out, "opened test case {id}")?;
            Ok(())
        }
        SwitchOutcome::Switched { case_id: None } => {
            writeln!(out, "new request")?;
            Ok(())
        }
    }
}

/// Runs one command, writing its output to `out`.
///
/// # Errors
/// Returns the first failure of the command.
#[allow(clippy::too_many_lines)]
pub async fn run<W: Write>(context: &Context, command: Command, out: &mut W) -> CliResult<()> {
    let project_id = context.config().project_id;
    let client = context.client();

    match command {
        Command::Login { username, password } => {
            let session = client.login(&username, &password).await?;
            let name = session.user.map_or(username, |user| user.username);
            writeln!(out, "signed in as {name}")?;
        }
        Command::Logout => {
            client.logout().await;
            writeln!(out, "signed out")?;
        }
        Command::Whoami => print_json(out, &client.me().await?)?,
        Command::Envs => {
            let listed = ListEnvironments::new(client.clone()).execute(project_id).await?;
            let selected = DraftStore::new(context.store().clone())
                .load_selection(project_id)
                .await
                .or(listed.default_id);
            for env in &listed.environments {
                let marker = if Some(env.id) == selected { '*' } else { ' ' };
                let default = if env.is_default { " (default)" } else { "" };
                writeln!(out, "{marker} {}\t{}\t{}{default}", env.id, env.name, env.base_url)?;
            }
        }
        Command::Env { id } => {
            print_json(out, &GetEnvironment::new(client.clone()).execute(id).await?)?;
        }
        Command::EnvSave {
            id,
            name,
            base_url,
            headers,
            variables,
        } => {
            let input = EnvironmentInput {
                project_id,
                name,
                base_url,
                headers: headers.into_iter().collect(),
                variables: variables
                    .into_iter()
                    .map(|(key, raw)| (key, variable_value(&raw)))
                    .collect(),
                ..EnvironmentInput::default()
            };
            let saved = SaveEnvironment::new(client.clone()).execute(id, &input).await?;
            writeln!(out, "saved environment {} ({})", saved.id, saved.name)?;
        }
        Command::EnvDelete { id } => {
            let drafts = DraftStore::new(context.store().clone());
            DeleteEnvironment::new(client.clone(), drafts)
                .execute(id, project_id)
                .await?;
            writeln!(out, "deleted environment {id}")?;
        }
        Command::EnvDefault { id } => {
            SetDefaultEnvironment::new(client.clone()).execute(id).await?;
            writeln!(out, "environment {id} is now the default")?;
        }
        Command::Use { id } => {
            let mut session = context.session().await;
            session.select_environment(id).await?;
            match session.selected_environment() {
                Some(env) => writeln!(out, "using environment {} ({})", env.id, env.name)?,
                None => writeln!(out, "using no environment")?,
            }
        }
        Command::Set { field, value } => {
            let mut session = context.session().await;
            session.apply(field.edit(value)?).await;
            print_dirty(out, session.is_dirty(), session.loaded_case_id())?;
        }
        Command::Header { key, value } => {
            let mut session = context.session().await;
            session.apply(row_edit(true, key, value)).await;
            print_dirty(out, session.is_dirty(), session.loaded_case_id())?;
        }
        Command::Param { key, value } => {
            let mut session = context.session().await;
            session.apply(row_edit(false, key, value)).await;
            print_dirty(out, session.is_dirty(), session.loaded_case_id())?;
        }
        Command::Show => {
            let session = context.session().await;
            print_json(
                out,
                &json!({
                    "draft": session.draft(),
                    "environment_id": session.selected_environment_id(),
                    "loaded_case_id": session.loaded_case_id(),
                    "dirty": session.is_dirty(),
                }),
            )?;
        }
        Command::Compose => {
            let session = context.session().await;
            let request = session.compose()?;
            print_json(
                out,
                &json!({
                    "request": request,
                    "unresolved": session.unresolved_variables(),
                }),
            )?;
        }
        Command::Curl => {
            let session = context.session().await;
            writeln!(out, "{}", session.curl())?;
        }
        Command::Send => {
            let mut session = context.session().await;
            let result = session.send().await?;
            print_json(out, &result)?;
        }
        Command::Cases { collection } => {
            let query = CaseQuery {
                project_id,
                collection_id: collection,
            };
            for case in TestCaseRepository::list(client.as_ref(), query).await? {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    case.id,
                    case.method.as_str(),
                    case.name,
                    case.url
                )?;
            }
        }
        Command::Open { id, unsaved } => {
            let mut session = context.session().await;
            let outcome = session.open_case(id, unsaved.choice()).await?;
            switch_result(out, outcome)?;
        }
        Command::Run { id } => {
            let mut session = context.session().await;
            let result = session.run_case(id).await;
            print_json(out, &result)?;
        }
        Command::Collections => {
            for collection in ListCollections::new(client.clone()).execute(project_id).await? {
                writeln!(
                    out,
                    "{}\t{}\t{} cases",
                    collection.id, collection.name, collection.case_count
                )?;
            }
        }
        Command::CollectionSave {
            id,
            name,
            description,
        } => {
            let input = CollectionInput {
                name,
                description,
                project_id,
            };
            let saved = SaveCollection::new(client.clone()).execute(id, &input).await?;
            writeln!(out, "saved collection {} ({})", saved.id, saved.name)?;
        }
        Command::CollectionDelete { id } => {
            DeleteCollection::new(client.clone()).execute(id).await?;
            writeln!(out, "deleted collection {id}")?;
        }
        Command::RunCollection { id, env } => {
            let run = RunCollection::new(client.clone()).execute(id, env).await?;
            print_json(out, &run)?;
        }
        Command::Save { reset } => {
            let mut session = context.session().await;
            let saved = session.save(reset).await?;
            writeln!(out, "saved test case {} ({})", saved.id, saved.name)?;
        }
        Command::Clear { yes } => {
            let mut session = context.session().await;
            if !session.clear(yes).await? {
                return Err(CliError::Usage("pass --yes to clear the draft".to_string()));
            }
            writeln!(out, "draft cleared")?;
        }
        Command::New { unsaved } => {
            let mut session = context.session().await;
            let outcome = session.new_request(unsaved.choice()).await?;
            switch_result(out, outcome)?;
        }
        Command::Config { save } => {
            print_json(out, context.config())?;
            if save {
                let path = context.config_repository().save(context.config()).await?;
                writeln!(out, "written to {}", path.display())?;
            }
        }
    }
    Ok(())
}

fn print_dirty<W: Write>(out: &mut W, dirty: bool, loaded: Option<u64>) -> CliResult<()> {
    match (dirty, loaded) {
        (true, Some(id)) => writeln!(out, "draft updated, test case {id} has unsaved changes")?,
        _ => writeln!(out, "draft updated")?,
    }
    Ok(())
}

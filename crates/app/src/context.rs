//! Wiring of adapters for one invocation.

use std::path::PathBuf;
use std::sync::Arc;

use easytest_application::{RefreshCoordinator, SessionStore, WorkspacePorts, WorkspaceSession};
use easytest_domain::ClientConfig;
use easytest_infrastructure::{ConfigRepository, FileKeyValueStore, PlatformClient, RefreshEndpoint};

use crate::cli::Opts;
use crate::error::{CliError, CliResult};

/// Loads the configuration: file, then `EASYTEST_*`, then flags.
///
/// # Errors
/// Returns an error if the file or an override is invalid.
pub async fn load_config(opts: &Opts) -> CliResult<(ConfigRepository, ClientConfig)> {
    let repository = opts
        .config_dir
        .as_ref()
        .map_or_else(ConfigRepository::new, ConfigRepository::in_dir);
    let mut config = repository.load_with_env().await?;
    if let Some(base_url) = &opts.base_url {
        config.base_url.clone_from(base_url);
    }
    if opts.project.is_some() {
        config.project_id = opts.project;
    }
    if let Some(log) = &opts.log {
        config.log_level.clone_from(log);
    }
    Ok((repository, config))
}

/// Adapters shared by the commands.
pub struct Context {
    config: ClientConfig,
    config_repository: ConfigRepository,
    store: Arc<FileKeyValueStore>,
    client: Arc<PlatformClient>,
}

impl Context {
    /// Opens storage, restores the auth session and builds the client.
    ///
    /// # Errors
    /// Returns an error if no data directory is known or the HTTP client
    /// cannot be created.
    pub async fn build(
        data_dir: Option<PathBuf>,
        config_repository: ConfigRepository,
        config: ClientConfig,
    ) -> CliResult<Self> {
        let root = data_dir
            .or_else(FileKeyValueStore::default_root)
            .ok_or(CliError::NoDataDir)?;
        let store = Arc::new(FileKeyValueStore::open(root));

        let sessions = SessionStore::new(store.clone());
        sessions.load().await;

        let http = PlatformClient::http_client(&config)?;
        let issuer = Arc::new(RefreshEndpoint::new(http.clone(), &config));
        let auth = Arc::new(RefreshCoordinator::new(sessions, issuer));
        let client = Arc::new(PlatformClient::with_client(http, &config, auth));

        tracing::debug!(api = %config.api_root(), storage = %store.root().display(), "context ready");
        Ok(Self {
            config,
            config_repository,
            store,
            client,
        })
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Configuration file access.
    #[must_use]
    pub const fn config_repository(&self) -> &ConfigRepository {
        &self.config_repository
    }

    /// Local slot storage.
    #[must_use]
    pub const fn store(&self) -> &Arc<FileKeyValueStore> {
        &self.store
    }

    /// Platform client.
    #[must_use]
    pub const fn client(&self) -> &Arc<PlatformClient> {
        &self.client
    }

    /// Ports handed to the workspace session.
    #[must_use]
    pub fn ports(&self) -> WorkspacePorts {
        WorkspacePorts {
            store: self.store.clone(),
            environments: self.client.clone(),
            cases: self.client.clone(),
            gateway: self.client.clone(),
        }
    }

    /// A mounted workspace session.
    pub async fn session(&self) -> WorkspaceSession {
        let mut session = WorkspaceSession::new(
            self.ports(),
            self.config.project_id,
            self.config.execute_timeout_secs,
        );
        session.mount().await;
        session
    }
}

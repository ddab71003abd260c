//! Client configuration
//!
//! Connection and workspace preferences for the EasyTest client.

use serde::{Deserialize, Serialize};

/// Client configuration loaded from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Platform server origin.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Prefix of every API route.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Client-side HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Timeout forwarded to the execution gateway, in seconds.
    #[serde(default = "default_timeout")]
    pub execute_timeout_secs: u64,

    /// Project used to scope environments and test cases.
    #[serde(default)]
    pub project_id: Option<u64>,

    /// Tracing filter directive.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5211".to_string()
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            request_timeout_secs: default_timeout(),
            execute_timeout_secs: default_timeout(),
            project_id: None,
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Returns the API root, e.g. `http://127.0.0.1:5211/api/v1`.
    #[must_use]
    pub fn api_root(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix.trim_matches('/')
        )
    }
}

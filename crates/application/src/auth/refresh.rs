//! Single-flight access token refresh.
//!
//! Any number of calls may observe a 401 at the same time. Only the first
//! one to take the gate talks to the issuer; the others find a token that
//! differs from the one they were rejected with and reuse it.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::SessionStore;
use crate::ports::{GatewayError, TokenIssuer};

/// Serializes refresh attempts over a shared session.
pub struct RefreshCoordinator {
    sessions: SessionStore,
    issuer: Arc<dyn TokenIssuer>,
    gate: Mutex<()>,
}

impl RefreshCoordinator {
    /// Creates a coordinator over a session holder and a token issuer.
    #[must_use]
    pub fn new(sessions: SessionStore, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            sessions,
            issuer,
            gate: Mutex::new(()),
        }
    }

    /// The session holder this coordinator updates.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Returns a usable access token after `stale` was rejected.
    ///
    /// # Errors
    /// Returns `GatewayError::Unauthorized` when there is no session, no
    /// refresh token, or the issuer refuses. The session is cleared in the
    /// last two cases.
    pub async fn refresh(&self, stale: &str) -> Result<String, GatewayError> {
        let _gate = self.gate.lock().await;

        let Some(session) = self.sessions.current().await else {
            return Err(GatewayError::Unauthorized);
        };
        if session.access_token != stale {
            tracing::debug!("access token already refreshed");
            return Ok(session.access_token);
        }
        let Some(refresh_token) = session.refresh_token else {
            self.sessions.clear().await;
            return Err(GatewayError::Unauthorized);
        };

        match self.issuer.refresh(&refresh_token).await {
            Ok(token) => {
                if let Err(error) = self.sessions.set_access_token(&token).await {
                    tracing::warn!(%error, "refreshed token not persisted");
                }
                tracing::info!("access token refreshed");
                Ok(token)
            }
            Err(error) => {
                tracing::warn!(%error, "token refresh failed, signing out");
                self.sessions.clear().await;
                Err(GatewayError::Unauthorized)
            }
        }
    }

    /// Ends the session locally.
    pub async fn logout(&self) {
        let _gate = self.gate.lock().await;
        self.sessions.clear().await;
    }
}

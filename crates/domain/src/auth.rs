//! Authentication session types.

use serde::{Deserialize, Serialize};

/// The signed-in user as reported by `/auth/login` and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend identifier.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Credentials posted to `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Tokens returned by `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Token used to obtain new access tokens.
    pub refresh_token: String,
    /// The signed-in user.
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Body returned by `/auth/refresh`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    /// New bearer token.
    pub access_token: String,
}

/// Persisted authentication state.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Current bearer token.
    pub access_token: String,
    /// Refresh token, absent when the backend did not issue one.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// The signed-in user.
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl AuthSession {
    /// Creates a session from a login response.
    #[must_use]
    pub fn from_login(response: LoginResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: Some(response.refresh_token),
            user: response.user,
        }
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

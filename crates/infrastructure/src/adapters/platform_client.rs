//! Platform API client using reqwest.
//!
//! Implements the environment, test case, collection and execution ports
//! against the
//! platform backend. Every call carries the current bearer token; a 401
//! triggers one shared refresh and a single retry of the original call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use easytest_application::{
    CollectionRepository, EnvironmentRepository, ExecutionGateway, GatewayError,
    RefreshCoordinator, TestCaseRepository,
};
use easytest_domain::{
    ApiTestCase, AuthSession, CaseQuery, ClientConfig, Collection, CollectionInput, CollectionRun,
    Environment, EnvironmentInput, ExecutePayload, ExecutionResult, LoginRequest, LoginResponse,
    TestCaseInput, UserProfile,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use super::envelope::{read_envelope, required, transport_error};

/// HTTP client for the platform backend.
pub struct PlatformClient {
    client: Client,
    api_root: String,
    request_timeout: Duration,
    auth: Arc<RefreshCoordinator>,
}

impl PlatformClient {
    /// Creates a client for a configured platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig, auth: Arc<RefreshCoordinator>) -> Result<Self, GatewayError> {
        Ok(Self::with_client(Self::http_client(config)?, config, auth))
    }

    /// Creates a client around an existing reqwest client.
    #[must_use]
    pub fn with_client(client: Client, config: &ClientConfig, auth: Arc<RefreshCoordinator>) -> Self {
        Self {
            client,
            api_root: config.api_root(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            auth,
        }
    }

    /// Builds the reqwest client shared with the refresh endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn http_client(config: &ClientConfig) -> Result<Client, GatewayError> {
        Client::builder()
            .user_agent(concat!("easytest/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))
    }

    /// The session coordinator used for bearer tokens.
    #[must_use]
    pub const fn auth(&self) -> &Arc<RefreshCoordinator> {
        &self.auth
    }

    /// Signs in and stores the session.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Status` for rejected credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, GatewayError> {
        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .request(Method::POST, "/auth/login", &[])?
            .json(&credentials)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;
        let data: Option<LoginResponse> = read_envelope(response).await?;
        let session = AuthSession::from_login(required(data, "login tokens")?);

        if let Err(error) = self.auth.sessions().save(session.clone()).await {
            tracing::warn!(%error, "session not persisted");
        }
        tracing::info!(username, "signed in");
        Ok(session)
    }

    /// Returns the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unauthorized` when signed out.
    pub async fn me(&self) -> Result<UserProfile, GatewayError> {
        let data = self.call(self.request(Method::GET, "/auth/me", &[])?).await?;
        required(data, "user")
    }

    /// Ends the session locally.
    pub async fn logout(&self) {
        self.auth.logout().await;
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&format!("{}{path}", self.api_root))
            .map_err(|e| GatewayError::Network(format!("invalid platform URL: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<RequestBuilder, GatewayError> {
        Ok(self.client.request(method, self.endpoint(path, query)?))
    }

    async fn dispatch(request: RequestBuilder, token: Option<&str>) -> Result<Response, GatewayError> {
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        request.send().await.map_err(|e| transport_error(&e))
    }

    /// Sends an authenticated call, refreshing and retrying once on 401.
    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>, GatewayError> {
        let token = self.auth.sessions().access_token().await;
        let retry = request.try_clone();

        let response = Self::dispatch(request, token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return read_envelope(response).await;
        }

        let (Some(stale), Some(retry)) = (token, retry) else {
            return Err(GatewayError::Unauthorized);
        };
        tracing::debug!("access token rejected, refreshing");
        let fresh = self.auth.refresh(&stale).await?;

        let response = Self::dispatch(retry, Some(&fresh)).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("refreshed token rejected, signing out");
            self.auth.logout().await;
            return Err(GatewayError::Unauthorized);
        }
        read_envelope(response).await
    }

    async fn call_unit(&self, request: RequestBuilder) -> Result<(), GatewayError> {
        let _: Option<serde_json::Value> = self.call(request).await?;
        Ok(())
    }
}

fn project_query(project_id: Option<u64>) -> Vec<(&'static str, String)> {
    project_id
        .map(|id| ("project_id", id.to_string()))
        .into_iter()
        .collect()
}

#[async_trait]
impl EnvironmentRepository for PlatformClient {
    async fn list(&self, project_id: Option<u64>) -> Result<Vec<Environment>, GatewayError> {
        let request = self.request(Method::GET, "/environments", &project_query(project_id))?;
        Ok(self.call(request).await?.unwrap_or_default())
    }

    async fn get(&self, id: u64) -> Result<Environment, GatewayError> {
        let request = self.request(Method::GET, &format!("/environments/{id}"), &[])?;
        required(self.call(request).await?, "environment")
    }

    async fn create(&self, input: &EnvironmentInput) -> Result<Environment, GatewayError> {
        let request = self.request(Method::POST, "/environments", &[])?.json(input);
        required(self.call(request).await?, "environment")
    }

    async fn update(&self, id: u64, input: &EnvironmentInput) -> Result<Environment, GatewayError> {
        let request = self
            .request(Method::PUT, &format!("/environments/{id}"), &[])?
            .json(input);
        required(self.call(request).await?, "environment")
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        self.call_unit(self.request(Method::DELETE, &format!("/environments/{id}"), &[])?)
            .await
    }

    async fn set_default(&self, id: u64) -> Result<(), GatewayError> {
        self.call_unit(self.request(Method::POST, &format!("/environments/{id}/default"), &[])?)
            .await
    }
}

#[async_trait]
impl TestCaseRepository for PlatformClient {
    async fn list(&self, query: CaseQuery) -> Result<Vec<ApiTestCase>, GatewayError> {
        let mut params = project_query(query.project_id);
        if let Some(collection_id) = query.collection_id {
            params.push(("collection_id", collection_id.to_string()));
        }
        let request = self.request(Method::GET, "/api-test/cases", &params)?;
        Ok(self.call(request).await?.unwrap_or_default())
    }

    async fn get(&self, id: u64) -> Result<ApiTestCase, GatewayError> {
        let request = self.request(Method::GET, &format!("/api-test/cases/{id}"), &[])?;
        required(self.call(request).await?, "test case")
    }

    async fn create(&self, input: &TestCaseInput) -> Result<ApiTestCase, GatewayError> {
        let request = self.request(Method::POST, "/api-test/cases", &[])?.json(input);
        required(self.call(request).await?, "test case")
    }

    async fn update(&self, id: u64, input: &TestCaseInput) -> Result<ApiTestCase, GatewayError> {
        let request = self
            .request(Method::PUT, &format!("/api-test/cases/{id}"), &[])?
            .json(input);
        required(self.call(request).await?, "test case")
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        self.call_unit(self.request(Method::DELETE, &format!("/api-test/cases/{id}"), &[])?)
            .await
    }
}

#[async_trait]
impl CollectionRepository for PlatformClient {
    async fn list(&self, project_id: Option<u64>) -> Result<Vec<Collection>, GatewayError> {
        let query = project_query(project_id);
        let request = self.request(Method::GET, "/api-test/collections", &query)?;
        Ok(self.call(request).await?.unwrap_or_default())
    }

    async fn create(&self, input: &CollectionInput) -> Result<Collection, GatewayError> {
        let request = self.request(Method::POST, "/api-test/collections", &[])?.json(input);
        required(self.call(request).await?, "collection")
    }

    async fn update(&self, id: u64, input: &CollectionInput) -> Result<Collection, GatewayError> {
        let request = self
            .request(Method::PUT, &format!("/api-test/collections/{id}"), &[])?
            .json(input);
        required(self.call(request).await?, "collection")
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        self.call_unit(self.request(Method::DELETE, &format!("/api-test/collections/{id}"), &[])?)
            .await
    }

    async fn run(&self, id: u64, env_id: Option<u64>) -> Result<CollectionRun, GatewayError> {
        // An absent env_id lets every case keep its own environment.
        let body = env_id.map_or_else(|| json!({}), |env_id| json!({ "env_id": env_id }));
        let request = self
            .request(Method::POST, &format!("/api-test/collections/{id}/run"), &[])?
            .json(&body);
        required(self.call(request).await?, "collection run")
    }
}

#[async_trait]
impl ExecutionGateway for PlatformClient {
    async fn execute(&self, payload: &ExecutePayload) -> Result<ExecutionResult, GatewayError> {
        // The gateway may spend the whole forwarded timeout on the target.
        let timeout = self.request_timeout + Duration::from_secs(payload.timeout);
        let request = self
            .request(Method::POST, "/api-test/execute", &[])?
            .timeout(timeout)
            .json(payload);
        tracing::debug!(method = %payload.method.as_str(), url = %payload.url, "executing request");
        required(self.call(request).await?, "execution result")
    }

    async fn run_case(
        &self,
        case_id: u64,
        env_id: Option<u64>,
    ) -> Result<ExecutionResult, GatewayError> {
        let query: Vec<_> = env_id.map(|id| ("env_id", id.to_string())).into_iter().collect();
        let request = self.request(Method::POST, &format!("/api-test/cases/{case_id}/run"), &query)?;
        required(self.call(request).await?, "execution result")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::adapters::RefreshEndpoint;
    use crate::persistence::FileKeyValueStore;
    use easytest_application::{KeyValueStore, SESSION_KEY, SessionStore};
    use easytest_domain::{DraftRequest, HttpMethod};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Harness {
        client: PlatformClient,
        store: Arc<FileKeyValueStore>,
        _dir: TempDir,
    }

    async fn harness(server: &MockServer, access_token: Option<&str>) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileKeyValueStore::open(dir.path()));
        let sessions = SessionStore::new(store.clone());
        if let Some(token) = access_token {
            sessions
                .save(AuthSession {
                    access_token: token.to_string(),
                    refresh_token: Some("refresh-1".to_string()),
                    user: None,
                })
                .await
                .unwrap();
        }
        let config = ClientConfig {
            base_url: server.uri(),
            ..ClientConfig::default()
        };
        let http = PlatformClient::http_client(&config).unwrap();
        let issuer = Arc::new(RefreshEndpoint::new(http.clone(), &config));
        let auth = Arc::new(RefreshCoordinator::new(sessions, issuer));
        Harness {
            client: PlatformClient::with_client(http, &config, auth),
            store,
            _dir: dir,
        }
    }

    fn envelope(data: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "success",
            "data": data,
            "timestamp": "2024-05-01T10:00:00"
        }))
    }

    #[tokio::test]
    async fn test_list_environments_sends_bearer_and_project() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/environments"))
            .and(query_param("project_id", "7"))
            .and(header("authorization", "Bearer access-1"))
            .respond_with(envelope(json!([
                {"id": 1, "name": "dev", "base_url": "http://localhost:8000", "headers": null, "variables": {"token": "abc"}, "is_default": true}
            ])))
            .mount(&server)
            .await;

        let h = harness(&server, Some("access-1")).await;
        let environments = EnvironmentRepository::list(&h.client, Some(7)).await.unwrap();

        assert_eq!(environments.len(), 1);
        assert_eq!(environments[0].variable_text("token").as_deref(), Some("abc"));
        assert!(environments[0].headers.is_empty());
    }

    #[tokio::test]
    async fn test_execute_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/api-test/execute"))
            .and(body_partial_json(json!({
                "method": "POST",
                "url": "http://localhost:8000/users",
                "headers": {"Content-Type": "application/json"},
                "body": {"name": "ada"},
                "body_type": "json",
                "timeout": 30,
                "env_id": 1
            })))
            .respond_with(envelope(json!({
                "success": true,
                "status_code": 201,
                "headers": {"content-type": "application/json"},
                "body": {"id": 5},
                "response_time": 12.5,
                "response_size": "1.2 KB"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, Some("access-1")).await;
        let draft = DraftRequest {
            method: HttpMethod::Post,
            url: "/users".to_string(),
            body: r#"{"name": "ada"}"#.to_string(),
            ..DraftRequest::default()
        };
        let environment = Environment::new(1, "dev", "http://localhost:8000");
        let composed = easytest_application::compose(&draft, Some(&environment)).unwrap();
        let payload = ExecutePayload::new(composed, 30, Some(1), "", "");

        let result = h.client.execute(&payload).await.unwrap();
        assert!(result.success);
        assert_eq!(result.status_code, Some(201));
        assert_eq!(result.body, Some(json!({"id": 5})));
    }

    #[tokio::test]
    async fn test_run_case_passes_env_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/api-test/cases/42/run"))
            .and(query_param("env_id", "3"))
            .respond_with(envelope(json!({"success": false, "error": "connection refused"})))
            .mount(&server)
            .await;

        let h = harness(&server, Some("access-1")).await;
        let result = h.client.run_case(42, Some(3)).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn test_list_collections_by_project() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/api-test/collections"))
            .and(query_param("project_id", "7"))
            .respond_with(envelope(json!([
                {"id": 2, "project_id": 7, "parent_id": null, "name": "smoke", "description": null,
                 "sort_order": 0, "case_count": 3, "created_at": "2024-05-01T09:00:00", "updated_at": null}
            ])))
            .mount(&server)
            .await;

        let h = harness(&server, Some("access-1")).await;
        let collections = CollectionRepository::list(&h.client, Some(7)).await.unwrap();

        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].name, "smoke");
        assert_eq!(collections[0].case_count, 3);
    }

    #[tokio::test]
    async fn test_create_collection_posts_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/api-test/collections"))
            .and(body_partial_json(json!({"name": "smoke", "description": "", "project_id": 7})))
            .respond_with(envelope(json!({"id": 9, "name": "smoke", "project_id": 7})))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, Some("access-1")).await;
        let input = CollectionInput {
            name: "smoke".to_string(),
            project_id: Some(7),
            ..CollectionInput::default()
        };
        let created = CollectionRepository::create(&h.client, &input).await.unwrap();
        assert_eq!(created.id, 9);
    }

    #[tokio::test]
    async fn test_run_collection_sends_env_id_in_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/api-test/collections/2/run"))
            .and(body_partial_json(json!({"env_id": 3})))
            .respond_with(envelope(json!({
                "test_run_id": 11, "report_id": 12, "total": 2, "passed": 1, "failed": 1,
                "duration": 40.0,
                "results": [
                    {"case_id": 1, "name": "ok", "method": "GET", "url": "http://a/1", "passed": true, "status_code": 200},
                    {"case_id": 2, "name": "bad", "method": "GET", "url": "http://a/2", "passed": false, "status_code": 500}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, Some("access-1")).await;
        let run = CollectionRepository::run(&h.client, 2, Some(3)).await.unwrap();

        assert_eq!(run.total, 2);
        assert_eq!(run.failed, 1);
        assert_eq!(run.results[1].status_code, Some(500));
    }

    #[tokio::test]
    async fn test_delete_missing_collection_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/api-test/collections/5"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Collection not found"})),
            )
            .mount(&server)
            .await;

        let h = harness(&server, Some("access-1")).await;
        let error = CollectionRepository::delete(&h.client, 5).await.unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_not_found_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/api-test/cases/9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": 404,
                "message": "Test case not found",
                "data": null
            })))
            .mount(&server)
            .await;

        let h = harness(&server, Some("access-1")).await;
        let error = TestCaseRepository::get(&h.client, 9).await.unwrap_err();
        assert!(error.is_not_found());
        assert_eq!(
            error,
            GatewayError::Status {
                status: 404,
                message: "Test case not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_envelope_error_code_in_ok_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/environments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 422,
                "message": "name already exists",
                "data": null
            })))
            .mount(&server)
            .await;

        let h = harness(&server, Some("access-1")).await;
        let input = EnvironmentInput {
            name: "dev".to_string(),
            ..EnvironmentInput::default()
        };
        let error = EnvironmentRepository::create(&h.client, &input).await.unwrap_err();
        assert_eq!(
            error,
            GatewayError::Status {
                status: 422,
                message: "name already exists".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_concurrent_401s_refresh_once_and_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/environments"))
            .and(header("authorization", "Bearer expired"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/environments"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(envelope(json!([{"id": 1, "name": "dev"}])))
            .expect(3)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/refresh"))
            .and(header("authorization", "Bearer refresh-1"))
            .respond_with(
                envelope(json!({"access_token": "fresh"})).set_delay(Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, Some("expired")).await;
        let (a, b, c) = tokio::join!(
            EnvironmentRepository::list(&h.client, None),
            EnvironmentRepository::list(&h.client, None),
            EnvironmentRepository::list(&h.client, None),
        );

        assert_eq!(a.unwrap().len(), 1);
        assert_eq!(b.unwrap().len(), 1);
        assert_eq!(c.unwrap().len(), 1);
        assert_eq!(
            h.client.auth().sessions().access_token().await.as_deref(),
            Some("fresh")
        );
        let persisted = h.store.get(SESSION_KEY).await.unwrap().unwrap();
        assert!(persisted.contains("fresh"));
    }

    #[tokio::test]
    async fn test_failed_refresh_logs_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/refresh"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let h = harness(&server, Some("expired")).await;
        assert_eq!(h.client.me().await, Err(GatewayError::Unauthorized));
        assert_eq!(h.client.auth().sessions().current().await, None);
        assert_eq!(h.store.get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_401_without_session_does_not_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/refresh"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let h = harness(&server, None).await;
        assert_eq!(h.client.me().await, Err(GatewayError::Unauthorized));
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .and(body_partial_json(json!({"username": "ada", "password": "secret"})))
            .respond_with(envelope(json!({
                "access_token": "access-9",
                "refresh_token": "refresh-9",
                "user": {"id": 1, "username": "ada", "email": null}
            })))
            .mount(&server)
            .await;

        let h = harness(&server, None).await;
        let session = h.client.login("ada", "secret").await.unwrap();
        assert_eq!(session.access_token, "access-9");
        assert_eq!(session.user.map(|u| u.username).as_deref(), Some("ada"));

        let reloaded = SessionStore::new(h.store.clone());
        assert_eq!(
            reloaded.load().await.and_then(|s| s.refresh_token).as_deref(),
            Some("refresh-9")
        );
    }
}

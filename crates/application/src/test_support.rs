//! In-memory port implementations shared by the unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use easytest_domain::{
    ApiTestCase, CaseQuery, Collection, CollectionInput, CollectionRun, Environment,
    EnvironmentInput, ExecutePayload, ExecutionResult, TestCaseInput,
};

use crate::ports::{
    CollectionRepository, EnvironmentRepository, ExecutionGateway, GatewayError, KeyValueStore,
    StorageError, TestCaseRepository,
};

#[derive(Default)]
pub struct MemoryStore {
    pub slots: Mutex<HashMap<String, String>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn with_slot(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .slots
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn slot(&self, key: &str) -> Option<String> {
        self.slots.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slot(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write {
                key: key.to_string(),
                message: "disk full".to_string(),
            });
        }
        self.slots
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeEnvironments {
    pub environments: Mutex<Vec<Environment>>,
    pub default_calls: Mutex<Vec<u64>>,
}

impl FakeEnvironments {
    pub fn with(environments: Vec<Environment>) -> Self {
        Self {
            environments: Mutex::new(environments),
            default_calls: Mutex::new(Vec::new()),
        }
    }
}

fn not_found(what: &str, id: u64) -> GatewayError {
    GatewayError::Status {
        status: 404,
        message: format!("{what} {id} not found"),
    }
}

#[async_trait]
impl EnvironmentRepository for FakeEnvironments {
    async fn list(&self, project_id: Option<u64>) -> Result<Vec<Environment>, GatewayError> {
        Ok(self
            .environments
            .lock()
            .unwrap()
            .iter()
            .filter(|env| project_id.is_none() || env.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: u64) -> Result<Environment, GatewayError> {
        self.environments
            .lock()
            .unwrap()
            .iter()
            .find(|env| env.id == id)
            .cloned()
            .ok_or_else(|| not_found("environment", id))
    }

    async fn create(&self, input: &EnvironmentInput) -> Result<Environment, GatewayError> {
        let mut environments = self.environments.lock().unwrap();
        let id = environments.iter().map(|env| env.id).max().unwrap_or(0) + 1;
        let environment = Environment {
            id,
            project_id: input.project_id,
            name: input.name.clone(),
            base_url: input.base_url.clone(),
            headers: input.headers.clone(),
            variables: input.variables.clone(),
            is_default: input.is_default,
            description: input.description.clone(),
        };
        environments.push(environment.clone());
        Ok(environment)
    }

    async fn update(&self, id: u64, input: &EnvironmentInput) -> Result<Environment, GatewayError> {
        let mut environments = self.environments.lock().unwrap();
        let env = environments
            .iter_mut()
            .find(|env| env.id == id)
            .ok_or_else(|| not_found("environment", id))?;
        env.name.clone_from(&input.name);
        env.base_url.clone_from(&input.base_url);
        env.headers.clone_from(&input.headers);
        env.variables.clone_from(&input.variables);
        Ok(env.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        let mut environments = self.environments.lock().unwrap();
        let before = environments.len();
        environments.retain(|env| env.id != id);
        if environments.len() == before {
            return Err(not_found("environment", id));
        }
        Ok(())
    }

    async fn set_default(&self, id: u64) -> Result<(), GatewayError> {
        self.default_calls.lock().unwrap().push(id);
        let mut environments = self.environments.lock().unwrap();
        for env in environments.iter_mut() {
            env.is_default = env.id == id;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeCases {
    pub cases: Mutex<BTreeMap<u64, ApiTestCase>>,
    pub created: Mutex<Vec<TestCaseInput>>,
    pub updated: Mutex<Vec<(u64, TestCaseInput)>>,
}

impl FakeCases {
    pub fn with(cases: Vec<ApiTestCase>) -> Self {
        let fake = Self::default();
        {
            let mut map = fake.cases.lock().unwrap();
            for case in cases {
                map.insert(case.id, case);
            }
        }
        fake
    }
}

fn case_from_input(id: u64, input: &TestCaseInput) -> ApiTestCase {
    ApiTestCase {
        id,
        name: input.name.clone(),
        description: String::new(),
        method: input.method,
        url: input.url.clone(),
        headers: input.headers.clone().into_iter().collect(),
        params: input.params.clone().into_iter().collect(),
        body: input.body.clone(),
        body_type: input.body_type,
        pre_script: input.pre_script.clone(),
        post_script: input.post_script.clone(),
        environment_id: input.environment_id,
        project_id: input.project_id,
        collection_id: input.collection_id,
        timeout: 30,
        last_status: None,
        last_run_at: None,
    }
}

#[async_trait]
impl TestCaseRepository for FakeCases {
    async fn list(&self, query: CaseQuery) -> Result<Vec<ApiTestCase>, GatewayError> {
        Ok(self
            .cases
            .lock()
            .unwrap()
            .values()
            .filter(|case| query.project_id.is_none() || case.project_id == query.project_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: u64) -> Result<ApiTestCase, GatewayError> {
        self.cases
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("case", id))
    }

    async fn create(&self, input: &TestCaseInput) -> Result<ApiTestCase, GatewayError> {
        self.created.lock().unwrap().push(input.clone());
        let mut cases = self.cases.lock().unwrap();
        let id = cases.keys().max().copied().unwrap_or(0) + 1;
        let case = case_from_input(id, input);
        cases.insert(id, case.clone());
        Ok(case)
    }

    async fn update(&self, id: u64, input: &TestCaseInput) -> Result<ApiTestCase, GatewayError> {
        self.updated.lock().unwrap().push((id, input.clone()));
        let mut cases = self.cases.lock().unwrap();
        if !cases.contains_key(&id) {
            return Err(not_found("case", id));
        }
        let case = case_from_input(id, input);
        cases.insert(id, case.clone());
        Ok(case)
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        self.cases
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("case", id))
    }
}

pub struct FakeGateway {
    pub payloads: Mutex<Vec<ExecutePayload>>,
    pub runs: Mutex<Vec<(u64, Option<u64>)>>,
    pub response: Result<ExecutionResult, GatewayError>,
}

impl FakeGateway {
    pub fn ok(result: ExecutionResult) -> Self {
        Self {
            payloads: Mutex::new(Vec::new()),
            runs: Mutex::new(Vec::new()),
            response: Ok(result),
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        Self {
            payloads: Mutex::new(Vec::new()),
            runs: Mutex::new(Vec::new()),
            response: Err(error),
        }
    }

    pub fn sent(&self) -> Vec<ExecutePayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionGateway for FakeGateway {
    async fn execute(&self, payload: &ExecutePayload) -> Result<ExecutionResult, GatewayError> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.response.clone()
    }

    async fn run_case(
        &self,
        case_id: u64,
        env_id: Option<u64>,
    ) -> Result<ExecutionResult, GatewayError> {
        self.runs.lock().unwrap().push((case_id, env_id));
        self.response.clone()
    }
}

/// A gateway whose calls never complete.
pub struct StalledGateway;

#[async_trait]
impl ExecutionGateway for StalledGateway {
    async fn execute(&self, _payload: &ExecutePayload) -> Result<ExecutionResult, GatewayError> {
        std::future::pending().await
    }

    async fn run_case(
        &self,
        _case_id: u64,
        _env_id: Option<u64>,
    ) -> Result<ExecutionResult, GatewayError> {
        std::future::pending().await
    }
}

#[derive(Default)]
pub struct FakeCollections {
    pub collections: Mutex<Vec<Collection>>,
    pub runs: Mutex<Vec<(u64, Option<u64>)>>,
}

impl FakeCollections {
    pub fn with(collections: Vec<Collection>) -> Self {
        Self {
            collections: Mutex::new(collections),
            runs: Mutex::new(Vec::new()),
        }
    }
}

pub fn collection(id: u64, name: &str, case_count: u64) -> Collection {
    Collection {
        id,
        name: name.to_string(),
        description: String::new(),
        project_id: None,
        parent_id: None,
        sort_order: 0,
        case_count,
        created_at: None,
    }
}

#[async_trait]
impl CollectionRepository for FakeCollections {
    async fn list(&self, project_id: Option<u64>) -> Result<Vec<Collection>, GatewayError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .iter()
            .filter(|c| project_id.is_none() || c.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create(&self, input: &CollectionInput) -> Result<Collection, GatewayError> {
        let mut collections = self.collections.lock().unwrap();
        let id = collections.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = Collection {
            description: input.description.clone(),
            project_id: input.project_id,
            ..collection(id, &input.name, 0)
        };
        collections.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: u64, input: &CollectionInput) -> Result<Collection, GatewayError> {
        let mut collections = self.collections.lock().unwrap();
        let existing = collections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("collection", id))?;
        existing.name.clone_from(&input.name);
        existing.description.clone_from(&input.description);
        Ok(existing.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        let mut collections = self.collections.lock().unwrap();
        let before = collections.len();
        collections.retain(|c| c.id != id);
        if collections.len() == before {
            return Err(not_found("collection", id));
        }
        Ok(())
    }

    async fn run(&self, id: u64, env_id: Option<u64>) -> Result<CollectionRun, GatewayError> {
        let total = self
            .collections
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.case_count)
            .ok_or_else(|| not_found("collection", id))?;
        self.runs.lock().unwrap().push((id, env_id));
        Ok(CollectionRun {
            test_run_id: Some(1),
            report_id: Some(1),
            total,
            passed: total,
            failed: 0,
            duration: 5.0,
            results: Vec::new(),
        })
    }
}

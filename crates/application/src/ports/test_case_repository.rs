//! Test case repository port

use async_trait::async_trait;
use easytest_domain::{ApiTestCase, CaseQuery, TestCaseInput};

use super::GatewayError;

/// Repository trait for stored API test cases.
#[async_trait]
pub trait TestCaseRepository: Send + Sync {
    /// Lists test cases matching the query.
    ///
    /// # Errors
    /// Returns an error if the backend call fails.
    async fn list(&self, query: CaseQuery) -> Result<Vec<ApiTestCase>, GatewayError>;

    /// Loads one test case.
    ///
    /// # Errors
    /// Returns a 404 `GatewayError::Status` if it does not exist.
    async fn get(&self, id: u64) -> Result<ApiTestCase, GatewayError>;

    /// Creates a test case.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the input.
    async fn create(&self, input: &TestCaseInput) -> Result<ApiTestCase, GatewayError>;

    /// Updates a test case.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the input.
    async fn update(&self, id: u64, input: &TestCaseInput) -> Result<ApiTestCase, GatewayError>;

    /// Deletes a test case.
    ///
    /// # Errors
    /// Returns an error if the backend call fails.
    async fn delete(&self, id: u64) -> Result<(), GatewayError>;
}

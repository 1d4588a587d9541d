//! Common test setup functions.

use std::sync::Arc;

use api::{router, AnalysisSettings, AppState};
use axum::Router;
use axum_test::TestServer;
use insights_core::Table;
use llm_client::{InsightGenerator, LanguageModel};
use telemetry::health;

use crate::fixtures;
use crate::mocks::MockModel;

/// Test context with the generated dataset and a mock model.
///
/// Uses the real Axum router with all layers; only the model is replaced.
pub struct TestContext {
    pub table: Arc<Table>,
    pub model: Arc<MockModel>,
    pub router: Router,
}

impl TestContext {
    /// Create a context over the 25-employee fixture.
    pub fn new() -> Self {
        Self::with_table(fixtures::sales_table(), AnalysisSettings::default())
    }

    pub fn with_table(table: Table, settings: AnalysisSettings) -> Self {
        let table = Arc::new(table);
        let model = Arc::new(MockModel::new());

        health().dataset.set_healthy();

        let insights = InsightGenerator::new(model.clone() as Arc<dyn LanguageModel>);
        let state = AppState::with_settings(table.clone(), insights, settings);

        Self {
            table,
            model,
            router: router(state),
        }
    }

    /// Start an in-process test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router.clone()).expect("Failed to create test server")
    }

    /// Set the mock model to fail (for fallback testing).
    pub fn set_model_failure(&self, should_fail: bool) {
        self.model.set_should_fail(should_fail);
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

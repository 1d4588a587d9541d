//! Tests for health check endpoints.

use axum::http::StatusCode;
use integration_tests::{fixtures, setup::TestContext};

/// Test /health endpoint returns proper structure
#[tokio::test]
async fn test_health_endpoint_structure() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();

    for field in [
        "status",
        "dataset_loaded",
        "llm_available",
        "total_records",
        "insight_requests",
        "insight_failures",
    ] {
        assert!(body.get(field).is_some(), "Response should have '{}' field", field);
    }

    assert_eq!(body["dataset_loaded"], true);
    assert_eq!(
        body["total_records"].as_u64(),
        Some((fixtures::EMPLOYEE_COUNT as u64) * fixtures::MONTHS as u64)
    );
}

/// Test /health endpoint reports a serving status once data is loaded
#[tokio::test]
async fn test_health_status_with_dataset() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let body: serde_json::Value = server.get("/health").await.json();

    // The model may be marked down by a concurrent fallback test
    let status = body["status"].as_str().unwrap_or("");
    assert!(
        status == "healthy" || status == "degraded",
        "Status should be 'healthy' or 'degraded', got '{}'",
        status
    );
}

/// Test /health/ready endpoint
#[tokio::test]
async fn test_ready_endpoint() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health/ready").await;
    response.assert_status(StatusCode::OK);
}

/// Test /health/live endpoint always returns 200 when service is running
#[tokio::test]
async fn test_live_endpoint() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health/live").await;
    response.assert_status(StatusCode::OK);
}

/// Test the root banner
#[tokio::test]
async fn test_root_banner() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "running");
    assert!(body["version"].is_string());
}

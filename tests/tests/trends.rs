//! End-to-end tests for GET /api/performance_trends.

use axum::http::StatusCode;
use integration_tests::{fixtures, setup::TestContext};
use llm_client::{fallback_text, InsightKind};

fn labels(body: &serde_json::Value) -> Vec<String> {
    body["trend_metrics"]["buckets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["period"].as_str().unwrap().to_string())
        .collect()
}

/// Test the default period is monthly
#[tokio::test]
async fn test_default_monthly() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/performance_trends").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["time_period"], "monthly");
    assert_eq!(labels(&body), vec!["2024-01", "2024-02", "2024-03", "2024-04"]);

    let buckets = body["trend_metrics"]["buckets"].as_array().unwrap();
    assert!(buckets[0]["growth_rate"].is_null());
    assert!(buckets[1]["growth_rate"].is_number());
    assert_eq!(
        buckets[0]["records"].as_i64(),
        Some(fixtures::EMPLOYEE_COUNT)
    );
    assert_eq!(body["trend_metrics"]["forecast"]["period"], "2024-05");
}

/// Test quarterly grouping
#[tokio::test]
async fn test_quarterly() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/api/performance_trends")
        .add_query_param("time_period", "quarterly")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["time_period"], "quarterly");
    assert_eq!(labels(&body), vec!["2024Q1", "2024Q2"]);
    assert_eq!(body["trend_metrics"]["growth_metrics"]["total_periods"], 2);
}

/// Test an unsupported period returns 422
#[tokio::test]
async fn test_invalid_period_returns_422() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/api/performance_trends")
        .add_query_param("time_period", "weekly")
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALID_002");
    assert_eq!(ctx.model.prompt_count(), 0);
}

/// Test model failure still yields 200 with fallback commentary
#[tokio::test]
async fn test_trend_fallback() {
    let ctx = TestContext::new();
    ctx.set_model_failure(true);
    let server = ctx.server();

    let response = server.get("/api/performance_trends").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["llm_analysis"], fallback_text(InsightKind::Trend));
}

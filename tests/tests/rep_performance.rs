//! End-to-end tests for GET /api/rep_performance.

use axum::http::StatusCode;
use integration_tests::{fixtures, mocks::MOCK_ANALYSIS, setup::TestContext};
use llm_client::{fallback_text, InsightKind};

/// Test a known rep returns metrics, history, and commentary
#[tokio::test]
async fn test_rep_performance_success() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/api/rep_performance")
        .add_query_param("rep_id", 3)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["employee_id"], 3);
    assert_eq!(body["employee_name"], "Camilla Ali");
    assert_eq!(body["historical_records"], fixtures::MONTHS);
    assert_eq!(body["llm_analysis"], MOCK_ANALYSIS);
    assert!(body["last_updated"].as_str().unwrap().starts_with("2024-04-15"));

    let current = &body["performance_metrics"]["current_performance"];
    // April: 23 leads, 11 tours, 5 applications
    let conversion = current["conversion_rate"].as_f64().unwrap();
    assert!((conversion - 5.0 / 23.0).abs() < 1e-9);
    assert!(current["pipeline_health"]["status"].is_string());

    let series = body["performance_metrics"]["historical_trends"]["series"]
        .as_array()
        .unwrap();
    assert_eq!(series.len(), fixtures::MONTHS as usize);
}

/// Test the prompt sent to the model names the rep
#[tokio::test]
async fn test_rep_prompt_mentions_employee() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .get("/api/rep_performance")
        .add_query_param("rep_id", 8)
        .await
        .assert_status_ok();

    let prompts = ctx.model.captured_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Employee: Dana Camacho"));
    assert!(prompts[0].contains("Employee ID: 8"));
}

/// Test every rep's conversion rate stays within [0, 1]
#[tokio::test]
async fn test_conversion_rate_bounds() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for rep_id in 1..=fixtures::EMPLOYEE_COUNT {
        let body: serde_json::Value = server
            .get("/api/rep_performance")
            .add_query_param("rep_id", rep_id)
            .await
            .json();

        let rate = body["performance_metrics"]["current_performance"]["conversion_rate"]
            .as_f64()
            .unwrap();
        assert!((0.0..=1.0).contains(&rate), "rep {} has rate {}", rep_id, rate);
        if rep_id == fixtures::ZERO_LEAD_EMPLOYEE {
            assert_eq!(rate, 0.0);
        }
    }
}

/// Test unknown rep returns 404, not 500
#[tokio::test]
async fn test_unknown_rep_returns_404() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/api/rep_performance")
        .add_query_param("rep_id", 99999)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "LOOKUP_001");
    assert_eq!(body["detail"], "Employee with ID 99999 not found");
    // No model call for a failed lookup
    assert_eq!(ctx.model.prompt_count(), 0);
}

/// Test malformed or out-of-range rep ids return 422
#[tokio::test]
async fn test_invalid_rep_id_returns_422() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let cases = [
        ("/api/rep_performance?rep_id=abc", "VALID_001"),
        ("/api/rep_performance", "VALID_001"),
        ("/api/rep_performance?rep_id=0", "VALID_002"),
        ("/api/rep_performance?rep_id=-4", "VALID_002"),
    ];

    for (uri, code) in cases {
        let response = server.get(uri).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], code, "unexpected code for {}", uri);
        assert!(body["timestamp"].is_string());
    }
}

/// Test model failure still yields 200 with fallback commentary
#[tokio::test]
async fn test_model_failure_returns_fallback() {
    let ctx = TestContext::new();
    ctx.set_model_failure(true);
    let server = ctx.server();

    let response = server
        .get("/api/rep_performance")
        .add_query_param("rep_id", 1)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["llm_analysis"], fallback_text(InsightKind::Individual));
    assert_eq!(body["employee_name"], "Marcus Webb");
}

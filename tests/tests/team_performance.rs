//! End-to-end tests for GET /api/team_performance.

use api::AnalysisSettings;
use integration_tests::{fixtures, mocks::MOCK_ANALYSIS, setup::TestContext};
use llm_client::{fallback_text, InsightKind};

/// Test overview totals match the dataset
#[tokio::test]
async fn test_team_totals() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/team_performance").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let overview = &body["team_metrics"]["overview"];

    assert_eq!(
        overview["total_leads"].as_f64(),
        Some(fixtures::total_leads() as f64)
    );
    assert_eq!(body["unique_employees"], fixtures::EMPLOYEE_COUNT);
    assert_eq!(
        body["total_records"].as_i64(),
        Some(fixtures::EMPLOYEE_COUNT * fixtures::MONTHS as i64)
    );
    assert_eq!(body["llm_analysis"], MOCK_ANALYSIS);
    assert!(body["analysis_date"].is_string());
}

/// Test top performers are ranked by confirmed revenue
#[tokio::test]
async fn test_top_performers_ranked() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let body: serde_json::Value = server.get("/api/team_performance").await.json();
    let performers = body["team_metrics"]["top_performers"].as_array().unwrap();

    assert_eq!(performers.len(), 5);
    let revenue: Vec<f64> = performers
        .iter()
        .map(|p| p["revenue_confirmed"].as_f64().unwrap())
        .collect();
    assert!(revenue.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(performers[0]["rank"], 1);
}

/// Test the top performer count follows settings
#[tokio::test]
async fn test_top_performer_setting() {
    let ctx = TestContext::with_table(
        fixtures::sales_table(),
        AnalysisSettings { top_performers: 3 },
    );
    let server = ctx.server();

    let body: serde_json::Value = server.get("/api/team_performance").await.json();
    assert_eq!(
        body["team_metrics"]["top_performers"].as_array().unwrap().len(),
        3
    );
}

/// Test the team prompt carries the aggregates
#[tokio::test]
async fn test_team_prompt_contents() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server.get("/api/team_performance").await.assert_status_ok();

    let prompts = ctx.model.captured_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("- Total Team Members: 25"));
    assert!(prompts[0].contains("Top Performers by Confirmed Revenue"));
}

/// Test model failure still yields 200 with fallback commentary
#[tokio::test]
async fn test_team_fallback() {
    let ctx = TestContext::new();
    ctx.set_model_failure(true);
    let server = ctx.server();

    let response = server.get("/api/team_performance").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["llm_analysis"], fallback_text(InsightKind::Team));
}

//! End-to-end tests for the employee directory and dataset stats.

use axum::http::StatusCode;
use insights_core::Table;
use integration_tests::{fixtures, setup::TestContext};

fn names(body: &serde_json::Value) -> Vec<String> {
    body["employees"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["employee_name"].as_str().unwrap().to_string())
        .collect()
}

/// Test listing returns every employee once, sorted by id
#[tokio::test]
async fn test_list_employees() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/employees").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["total_count"], fixtures::EMPLOYEE_COUNT);

    let employees = body["employees"].as_array().unwrap();
    assert_eq!(employees[0]["employee_id"], 1);
    assert_eq!(employees[0]["records"], fixtures::MONTHS);
    assert_eq!(employees[24]["employee_id"], 25);
}

/// Test search is a case-insensitive substring match
#[tokio::test]
async fn test_search_cam() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for query in ["cam", "CAM", "  cam  "] {
        let response = server
            .get("/api/employees/search")
            .add_query_param("query", query)
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(names(&body), fixtures::CAM_NAMES.to_vec());
        assert_eq!(body["query"], query.trim());
    }
}

/// Test search without a match returns an empty list
#[tokio::test]
async fn test_search_no_match() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let body: serde_json::Value = server
        .get("/api/employees/search")
        .add_query_param("query", "zzz")
        .await
        .json();
    assert_eq!(body["total_count"], 0);
}

/// Test blank or missing search query returns 422
#[tokio::test]
async fn test_blank_search_returns_422() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for uri in [
        "/api/employees/search?query=",
        "/api/employees/search?query=%20",
        "/api/employees/search",
    ] {
        let response = server.get(uri).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "VALID_001");
    }
}

/// Test dataset stats describe the fixture
#[tokio::test]
async fn test_data_stats() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/data/stats").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["unique_employees"], fixtures::EMPLOYEE_COUNT);
    assert_eq!(body["date_range"]["start"], "2024-01-15");
    assert_eq!(body["date_range"]["end"], "2024-04-15");
    let columns = body["columns"].as_array().unwrap();
    assert!(columns.iter().any(|c| c == "revenue_confirmed"));
}

/// Test the dataset loads from disk the same as from memory
#[tokio::test]
async fn test_load_from_file() {
    let file = fixtures::csv_file(&fixtures::sales_csv());
    let table: Table = insights_core::load(file.path()).unwrap();
    assert_eq!(table.len(), fixtures::sales_table().len());

    let missing = insights_core::load("/nonexistent/sales.csv").unwrap_err();
    assert!(missing.is_data_load());

    let broken = fixtures::csv_file("employee_id,employee_name\n1,Camilla Ali\n");
    let err = insights_core::load(broken.path()).unwrap_err();
    assert!(err.to_string().contains("dated"));
}

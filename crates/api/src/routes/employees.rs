//! Employee directory endpoints.

use axum::{extract::State, Json};
use tracing::debug;

use crate::extractors::SearchQuery;
use crate::response::{EmployeesResponse, SearchResponse};
use crate::state::AppState;

/// GET /api/employees - Every employee, sorted by id.
pub async fn list_handler(State(state): State<AppState>) -> Json<EmployeesResponse> {
    let employees = state.table.list_employees();

    Json(EmployeesResponse {
        total_count: employees.len(),
        employees,
    })
}

/// GET /api/employees/search?query= - Case-insensitive name search.
pub async fn search_handler(
    State(state): State<AppState>,
    SearchQuery { query }: SearchQuery,
) -> Json<SearchResponse> {
    let employees = state.table.search(&query);
    debug!(query = %query, matches = employees.len(), "Employee search");

    Json(SearchResponse {
        query,
        total_count: employees.len(),
        employees,
    })
}

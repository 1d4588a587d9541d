//! Health check endpoints.

use axum::{extract::State, http::StatusCode, Json};
use telemetry::{health, metrics};

use crate::response::HealthResponse;
use crate::state::AppState;

/// GET /health - Full health check.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let report = health().report();
    let counters = metrics();

    Json(HealthResponse {
        status: report.status.as_str().to_string(),
        dataset_loaded: health().dataset.is_healthy(),
        llm_available: health().llm.is_healthy(),
        total_records: state.table.len(),
        insight_requests: counters.insight_requests.get(),
        insight_failures: counters.insight_failures.get(),
    })
}

/// GET /health/ready - Readiness probe (dataset loaded).
pub async fn ready_handler() -> StatusCode {
    if health().is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live - Liveness probe (service is running).
pub async fn live_handler() -> StatusCode {
    if health().is_alive() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

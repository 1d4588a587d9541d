use axum::{extract::State, Json};
use insights_core::DatasetStats;

use crate::state::AppState;

/// GET /api/data/stats - Shape of the loaded dataset.
pub async fn stats_handler(State(state): State<AppState>) -> Json<DatasetStats> {
    Json(state.table.stats())
}

//! API routes.

pub mod data;
pub mod employees;
pub mod health;
pub mod performance;
pub mod root;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root::root_handler))
        .route(
            "/api/rep_performance",
            get(performance::rep_performance_handler),
        )
        .route(
            "/api/team_performance",
            get(performance::team_performance_handler),
        )
        .route("/api/performance_trends", get(performance::trends_handler))
        .route("/api/employees", get(employees::list_handler))
        .route("/api/employees/search", get(employees::search_handler))
        .route("/api/data/stats", get(data::stats_handler))
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

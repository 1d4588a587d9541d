//! Analysis endpoints: aggregate, then annotate.

use axum::{extract::State, Json};
use chrono::Utc;
use insights_core::metrics::{rep_snapshot, team_metrics, trend_metrics};
use insights_core::Result;
use llm_client::InsightRequest;
use telemetry::metrics;
use tracing::{debug, info};

use crate::extractors::{RepId, TimePeriod};
use crate::response::{
    ApiError, RepPerformanceResponse, TeamPerformanceResponse, TrendsResponse,
};
use crate::state::AppState;

/// Count failed analyses before handing the error to the response layer.
fn tracked<T>(result: Result<T>) -> Result<T> {
    if result.is_err() {
        metrics().analysis_errors.inc();
    }
    result
}

/// GET /api/rep_performance?rep_id= - One rep's metrics and commentary.
pub async fn rep_performance_handler(
    State(state): State<AppState>,
    RepId { rep_id }: RepId,
) -> std::result::Result<Json<RepPerformanceResponse>, ApiError> {
    metrics().analysis_requests.inc();

    let (record, rep) = tracked(rep_snapshot(&state.table, rep_id))?;

    debug!(
        employee_id = rep_id,
        records = rep.historical_records,
        "Computed rep metrics"
    );

    let llm_analysis = state
        .insights
        .generate(InsightRequest::Individual {
            record,
            metrics: &rep,
        })
        .await;

    info!(employee_id = rep_id, "Rep performance analyzed");

    Ok(Json(RepPerformanceResponse {
        employee_id: rep.employee_id,
        employee_name: rep.employee_name,
        performance_metrics: rep.performance,
        llm_analysis,
        historical_records: rep.historical_records,
        last_updated: rep.last_updated,
    }))
}

/// GET /api/team_performance - Team aggregates and commentary.
pub async fn team_performance_handler(
    State(state): State<AppState>,
) -> Json<TeamPerformanceResponse> {
    metrics().analysis_requests.inc();

    let team = team_metrics(&state.table, state.settings.top_performers);
    let llm_analysis = state
        .insights
        .generate(InsightRequest::Team { metrics: &team })
        .await;

    info!(
        employees = team.overview.total_employees,
        records = team.overview.total_records,
        "Team performance analyzed"
    );

    Json(TeamPerformanceResponse {
        total_records: team.overview.total_records,
        unique_employees: team.overview.total_employees,
        team_metrics: team,
        llm_analysis,
        analysis_date: Utc::now(),
    })
}

/// GET /api/performance_trends?time_period= - Bucketed trends and commentary.
pub async fn trends_handler(
    State(state): State<AppState>,
    TimePeriod(period): TimePeriod,
) -> Json<TrendsResponse> {
    metrics().analysis_requests.inc();

    let trends = trend_metrics(&state.table, period);
    let llm_analysis = state
        .insights
        .generate(InsightRequest::Trend { metrics: &trends })
        .await;

    info!(
        period = %period,
        buckets = trends.buckets.len(),
        "Performance trends analyzed"
    );

    Json(TrendsResponse {
        time_period: period,
        trend_metrics: trends,
        llm_analysis,
        analysis_date: Utc::now(),
    })
}

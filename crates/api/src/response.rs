//! Standardized API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use insights_core::metrics::{PerformanceMetrics, TeamMetrics, TrendMetrics};
use insights_core::{EmployeeSummary, Error, Period};
use serde::Serialize;
use tracing::error;

/// GET /api/rep_performance
#[derive(Debug, Serialize)]
pub struct RepPerformanceResponse {
    pub employee_id: i64,
    pub employee_name: String,
    pub performance_metrics: PerformanceMetrics,
    pub llm_analysis: String,
    pub historical_records: usize,
    pub last_updated: NaiveDateTime,
}

/// GET /api/team_performance
#[derive(Debug, Serialize)]
pub struct TeamPerformanceResponse {
    pub team_metrics: TeamMetrics,
    pub llm_analysis: String,
    pub total_records: usize,
    pub unique_employees: usize,
    pub analysis_date: DateTime<Utc>,
}

/// GET /api/performance_trends
#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub time_period: Period,
    pub trend_metrics: TrendMetrics,
    pub llm_analysis: String,
    pub analysis_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct EmployeesResponse {
    pub employees: Vec<EmployeeSummary>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub employees: Vec<EmployeeSummary>,
    pub total_count: usize,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub dataset_loaded: bool,
    pub llm_available: bool,
    pub total_records: usize,
    pub insight_requests: u64,
    pub insight_failures: u64,
}

/// Service banner for GET /.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            detail: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// API error type with machine-readable codes.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn with_code(status: StatusCode, code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse::new(msg, code),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.response = self.response.with_detail(detail);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let (summary, detail) = match &err {
            Error::NotFound(msg) => ("Not found", msg.clone()),
            Error::InvalidParameter { .. } => ("Invalid parameter", err.to_string()),
            Error::Validation(msg) => ("Validation failed", msg.clone()),
            _ => {
                error!(error = %err, code = err.error_code(), "Request failed");
                ("Internal server error", err.to_string())
            }
        };

        ApiError::with_code(status, err.error_code(), summary).with_detail(detail)
    }
}

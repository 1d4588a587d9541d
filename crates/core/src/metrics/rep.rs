use chrono::NaiveDateTime;
use serde::Serialize;

use super::{activity_score, conversion_rate, mean, present, revenue_per_lead, sample_std};
use crate::error::{Error, Result};
use crate::record::EmployeeRecord;
use crate::table::Table;

/// Pending-to-confirmed ratio below which the pipeline is considered thin.
pub const THIN_PIPELINE_RATIO: f64 = 0.25;

/// Pending-to-confirmed ratio above which the pipeline is overextended.
pub const OVEREXTENDED_PIPELINE_RATIO: f64 = 1.0;

/// Metrics for one sales rep.
#[derive(Debug, Clone, Serialize)]
pub struct RepMetrics {
    pub employee_id: i64,
    pub employee_name: String,
    pub historical_records: usize,
    pub last_updated: NaiveDateTime,
    pub performance: PerformanceMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    pub current_performance: CurrentPerformance,
    pub historical_trends: HistoricalTrends,
}

/// Ratios from the most recent snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentPerformance {
    pub conversion_rate: Option<f64>,
    pub revenue_per_lead: Option<f64>,
    pub activity_score: f64,
    pub pipeline_health: PipelineHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// Little pending revenue relative to confirmed
    Thin,
    Healthy,
    /// Pending revenue exceeds confirmed
    Overextended,
    /// Pending revenue with nothing confirmed yet
    Unconverted,
    Empty,
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineHealth {
    pub status: PipelineStatus,
    pub pending_to_confirmed_ratio: Option<f64>,
    pub pipeline_tours: f64,
    pub scheduled_tours: f64,
    pub cancelled_rate: f64,
    pub pending_revenue: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoricalTrends {
    pub total_records: usize,
    pub avg_revenue: Option<f64>,
    pub avg_leads: Option<f64>,
    /// Coefficient of variation of confirmed revenue
    pub performance_consistency: Option<f64>,
    pub series: Vec<TrendPoint>,
}

/// Ratios for a single historical snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub dated: NaiveDateTime,
    pub conversion_rate: Option<f64>,
    pub revenue_per_lead: Option<f64>,
    pub activity_score: f64,
    pub pending_to_confirmed_ratio: Option<f64>,
}

/// Compute current and historical metrics for `employee_id`.
pub fn rep_metrics(table: &Table, employee_id: i64) -> Result<RepMetrics> {
    rep_snapshot(table, employee_id).map(|(_, metrics)| metrics)
}

/// Like [`rep_metrics`], also returning the latest record the current
/// performance was computed from.
pub fn rep_snapshot(table: &Table, employee_id: i64) -> Result<(&EmployeeRecord, RepMetrics)> {
    let history = table.employee_history(employee_id);
    let latest = history
        .last()
        .copied()
        .ok_or_else(|| Error::not_found(format!("Employee with ID {} not found", employee_id)))?;

    let metrics = RepMetrics {
        employee_id,
        employee_name: latest.employee_name.clone(),
        historical_records: history.len(),
        last_updated: latest.dated,
        performance: PerformanceMetrics {
            current_performance: current_performance(latest),
            historical_trends: historical_trends(&history),
        },
    };
    Ok((latest, metrics))
}

fn current_performance(record: &EmployeeRecord) -> CurrentPerformance {
    CurrentPerformance {
        conversion_rate: conversion_rate(record),
        revenue_per_lead: revenue_per_lead(record),
        activity_score: activity_score(record),
        pipeline_health: pipeline_health(record),
    }
}

/// Pending revenue as a multiple of confirmed revenue.
pub fn pending_to_confirmed_ratio(record: &EmployeeRecord) -> Option<f64> {
    let pending = present(record.revenue_pending)?;
    let confirmed = present(record.revenue_confirmed)?;
    (confirmed > 0.0).then(|| pending / confirmed)
}

pub fn pipeline_status(record: &EmployeeRecord) -> PipelineStatus {
    let (Some(pending), Some(confirmed)) = (
        present(record.revenue_pending),
        present(record.revenue_confirmed),
    ) else {
        return PipelineStatus::Unknown;
    };

    if confirmed <= 0.0 {
        return if pending > 0.0 {
            PipelineStatus::Unconverted
        } else {
            PipelineStatus::Empty
        };
    }

    let ratio = pending / confirmed;
    if ratio < THIN_PIPELINE_RATIO {
        PipelineStatus::Thin
    } else if ratio <= OVEREXTENDED_PIPELINE_RATIO {
        PipelineStatus::Healthy
    } else {
        PipelineStatus::Overextended
    }
}

fn pipeline_health(record: &EmployeeRecord) -> PipelineHealth {
    let pipeline_tours = present(record.tours_in_pipeline).unwrap_or(0.0);
    let scheduled_tours = present(record.tours_scheduled).unwrap_or(0.0);
    let cancelled = present(record.tours_cancelled).unwrap_or(0.0);

    PipelineHealth {
        status: pipeline_status(record),
        pending_to_confirmed_ratio: pending_to_confirmed_ratio(record),
        pipeline_tours,
        scheduled_tours,
        cancelled_rate: cancelled / (pipeline_tours + scheduled_tours).max(1.0),
        pending_revenue: present(record.revenue_pending),
    }
}

fn historical_trends(history: &[&EmployeeRecord]) -> HistoricalTrends {
    let revenue: Vec<f64> = history
        .iter()
        .filter_map(|r| present(r.revenue_confirmed))
        .collect();
    let avg_revenue = mean(revenue.iter().copied().map(Some));

    let performance_consistency = sample_std(&revenue)
        .zip(avg_revenue)
        .map(|(std, avg)| std / avg.max(1.0));

    HistoricalTrends {
        total_records: history.len(),
        avg_revenue,
        avg_leads: mean(history.iter().map(|r| r.lead_taken)),
        performance_consistency,
        series: history
            .iter()
            .map(|r| TrendPoint {
                dated: r.dated,
                conversion_rate: conversion_rate(r),
                revenue_per_lead: revenue_per_lead(r),
                activity_score: activity_score(r),
                pending_to_confirmed_ratio: pending_to_confirmed_ratio(r),
            })
            .collect(),
    }
}

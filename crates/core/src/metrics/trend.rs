use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::{mean, sum};
use crate::period::{Bucket, Period};
use crate::record::EmployeeRecord;
use crate::table::Table;

/// Width of the "recent activity" window ending at the latest snapshot.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Period-bucketed trend summary.
#[derive(Debug, Clone, Serialize)]
pub struct TrendMetrics {
    pub time_period: Period,
    pub buckets: Vec<TrendBucket>,
    pub growth_metrics: GrowthMetrics,
    pub forecast: Option<Forecast>,
    pub pipeline_metrics: PipelineMetrics,
    pub window: Option<TrendWindow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendBucket {
    pub period: String,
    pub records: usize,
    pub revenue_confirmed: f64,
    pub leads: f64,
    pub applications: f64,
    pub avg_close_rate: Option<f64>,
    /// Revenue change relative to the previous bucket; null when that bucket
    /// is absent or totals zero.
    pub growth_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrowthMetrics {
    pub recent_revenue_growth: Option<f64>,
    pub total_periods: usize,
    pub avg_period_revenue: f64,
}

/// Naive linear extrapolation into the next bucket.
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub period: String,
    pub revenue_confirmed: f64,
    pub leads: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineMetrics {
    pub total_pipeline_tours: f64,
    pub total_pending_revenue: f64,
    pub avg_deal_value: Option<f64>,
    pub avg_revenue_runrate: Option<f64>,
}

/// Span of the data and activity in its final 30 days.
#[derive(Debug, Clone, Serialize)]
pub struct TrendWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
    pub recent: WindowTotals,
    pub total_texts: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowTotals {
    pub records: usize,
    pub revenue_confirmed: f64,
    pub leads: f64,
    pub applications: f64,
    pub avg_close_rate: Option<f64>,
}

/// Group the table into `period` buckets and summarize growth.
pub fn trend_metrics(table: &Table, period: Period) -> TrendMetrics {
    let records = table.records();

    let mut grouped: BTreeMap<Bucket, Vec<&EmployeeRecord>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(period.bucket_of(record.date()))
            .or_default()
            .push(record);
    }
    let last_bucket = grouped.keys().next_back().copied();

    let mut buckets: Vec<TrendBucket> = Vec::with_capacity(grouped.len());
    for (bucket, rows) in &grouped {
        let revenue = sum(rows.iter().map(|r| r.revenue_confirmed));
        let growth = buckets
            .last()
            .and_then(|prev| growth_rate(prev.revenue_confirmed, revenue));
        buckets.push(TrendBucket {
            period: bucket.label(),
            records: rows.len(),
            revenue_confirmed: revenue,
            leads: sum(rows.iter().map(|r| r.lead_taken)),
            applications: sum(rows.iter().map(|r| r.applications)),
            avg_close_rate: mean(rows.iter().map(|r| r.avg_close_rate_30_days)),
            growth_rate: growth,
        });
    }

    let growth_metrics = GrowthMetrics {
        recent_revenue_growth: buckets.last().and_then(|b| b.growth_rate),
        total_periods: buckets.len(),
        avg_period_revenue: if buckets.is_empty() {
            0.0
        } else {
            buckets.iter().map(|b| b.revenue_confirmed).sum::<f64>() / buckets.len() as f64
        },
    };

    let forecast = last_bucket.map(|last| project_next(&buckets, last.next()));

    TrendMetrics {
        time_period: period,
        buckets,
        growth_metrics,
        forecast,
        pipeline_metrics: PipelineMetrics {
            total_pipeline_tours: sum(records.iter().map(|r| r.tours_in_pipeline)),
            total_pending_revenue: sum(records.iter().map(|r| r.revenue_pending)),
            avg_deal_value: mean(records.iter().map(|r| r.avg_deal_value_30_days)),
            avg_revenue_runrate: mean(records.iter().map(|r| r.revenue_runrate)),
        },
        window: window(table),
    }
}

/// `(current - previous) / previous`, undefined when `previous` is zero.
pub fn growth_rate(previous: f64, current: f64) -> Option<f64> {
    (previous != 0.0).then(|| (current - previous) / previous)
}

/// Extend the last two bucket totals linearly; flat with a single bucket.
fn project_next(buckets: &[TrendBucket], next: Bucket) -> Forecast {
    let extrapolate = |value: fn(&TrendBucket) -> f64| match buckets {
        [.., prev, last] => (2.0 * value(last) - value(prev)).max(0.0),
        [last] => value(last),
        [] => 0.0,
    };

    Forecast {
        period: next.label(),
        revenue_confirmed: extrapolate(|b| b.revenue_confirmed),
        leads: extrapolate(|b| b.leads),
    }
}

fn window(table: &Table) -> Option<TrendWindow> {
    let range = table.date_range()?;
    let latest = table.records().iter().map(|r| r.dated).max()?;
    let cutoff = latest - Duration::days(RECENT_WINDOW_DAYS);
    let recent: Vec<&EmployeeRecord> = table
        .records()
        .iter()
        .filter(|r| r.dated >= cutoff)
        .collect();

    Some(TrendWindow {
        start: range.start,
        end: range.end,
        days: range.days,
        recent: WindowTotals {
            records: recent.len(),
            revenue_confirmed: sum(recent.iter().map(|r| r.revenue_confirmed)),
            leads: sum(recent.iter().map(|r| r.lead_taken)),
            applications: sum(recent.iter().map(|r| r.applications)),
            avg_close_rate: mean(recent.iter().map(|r| r.avg_close_rate_30_days)),
        },
        total_texts: table.records().iter().map(|r| r.total_texts()).sum(),
    })
}

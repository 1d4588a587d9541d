use std::collections::BTreeMap;

use serde::Serialize;

use super::{mean, present, sum};
use crate::record::EmployeeRecord;
use crate::table::Table;

/// Default size of the top-performer list.
pub const DEFAULT_TOP_PERFORMERS: usize = 5;

/// Team-wide aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct TeamMetrics {
    pub overview: TeamOverview,
    pub averages: TeamAverages,
    pub conversion_metrics: ConversionMetrics,
    pub top_performers: Vec<TopPerformer>,
    pub leaders: Leaders,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamOverview {
    pub total_employees: usize,
    pub total_records: usize,
    pub total_leads: f64,
    pub total_tours: f64,
    pub total_applications: f64,
    pub total_confirmed_revenue: f64,
    pub total_pending_revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamAverages {
    pub avg_leads_per_employee: f64,
    pub avg_tours_per_employee: f64,
    pub avg_applications_per_employee: f64,
    pub avg_revenue_per_employee: f64,
    pub avg_close_rate: f64,
    pub avg_deal_value: f64,
}

/// Mean of the source-reported funnel ratios.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionMetrics {
    pub team_tours_per_lead: Option<f64>,
    pub team_apps_per_tour: Option<f64>,
    pub team_apps_per_lead: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopPerformer {
    pub rank: usize,
    pub employee_id: i64,
    pub employee_name: String,
    pub revenue_confirmed: f64,
    pub leads: f64,
    pub applications: f64,
}

/// The single best snapshot for a metric.
#[derive(Debug, Clone, Serialize)]
pub struct Leader {
    pub employee_id: i64,
    pub employee_name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Leaders {
    pub highest_revenue: Option<Leader>,
    pub highest_leads: Option<Leader>,
    pub highest_applications: Option<Leader>,
    pub highest_close_rate: Option<Leader>,
}

/// Compute team-wide metrics with the `top_n` highest earners.
pub fn team_metrics(table: &Table, top_n: usize) -> TeamMetrics {
    let records = table.records();
    let overview = TeamOverview {
        total_employees: table.unique_employees(),
        total_records: records.len(),
        total_leads: sum(records.iter().map(|r| r.lead_taken)),
        total_tours: sum(records.iter().map(|r| r.tours_booked)),
        total_applications: sum(records.iter().map(|r| r.applications)),
        total_confirmed_revenue: sum(records.iter().map(|r| r.revenue_confirmed)),
        total_pending_revenue: sum(records.iter().map(|r| r.revenue_pending)),
    };

    let per_employee = |total: f64| {
        if overview.total_employees == 0 {
            0.0
        } else {
            total / overview.total_employees as f64
        }
    };

    let averages = TeamAverages {
        avg_leads_per_employee: per_employee(overview.total_leads),
        avg_tours_per_employee: per_employee(overview.total_tours),
        avg_applications_per_employee: per_employee(overview.total_applications),
        avg_revenue_per_employee: per_employee(overview.total_confirmed_revenue),
        avg_close_rate: mean(records.iter().map(|r| r.avg_close_rate_30_days)).unwrap_or(0.0),
        avg_deal_value: mean(records.iter().map(|r| r.avg_deal_value_30_days)).unwrap_or(0.0),
    };

    let conversion_metrics = ConversionMetrics {
        team_tours_per_lead: mean(records.iter().map(|r| r.tours_per_lead)),
        team_apps_per_tour: mean(records.iter().map(|r| r.apps_per_tour)),
        team_apps_per_lead: mean(records.iter().map(|r| r.apps_per_lead)),
    };

    let leaders = Leaders {
        highest_revenue: leader(records, |r| r.revenue_confirmed),
        highest_leads: leader(records, |r| r.lead_taken),
        highest_applications: leader(records, |r| r.applications),
        highest_close_rate: leader(records, |r| r.avg_close_rate_30_days),
    };

    TeamMetrics {
        overview,
        averages,
        conversion_metrics,
        top_performers: top_performers(table, top_n),
        leaders,
    }
}

/// Employees ranked by total confirmed revenue, descending.
///
/// Ties are broken by ascending employee id.
pub fn top_performers(table: &Table, top_n: usize) -> Vec<TopPerformer> {
    struct Totals<'a> {
        latest: &'a EmployeeRecord,
        revenue: f64,
        leads: f64,
        applications: f64,
    }

    let mut by_employee: BTreeMap<i64, Totals<'_>> = BTreeMap::new();
    for record in table.records() {
        let totals = by_employee.entry(record.employee_id).or_insert(Totals {
            latest: record,
            revenue: 0.0,
            leads: 0.0,
            applications: 0.0,
        });
        if record.dated >= totals.latest.dated {
            totals.latest = record;
        }
        totals.revenue += present(record.revenue_confirmed).unwrap_or(0.0);
        totals.leads += present(record.lead_taken).unwrap_or(0.0);
        totals.applications += present(record.applications).unwrap_or(0.0);
    }

    let mut ranked: Vec<(i64, Totals<'_>)> = by_employee.into_iter().collect();
    ranked.sort_by(|(id_a, a), (id_b, b)| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| id_a.cmp(id_b))
    });

    ranked
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(index, (employee_id, totals))| TopPerformer {
            rank: index + 1,
            employee_id,
            employee_name: totals.latest.employee_name.clone(),
            revenue_confirmed: totals.revenue,
            leads: totals.leads,
            applications: totals.applications,
        })
        .collect()
}

/// First row holding the maximum present value of `metric`.
fn leader<F>(records: &[EmployeeRecord], metric: F) -> Option<Leader>
where
    F: Fn(&EmployeeRecord) -> Option<f64>,
{
    let mut best: Option<(&EmployeeRecord, f64)> = None;
    for record in records {
        let Some(value) = present(metric(record)) else {
            continue;
        };
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((record, value));
        }
    }

    best.map(|(record, value)| Leader {
        employee_id: record.employee_id,
        employee_name: record.employee_name.clone(),
        value,
    })
}

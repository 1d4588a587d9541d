//! Prompt rendering.
//!
//! Prompts depend only on their inputs, so identical metrics always produce
//! identical text.

use std::fmt::Write;

use insights_core::metrics::{RepMetrics, TeamMetrics, TrendMetrics};
use insights_core::EmployeeRecord;

/// Prompt for a single rep's latest snapshot and derived metrics.
pub fn individual(record: &EmployeeRecord, metrics: &RepMetrics) -> String {
    let current = &metrics.performance.current_performance;
    let trends = &metrics.performance.historical_trends;
    let pipeline = &current.pipeline_health;

    let mut out = String::new();
    out.push_str(
        "You are a sales performance analyst. Analyze the following sales \
         representative's performance data and provide detailed insights.\n\n",
    );
    let _ = writeln!(out, "Employee: {}", metrics.employee_name);
    let _ = writeln!(out, "Employee ID: {}", metrics.employee_id);
    let _ = writeln!(out, "Snapshot date: {}", record.date());

    out.push_str("\nPerformance Metrics:\n");
    line(&mut out, "Leads Taken", count(record.lead_taken));
    line(&mut out, "Tours Booked", count(record.tours_booked));
    line(&mut out, "Applications", count(record.applications));
    line(&mut out, "Tours per Lead", ratio(record.tours_per_lead));
    line(&mut out, "Apps per Tour", ratio(record.apps_per_tour));
    line(&mut out, "Apps per Lead", ratio(record.apps_per_lead));
    line(&mut out, "Conversion Rate", percent(current.conversion_rate));
    line(&mut out, "Revenue per Lead", money(current.revenue_per_lead));

    out.push_str("\nRevenue Metrics:\n");
    line(&mut out, "Revenue Confirmed", money(record.revenue_confirmed));
    line(&mut out, "Revenue Pending", money(record.revenue_pending));
    line(&mut out, "Revenue Runrate", money(record.revenue_runrate));
    line(&mut out, "Estimated Revenue", money(record.estimated_revenue));
    line(&mut out, "Average Deal Value (30 days)", money(record.avg_deal_value_30_days));
    line(&mut out, "Average Close Rate (30 days)", percent_points(record.avg_close_rate_30_days));

    out.push_str("\nPipeline:\n");
    line(&mut out, "Status", pipeline_label(pipeline.status).to_string());
    line(&mut out, "Pending to Confirmed Ratio", ratio(pipeline.pending_to_confirmed_ratio));
    line(&mut out, "Tours in Pipeline", count(record.tours_in_pipeline));
    line(&mut out, "Tours Scheduled", count(record.tours_scheduled));
    line(&mut out, "Tours Pending", count(record.tours_pending));
    line(&mut out, "Tours Cancelled", count(record.tours_cancelled));
    line(&mut out, "Cancellation Rate", percent(Some(pipeline.cancelled_rate)));

    out.push_str("\nDaily Activity (Texts/Calls):\n");
    for day in record.daily_activity() {
        let _ = writeln!(
            out,
            "- {}: {} texts, {} calls",
            day.day,
            count(Some(day.texts)),
            count(Some(day.calls))
        );
    }
    line(&mut out, "Activity Score", format!("{:.0}", current.activity_score));

    out.push_str("\nHistory:\n");
    line(&mut out, "Snapshots", trends.total_records.to_string());
    line(&mut out, "Average Revenue", money(trends.avg_revenue));
    line(&mut out, "Average Leads", ratio(trends.avg_leads));
    line(&mut out, "Revenue Variability", ratio(trends.performance_consistency));

    out.push_str(
        "\nPlease provide:\n\
         1. Overall performance assessment\n\
         2. Key strengths and areas for improvement\n\
         3. Specific actionable recommendations\n\
         4. Comparison with typical industry benchmarks\n\
         5. Suggested focus areas for the next 30 days\n\n\
         Format your response in a clear, professional manner with bullet points and sections.\n",
    );
    out
}

/// Prompt for team-wide aggregates.
pub fn team(metrics: &TeamMetrics) -> String {
    let overview = &metrics.overview;
    let averages = &metrics.averages;
    let conversion = &metrics.conversion_metrics;

    let mut out = String::new();
    out.push_str(
        "You are a sales team performance analyst. Analyze the following sales \
         team's overall performance.\n\n",
    );

    out.push_str("Team Overview:\n");
    line(&mut out, "Total Team Members", overview.total_employees.to_string());
    line(&mut out, "Snapshots", overview.total_records.to_string());
    line(&mut out, "Total Leads Taken", count(Some(overview.total_leads)));
    line(&mut out, "Total Tours Booked", count(Some(overview.total_tours)));
    line(&mut out, "Total Applications", count(Some(overview.total_applications)));
    line(&mut out, "Total Confirmed Revenue", money(Some(overview.total_confirmed_revenue)));
    line(&mut out, "Total Pending Revenue", money(Some(overview.total_pending_revenue)));
    line(&mut out, "Average Team Close Rate", percent_points(Some(averages.avg_close_rate)));

    out.push_str("\nPerformance Distribution:\n");
    if let Some(leader) = &metrics.leaders.highest_revenue {
        line(
            &mut out,
            "Highest Revenue Snapshot",
            format!("{} ({})", leader.employee_name, money(Some(leader.value))),
        );
    }
    if let Some(leader) = &metrics.leaders.highest_leads {
        line(
            &mut out,
            "Highest Lead Snapshot",
            format!("{} ({} leads)", leader.employee_name, count(Some(leader.value))),
        );
    }
    line(&mut out, "Average Revenue per Rep", money(Some(averages.avg_revenue_per_employee)));
    line(&mut out, "Average Leads per Rep", format!("{:.1}", averages.avg_leads_per_employee));
    line(&mut out, "Average Apps per Rep", format!("{:.1}", averages.avg_applications_per_employee));
    line(&mut out, "Average Deal Value", money(Some(averages.avg_deal_value)));

    if !metrics.top_performers.is_empty() {
        out.push_str("\nTop Performers by Confirmed Revenue:\n");
        for performer in &metrics.top_performers {
            let _ = writeln!(
                out,
                "{}. {} (ID {}): {}, {} leads, {} applications",
                performer.rank,
                performer.employee_name,
                performer.employee_id,
                money(Some(performer.revenue_confirmed)),
                count(Some(performer.leads)),
                count(Some(performer.applications)),
            );
        }
    }

    out.push_str("\nConversion Metrics:\n");
    line(&mut out, "Team Tours per Lead", ratio(conversion.team_tours_per_lead));
    line(&mut out, "Team Apps per Tour", ratio(conversion.team_apps_per_tour));
    line(&mut out, "Team Apps per Lead", ratio(conversion.team_apps_per_lead));

    out.push_str(
        "\nPlease provide:\n\
         1. Overall team performance assessment\n\
         2. Key team strengths and challenges\n\
         3. Performance distribution analysis (top performers vs. underperformers)\n\
         4. Team-wide improvement recommendations\n\
         5. Suggested team goals and KPIs for the next quarter\n\
         6. Resource allocation recommendations\n\n\
         Format your response professionally with clear sections and actionable insights.\n",
    );
    out
}

/// Prompt for period-bucketed trends.
pub fn trend(metrics: &TrendMetrics) -> String {
    let period = metrics.time_period.as_str();
    let growth = &metrics.growth_metrics;
    let pipeline = &metrics.pipeline_metrics;

    let mut out = String::new();
    out.push_str(
        "You are a sales forecasting analyst. Analyze the following sales \
         performance trends and provide forecasting insights.\n\n",
    );

    out.push_str("Data Overview:\n");
    line(&mut out, "Analysis Period", period.to_string());
    line(&mut out, "Periods Covered", growth.total_periods.to_string());
    if let Some(window) = &metrics.window {
        line(
            &mut out,
            "Date Range",
            format!("{} to {} ({} days)", window.start, window.end, window.days),
        );
        out.push_str("\nMost Recent 30 Days:\n");
        line(&mut out, "Snapshots", window.recent.records.to_string());
        line(&mut out, "Revenue", money(Some(window.recent.revenue_confirmed)));
        line(&mut out, "Leads", count(Some(window.recent.leads)));
        line(&mut out, "Applications", count(Some(window.recent.applications)));
        line(&mut out, "Average Close Rate", percent_points(window.recent.avg_close_rate));
        line(&mut out, "Total Texts (all time)", count(Some(window.total_texts)));
    }

    if !metrics.buckets.is_empty() {
        let _ = writeln!(out, "\nRevenue by {} bucket:", period);
        for bucket in &metrics.buckets {
            let _ = writeln!(
                out,
                "- {}: {} revenue, {} leads, {} applications, growth {}",
                bucket.period,
                money(Some(bucket.revenue_confirmed)),
                count(Some(bucket.leads)),
                count(Some(bucket.applications)),
                percent(bucket.growth_rate),
            );
        }
    }

    out.push_str("\nTrend Indicators:\n");
    line(&mut out, "Recent Revenue Growth", percent(growth.recent_revenue_growth));
    line(&mut out, "Average Revenue per Period", money(Some(growth.avg_period_revenue)));
    line(&mut out, "Revenue Runrate", money(pipeline.avg_revenue_runrate));
    line(&mut out, "Tours in Pipeline", count(Some(pipeline.total_pipeline_tours)));
    line(&mut out, "Pending Revenue", money(Some(pipeline.total_pending_revenue)));
    line(&mut out, "Average Deal Value", money(pipeline.avg_deal_value));
    if let Some(forecast) = &metrics.forecast {
        line(
            &mut out,
            "Naive Forecast",
            format!(
                "{}: {} revenue, {} leads",
                forecast.period,
                money(Some(forecast.revenue_confirmed)),
                count(Some(forecast.leads))
            ),
        );
    }

    let _ = write!(
        out,
        "\nPlease provide:\n\
         1. Trend analysis for {period} performance\n\
         2. Key performance indicators and their trajectories\n\
         3. Seasonal patterns and insights\n\
         4. Revenue and lead generation forecasts for the next 3 months\n\
         5. Risk factors and opportunities\n\
         6. Recommended actions to improve trends\n\
         7. Pipeline health assessment\n\n\
         Format your response with clear sections, data-driven insights, and actionable recommendations.\n",
    );
    out
}

fn line(out: &mut String, label: &str, value: String) {
    let _ = writeln!(out, "- {}: {}", label, value);
}

fn pipeline_label(status: insights_core::metrics::PipelineStatus) -> &'static str {
    use insights_core::metrics::PipelineStatus::*;
    match status {
        Thin => "thin",
        Healthy => "healthy",
        Overextended => "overextended",
        Unconverted => "unconverted",
        Empty => "empty",
        Unknown => "unknown",
    }
}

const NOT_AVAILABLE: &str = "n/a";

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Whole number with thousands separators.
fn count(value: Option<f64>) -> String {
    finite(value).map_or_else(|| NOT_AVAILABLE.to_string(), |v| group_thousands(v, 0))
}

/// Dollar amount with thousands separators and cents.
pub fn money(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) if v < 0.0 => format!("-${}", group_thousands(-v, 2)),
        Some(v) => format!("${}", group_thousands(v, 2)),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn ratio(value: Option<f64>) -> String {
    finite(value).map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.2}", v))
}

/// Fraction rendered as a percentage.
fn percent(value: Option<f64>) -> String {
    finite(value).map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.1}%", v * 100.0))
}

/// Value already expressed in percentage points.
fn percent_points(value: Option<f64>) -> String {
    finite(value).map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.2}%", v))
}

fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

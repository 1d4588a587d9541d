//! Employee activity snapshot, one per CSV row.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Accepted layouts for the `dated` column.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// A single snapshot of one sales rep's activity counters.
///
/// Numeric cells that are empty or unparseable deserialize to `None` and are
/// skipped by aggregations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: i64,
    pub employee_name: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub dated: NaiveDateTime,
    #[serde(default)]
    pub created: Option<String>,

    // Funnel
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub lead_taken: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tours_booked: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub applications: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tours_per_lead: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub apps_per_tour: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub apps_per_lead: Option<f64>,

    // Revenue
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub revenue_confirmed: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub revenue_pending: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub revenue_runrate: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub estimated_revenue: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub avg_deal_value_30_days: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub avg_close_rate_30_days: Option<f64>,

    // Tours
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tours_in_pipeline: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tours_scheduled: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tours_pending: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tours_cancelled: Option<f64>,

    // Weekday activity
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub mon_text: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub mon_call: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tue_text: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tue_call: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub wed_text: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub wed_call: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub thur_text: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub thur_call: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub fri_text: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub fri_call: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sat_text: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sat_call: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sun_text: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sun_call: Option<f64>,
}

/// Texts and calls for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyActivity {
    pub day: &'static str,
    pub texts: f64,
    pub calls: f64,
}

impl EmployeeRecord {
    /// Calendar date of the snapshot.
    pub fn date(&self) -> NaiveDate {
        self.dated.date()
    }

    /// Per-weekday activity, Monday first. Missing counts read as zero.
    pub fn daily_activity(&self) -> [DailyActivity; 7] {
        let day = |day, texts: Option<f64>, calls: Option<f64>| DailyActivity {
            day,
            texts: texts.unwrap_or(0.0),
            calls: calls.unwrap_or(0.0),
        };
        [
            day("Monday", self.mon_text, self.mon_call),
            day("Tuesday", self.tue_text, self.tue_call),
            day("Wednesday", self.wed_text, self.wed_call),
            day("Thursday", self.thur_text, self.thur_call),
            day("Friday", self.fri_text, self.fri_call),
            day("Saturday", self.sat_text, self.sat_call),
            day("Sunday", self.sun_text, self.sun_call),
        ]
    }

    pub fn total_texts(&self) -> f64 {
        self.daily_activity().iter().map(|d| d.texts).sum()
    }

    pub fn total_calls(&self) -> f64 {
        self.daily_activity().iter().map(|d| d.calls).sum()
    }
}

/// Parse a `dated` cell into a timestamp. Date-only values land at midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date '{}'", raw)))
}

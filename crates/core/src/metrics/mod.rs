//! Aggregate statistics derived from the loaded table.
//!
//! Nothing here is cached; every call recomputes from the [`Table`].
//! Missing or non-finite cells are skipped the way a dataframe skips NaN.
//!
//! [`Table`]: crate::table::Table

mod rep;
mod team;
mod trend;

pub use rep::*;
pub use team::*;
pub use trend::*;

use crate::record::EmployeeRecord;

/// Treat NaN and infinities as missing.
pub(crate) fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Sum of the present values.
pub(crate) fn sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    values.into_iter().filter_map(present).sum()
}

/// Mean of the present values, `None` if there are none.
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (total, count) = values
        .into_iter()
        .filter_map(present)
        .fold((0.0, 0usize), |(total, count), v| (total + v, count + 1));
    (count > 0).then(|| total / count as f64)
}

/// Sample standard deviation (n - 1), `None` below two values.
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let avg = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

/// Applications per lead, clamped to `[0, 1]`; zero when no leads were taken.
pub fn conversion_rate(record: &EmployeeRecord) -> Option<f64> {
    let leads = present(record.lead_taken)?;
    if leads <= 0.0 {
        return Some(0.0);
    }
    let applications = present(record.applications)?;
    Some((applications / leads).clamp(0.0, 1.0))
}

/// Confirmed revenue per lead; zero when no leads were taken.
pub fn revenue_per_lead(record: &EmployeeRecord) -> Option<f64> {
    let leads = present(record.lead_taken)?;
    if leads <= 0.0 {
        return Some(0.0);
    }
    let revenue = present(record.revenue_confirmed)?;
    Some(revenue / leads)
}

/// Weighted weekday activity: texts count once, calls twice.
pub fn activity_score(record: &EmployeeRecord) -> f64 {
    record.total_texts() + record.total_calls() * 2.0
}

//! In-memory, read-only view of the loaded dataset.

use std::collections::BTreeMap;
use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loader;
use crate::record::EmployeeRecord;

/// Every loaded snapshot, in file order.
///
/// Built once at startup and shared behind an `Arc`; there is no write path.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<EmployeeRecord>,
}

/// One row per distinct employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub employee_id: i64,
    pub employee_name: String,
    /// Number of snapshots on file
    pub records: usize,
    pub last_updated: NaiveDateTime,
}

/// Shape of the loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total_records: usize,
    pub unique_employees: usize,
    pub columns: Vec<String>,
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

impl Table {
    /// Parse a dataset from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let (columns, records) = loader::read_records(reader)?;
        Ok(Self { columns, records })
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All snapshots for one employee, oldest first.
    ///
    /// Snapshots sharing a timestamp keep file order, so the later row wins
    /// as "most recent".
    pub fn employee_history(&self, employee_id: i64) -> Vec<&EmployeeRecord> {
        let mut history: Vec<&EmployeeRecord> = self
            .records
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .collect();
        history.sort_by_key(|r| r.dated);
        history
    }

    /// The most recent snapshot for an employee.
    pub fn get_employee(&self, employee_id: i64) -> Option<&EmployeeRecord> {
        self.employee_history(employee_id).pop()
    }

    /// Distinct employees ordered by id.
    pub fn list_employees(&self) -> Vec<EmployeeSummary> {
        let mut latest: BTreeMap<i64, (&EmployeeRecord, usize)> = BTreeMap::new();
        for record in &self.records {
            latest
                .entry(record.employee_id)
                .and_modify(|(current, count)| {
                    *count += 1;
                    if record.dated >= current.dated {
                        *current = record;
                    }
                })
                .or_insert((record, 1));
        }

        latest
            .into_values()
            .map(|(record, records)| EmployeeSummary {
                employee_id: record.employee_id,
                employee_name: record.employee_name.clone(),
                records,
                last_updated: record.dated,
            })
            .collect()
    }

    /// Employees whose name contains `fragment`, ignoring case.
    pub fn search(&self, fragment: &str) -> Vec<EmployeeSummary> {
        let needle = fragment.trim().to_lowercase();
        self.list_employees()
            .into_iter()
            .filter(|e| e.employee_name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn unique_employees(&self) -> usize {
        let mut ids: Vec<i64> = self.records.iter().map(|r| r.employee_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Earliest and latest snapshot dates.
    pub fn date_range(&self) -> Option<DateRange> {
        let start = self.records.iter().map(|r| r.date()).min()?;
        let end = self.records.iter().map(|r| r.date()).max()?;
        Some(DateRange {
            start,
            end,
            days: (end - start).num_days(),
        })
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            total_records: self.len(),
            unique_employees: self.unique_employees(),
            columns: self.columns.clone(),
            date_range: self.date_range(),
        }
    }
}

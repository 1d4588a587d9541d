//! CSV dataset loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::record::EmployeeRecord;
use crate::table::Table;

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "employee_id",
    "employee_name",
    "dated",
    "lead_taken",
    "tours_booked",
    "applications",
    "revenue_confirmed",
    "revenue_pending",
];

/// Load the dataset at `path`.
///
/// Fails with a data-load error if the file is missing, is not valid CSV,
/// has a row that cannot be parsed, or lacks any of [`REQUIRED_COLUMNS`].
pub fn load(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::data_load(format!("file not found: {}", path.display())));
    }

    let file = File::open(path)?;
    Table::from_reader(file)
}

/// Read the header and every row from a CSV source.
pub(crate) fn read_records<R: Read>(reader: R) -> Result<(Vec<String>, Vec<EmployeeRecord>)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    check_columns(&columns)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<EmployeeRecord>() {
        // The csv error already carries the record position
        let record = row.map_err(|e| Error::data_load(e.to_string()))?;
        records.push(record);
    }

    Ok((columns, records))
}

fn check_columns(columns: &[String]) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|c| c == *required))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingColumns(missing))
    }
}

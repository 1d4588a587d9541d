//! Core types, dataset loading, and metric aggregation for the sales
//! insights service.

pub mod error;
pub mod loader;
pub mod metrics;
pub mod period;
pub mod record;
pub mod table;

pub use error::{Error, ErrorCode, Result};
pub use loader::load;
pub use period::Period;
pub use record::EmployeeRecord;
pub use table::{DatasetStats, EmployeeSummary, Table};

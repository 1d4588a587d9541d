//! HTTP API layer for the sales insights service.

pub mod extractors;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{AnalysisSettings, AppState};

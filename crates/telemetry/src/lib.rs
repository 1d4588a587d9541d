//! Telemetry for the sales insights service.
//!
//! Structured logs go through `tracing`; health and counters live in
//! process-wide registries that the `/health` endpoint reads.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;

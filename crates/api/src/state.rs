//! Application state shared across handlers.

use std::sync::Arc;

use insights_core::metrics::DEFAULT_TOP_PERFORMERS;
use insights_core::Table;
use llm_client::InsightGenerator;
use serde::{Deserialize, Serialize};

/// Tunables for the analysis endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Size of the team top-performer list
    #[serde(default = "default_top_performers")]
    pub top_performers: usize,
}

fn default_top_performers() -> usize {
    DEFAULT_TOP_PERFORMERS
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_performers: default_top_performers(),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Dataset loaded at startup; never written
    pub table: Arc<Table>,
    /// Commentary generator (Gemini in production, mock in tests)
    pub insights: InsightGenerator,
    pub settings: AnalysisSettings,
}

impl AppState {
    pub fn new(table: Arc<Table>, insights: InsightGenerator) -> Self {
        Self::with_settings(table, insights, AnalysisSettings::default())
    }

    /// Create with custom analysis settings.
    pub fn with_settings(
        table: Arc<Table>,
        insights: InsightGenerator,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            table,
            insights,
            settings,
        }
    }
}

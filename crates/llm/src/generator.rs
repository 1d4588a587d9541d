//! Insight generation with fallback.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use insights_core::metrics::{RepMetrics, TeamMetrics, TrendMetrics};
use insights_core::EmployeeRecord;
use serde::Serialize;
use telemetry::{health, metrics};
use tracing::{debug, warn};

use crate::client::LanguageModel;
use crate::prompt;

/// Which analysis is being annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Individual,
    Team,
    Trend,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Team => "team",
            Self::Trend => "trend",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics to be turned into commentary.
#[derive(Debug, Clone, Copy)]
pub enum InsightRequest<'a> {
    Individual {
        record: &'a EmployeeRecord,
        metrics: &'a RepMetrics,
    },
    Team {
        metrics: &'a TeamMetrics,
    },
    Trend {
        metrics: &'a TrendMetrics,
    },
}

impl InsightRequest<'_> {
    pub fn kind(&self) -> InsightKind {
        match self {
            Self::Individual { .. } => InsightKind::Individual,
            Self::Team { .. } => InsightKind::Team,
            Self::Trend { .. } => InsightKind::Trend,
        }
    }

    /// Render the prompt for this request.
    pub fn prompt(&self) -> String {
        match self {
            Self::Individual { record, metrics } => prompt::individual(record, metrics),
            Self::Team { metrics } => prompt::team(metrics),
            Self::Trend { metrics } => prompt::trend(metrics),
        }
    }
}

/// Static commentary returned when the model cannot be reached.
pub fn fallback_text(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Individual => {
            "AI analysis is temporarily unavailable. The performance metrics above \
             were computed from the latest data and can be reviewed directly."
        }
        InsightKind::Team => {
            "AI team analysis is temporarily unavailable. The team metrics above \
             were computed from the latest data and can be reviewed directly."
        }
        InsightKind::Trend => {
            "AI trend analysis is temporarily unavailable. The trend metrics above \
             were computed from the latest data and can be reviewed directly."
        }
    }
}

/// Produces commentary for metrics. Never fails.
#[derive(Clone)]
pub struct InsightGenerator {
    model: Arc<dyn LanguageModel>,
}

impl InsightGenerator {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Name of the backing model.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Generate commentary, substituting fallback text on any model error.
    pub async fn generate(&self, request: InsightRequest<'_>) -> String {
        let kind = request.kind();
        let prompt = request.prompt();
        metrics().insight_requests.inc();

        let started = Instant::now();
        let result = self.model.complete(&prompt).await;
        metrics()
            .llm_latency_ms
            .observe(started.elapsed().as_millis() as u64);

        match result {
            Ok(text) => {
                health().llm.set_healthy();
                debug!(
                    kind = %kind,
                    model = self.model.name(),
                    prompt_chars = prompt.len(),
                    "Generated insight"
                );
                text
            }
            Err(e) => {
                metrics().insight_failures.inc();
                health().llm.set_unhealthy(e.to_string());
                warn!(
                    kind = %kind,
                    model = self.model.name(),
                    error = %e,
                    "Insight generation failed, using fallback"
                );
                fallback_text(kind).to_string()
            }
        }
    }
}

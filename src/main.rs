//! Sales Insights API
//!
//! Serves performance analysis for a sales team:
//! - CSV dataset loaded once at startup
//! - Per-rep, team-wide, and period-bucketed metrics
//! - Natural-language commentary from Gemini, with static fallback

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

use api::{router, AnalysisSettings, AppState};
use llm_client::{GeminiClient, InsightGenerator, LlmConfig};
use telemetry::{health, init_tracing_from_env, metrics};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Path of the sales performance CSV
    #[serde(default = "default_data_path")]
    data_path: String,

    #[serde(default)]
    analysis: AnalysisSettings,

    #[serde(default)]
    llm: LlmConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_data_path() -> String {
    "sales_performance_data.csv".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_path: default_data_path(),
            analysis: AnalysisSettings::default(),
            llm: LlmConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting Sales Insights API v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    require_api_key(&config)?;

    info!(
        data_path = %config.data_path,
        model = %config.llm.model,
        top_performers = config.analysis.top_performers,
        "Loaded configuration"
    );

    // Load the dataset; the service cannot run without it
    let table = match insights_core::load(&config.data_path) {
        Ok(table) => table,
        Err(e) => {
            health().dataset.set_unhealthy(e.to_string());
            error!(path = %config.data_path, error = %e, "Failed to load dataset");
            return Err(e).context("Failed to load sales data");
        }
    };
    let table = Arc::new(table);

    health().dataset.set_healthy();
    metrics().records_loaded.set(table.len() as u64);
    metrics().employees_loaded.set(table.unique_employees() as u64);
    info!(
        records = table.len(),
        employees = table.unique_employees(),
        columns = table.columns().len(),
        "Dataset loaded"
    );
    if table.is_empty() {
        warn!("Dataset has no rows; analysis endpoints will return empty metrics");
    }

    // The model is assumed reachable until a call fails
    let client = GeminiClient::new(&config.llm).context("Failed to create Gemini client")?;
    health().llm.set_healthy();
    let insights = InsightGenerator::new(Arc::new(client));

    let state = AppState::with_settings(table, insights, config.analysis);
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    let counters = metrics().snapshot();
    info!(
        analysis_requests = counters.analysis_requests,
        analysis_errors = counters.analysis_errors,
        insight_requests = counters.insight_requests,
        insight_failures = counters.insight_failures,
        llm_latency_mean_ms = counters.llm_latency_mean_ms,
        "Shutdown complete"
    );
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let mut config = build_config("config/default", environment())?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

/// `SALES__`-prefixed variables for nested keys, e.g. `SALES__ANALYSIS__TOP_PERFORMERS`.
fn environment() -> config::Environment {
    config::Environment::default()
        .separator("__")
        .prefix("SALES")
        .try_parsing(true)
}

/// Layer defaults, the optional TOML file at `file` and `env`.
fn build_config(file: &str, env: config::Environment) -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name(file)
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(env)
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Apply the flat variable names, looked up through `get`.
fn apply_env_overrides(config: &mut Config, get: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(path) = get("SALES_DATA_PATH") {
        config.data_path = path;
    }
    if let Some(model) = get("SALES_LLM_MODEL") {
        config.llm.model = model;
    }
    if let Some(base_url) = get("SALES_LLM_BASE_URL") {
        config.llm.base_url = base_url;
    }
    if let Some(timeout) = get("SALES_LLM_TIMEOUT_SECS") {
        config.llm.timeout_secs = timeout
            .trim()
            .parse()
            .context("SALES_LLM_TIMEOUT_SECS must be a whole number of seconds")?;
    }

    // Conventional key name, shared with other Gemini tooling
    if let Some(api_key) = get("GEMINI_API_KEY") {
        config.llm.api_key = Some(api_key);
    }

    Ok(())
}

/// Startup fails without a non-blank Gemini API key.
fn require_api_key(config: &Config) -> Result<()> {
    if config.llm.api_key().is_none() {
        error!("GEMINI_API_KEY is not set");
        bail!("GEMINI_API_KEY not found in environment variables");
    }
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}

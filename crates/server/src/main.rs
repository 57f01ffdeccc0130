//! Price prediction server
//!
//! Loads the trained pipeline and value catalog once at startup and
//! serves predictions over HTTP. Missing or corrupt artifacts are fatal:
//! the process refuses to start rather than serve garbage numbers.

use anyhow::{Context, Result};
use pricer_lib::{
    artifacts::{self, PipelineBundle},
    catalog::ValueCatalog,
    health::{components, HealthRegistry},
    observability::{PricerMetrics, StructuredLogger},
    pipeline::{DisplayConfig, PriceFormatter, PricePipeline},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting price-server");

    // Load configuration
    let config = config::ServerConfig::load()?;
    let model_dir = PathBuf::from(&config.model_dir);
    info!(model_dir = %model_dir.display(), "Server configured");

    // Load trained artifacts; any failure here is fatal
    let bundle = PipelineBundle::load(&model_dir).context("failed to load pipeline artifacts")?;
    let model_version = bundle.version.clone();
    let pipeline =
        Arc::new(PricePipeline::load(&bundle).context("failed to build price pipeline")?);
    let catalog = ValueCatalog::load(&artifacts::catalog_path(&model_dir))
        .context("failed to load value catalog")?;

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::ARTIFACTS).await;
    health_registry.register(components::PIPELINE).await;
    health_registry.register(components::CATALOG).await;

    // Initialize metrics
    let metrics = PricerMetrics::new();
    metrics.set_model_version(&model_version);

    // Initialize structured logger
    let logger = StructuredLogger::new("price-server");
    logger.log_startup(SERVER_VERSION, &model_version);

    let formatter = PriceFormatter::with_config(DisplayConfig {
        currency_symbol: config.currency_symbol.clone(),
    });

    // Create shared application state
    let app_state = Arc::new(api::AppState::new(
        pipeline,
        catalog,
        formatter,
        model_dir,
        health_registry.clone(),
        metrics,
        logger.clone(),
    ));

    // Mark server as ready after artifacts are loaded
    health_registry.set_ready(true).await;

    // Start the API server
    let _api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");

    Ok(())
}

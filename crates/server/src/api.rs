//! HTTP API for predictions, form options, health checks, and metrics

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pricer_lib::{
    artifacts::{self, PipelineBundle},
    catalog::ValueCatalog,
    error::ArtifactError,
    health::{ComponentStatus, HealthRegistry},
    models::{LaptopSpec, PricePrediction},
    normalizer::InputNormalizer,
    observability::{PricerMetrics, StructuredLogger},
    pipeline::{PriceFormatter, PricePipeline},
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::info;

/// Shared application state
pub struct AppState {
    pub pipeline: Arc<PricePipeline>,
    pub catalog: RwLock<Arc<ValueCatalog>>,
    pub formatter: PriceFormatter,
    pub model_dir: PathBuf,
    pub health_registry: HealthRegistry,
    pub metrics: PricerMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(
        pipeline: Arc<PricePipeline>,
        catalog: ValueCatalog,
        formatter: PriceFormatter,
        model_dir: PathBuf,
        health_registry: HealthRegistry,
        metrics: PricerMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            pipeline,
            catalog: RwLock::new(Arc::new(catalog)),
            formatter,
            model_dir,
            health_registry,
            metrics,
            logger,
        }
    }
}

/// Error payload; `error` distinguishes bad input from model failure.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// Run one prediction request through the normalizer and the pipeline.
///
/// Normalization errors are rejected with 422 before inference is
/// attempted; pipeline failures return 500 with a distinct error body
/// and never a fallback price.
async fn predict(State(state): State<Arc<AppState>>, Json(spec): Json<LaptopSpec>) -> Response {
    let start = Instant::now();

    let schema = state.pipeline.schema();
    let record = match InputNormalizer::new(&schema).normalize(&spec) {
        Ok(record) => record,
        Err(err) => {
            state.metrics.inc_rejected_inputs();
            state.logger.log_rejected_input(&err.to_string());
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    error: "invalid_input",
                    message: err.to_string(),
                }),
            )
                .into_response();
        }
    };

    let log_price = match state.pipeline.predict(&record) {
        Ok(raw) => raw,
        Err(err) => {
            state.metrics.inc_prediction_errors();
            state.logger.log_prediction_failure(&err.to_string());
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "prediction_failed",
                    message: err.to_string(),
                }),
            )
                .into_response();
        }
    };

    let price = state.formatter.price(log_price);
    let display_price = state.formatter.display(log_price);
    let model_version = state.pipeline.version();

    let latency = start.elapsed().as_secs_f64();
    state.metrics.observe_prediction_latency(latency);
    state.metrics.inc_predictions();
    state.logger.log_prediction(
        &spec.company,
        &spec.type_name,
        price,
        &display_price,
        &model_version,
        latency * 1000.0,
    );

    (
        StatusCode::OK,
        Json(PricePrediction {
            price,
            log_price,
            display_price,
            ppi: record.ppi,
            model_version,
            generated_at: chrono::Utc::now().timestamp(),
        }),
    )
        .into_response()
}

/// Selectable options for the prediction form
async fn options(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = state.catalog.read().await;
    Json(catalog.options())
}

#[derive(Debug, Serialize)]
struct ReloadResponse {
    reloaded: bool,
    model_version: String,
}

fn load_artifacts(state: &AppState) -> Result<(String, ValueCatalog), ArtifactError> {
    let bundle = PipelineBundle::load(&state.model_dir)?;
    let catalog = ValueCatalog::load(&artifacts::catalog_path(&state.model_dir))?;
    state.pipeline.reload(&bundle)?;
    Ok((bundle.version, catalog))
}

/// Artifact rotation: re-read the model directory and swap the pipeline
/// and catalog. On failure the previous artifacts keep serving.
async fn reload(State(state): State<Arc<AppState>>) -> Response {
    use pricer_lib::health::components;

    let old_version = state.pipeline.version();
    match load_artifacts(&state) {
        Ok((new_version, catalog)) => {
            *state.catalog.write().await = Arc::new(catalog);
            state.metrics.set_model_version(&new_version);
            state.health_registry.set_healthy(components::ARTIFACTS).await;
            state.health_registry.set_healthy(components::PIPELINE).await;
            state.health_registry.set_healthy(components::CATALOG).await;
            state
                .logger
                .log_artifact_reload(&old_version, &new_version, true);
            (
                StatusCode::OK,
                Json(ReloadResponse {
                    reloaded: true,
                    model_version: new_version,
                }),
            )
                .into_response()
        }
        Err(err) => {
            state
                .logger
                .log_artifact_reload(&old_version, &old_version, false);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "reload_failed",
                    message: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/predict", post(predict))
        .route("/api/v1/options", get(options))
        .route("/api/v1/admin/reload", post(reload))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Observability infrastructure for the prediction service
//!
//! Provides:
//! - Prometheus metrics (prediction latency, prediction/normalization
//!   error counts, loaded model version)
//! - Structured JSON logging with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, GaugeVec, Histogram, IntCounter,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<PricerMetricsInner> = OnceLock::new();

struct PricerMetricsInner {
    prediction_latency_seconds: Histogram,
    predictions_total: IntCounter,
    prediction_errors_total: IntCounter,
    rejected_inputs_total: IntCounter,
    model_version_info: GaugeVec,
}

impl PricerMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "price_predictor_prediction_latency_seconds",
                "Time spent normalizing inputs and running inference",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            predictions_total: register_int_counter!(
                "price_predictor_predictions_total",
                "Total number of successful price predictions"
            )
            .expect("Failed to register predictions_total"),

            prediction_errors_total: register_int_counter!(
                "price_predictor_prediction_errors_total",
                "Total number of pipeline prediction failures"
            )
            .expect("Failed to register prediction_errors_total"),

            rejected_inputs_total: register_int_counter!(
                "price_predictor_rejected_inputs_total",
                "Total number of requests rejected during normalization"
            )
            .expect("Failed to register rejected_inputs_total"),

            model_version_info: register_gauge_vec!(
                "price_predictor_model_version_info",
                "Information about the currently loaded pipeline artifact",
                &["version"]
            )
            .expect("Failed to register model_version_info"),
        }
    }
}

/// Service metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct PricerMetrics {
    _private: (),
}

impl Default for PricerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PricerMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(PricerMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &PricerMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record an end-to-end prediction latency observation
    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner().prediction_latency_seconds.observe(duration_secs);
    }

    pub fn inc_predictions(&self) {
        self.inner().predictions_total.inc();
    }

    pub fn inc_prediction_errors(&self) {
        self.inner().prediction_errors_total.inc();
    }

    pub fn inc_rejected_inputs(&self) {
        self.inner().rejected_inputs_total.inc();
    }

    /// Update the loaded model version info gauge
    pub fn set_model_version(&self, version: &str) {
        self.inner().model_version_info.reset();
        self.inner()
            .model_version_info
            .with_label_values(&[version])
            .set(1.0);
    }
}

/// Structured logger for prediction service events
#[derive(Clone)]
pub struct StructuredLogger {
    service: String,
}

impl StructuredLogger {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Log a served prediction
    pub fn log_prediction(
        &self,
        company: &str,
        type_name: &str,
        price: f64,
        display_price: &str,
        model_version: &str,
        latency_ms: f64,
    ) {
        info!(
            event = "prediction_served",
            service = %self.service,
            company = %company,
            type_name = %type_name,
            price = price,
            display_price = %display_price,
            model_version = %model_version,
            latency_ms = latency_ms,
            "Served price prediction"
        );
    }

    /// Log a request rejected during normalization
    pub fn log_rejected_input(&self, reason: &str) {
        info!(
            event = "input_rejected",
            service = %self.service,
            reason = %reason,
            "Rejected prediction request"
        );
    }

    /// Log a pipeline failure
    pub fn log_prediction_failure(&self, reason: &str) {
        warn!(
            event = "prediction_failed",
            service = %self.service,
            reason = %reason,
            "Pipeline failed to produce a prediction"
        );
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str, model_version: &str) {
        info!(
            event = "service_started",
            service = %self.service,
            service_version = %version,
            model_version = %model_version,
            "Price predictor started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service,
            reason = %reason,
            "Price predictor shutting down"
        );
    }

    /// Log an artifact reload attempt
    pub fn log_artifact_reload(&self, old_version: &str, new_version: &str, success: bool) {
        if success {
            info!(
                event = "artifacts_reloaded",
                service = %self.service,
                old_version = %old_version,
                new_version = %new_version,
                "Pipeline artifacts reloaded"
            );
        } else {
            warn!(
                event = "artifact_reload_failed",
                service = %self.service,
                old_version = %old_version,
                new_version = %new_version,
                "Artifact reload failed, keeping previous pipeline"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        // Metrics are registered in a process-global registry, so this
        // exercises the handle rather than asserting on registry state.
        let metrics = PricerMetrics::new();

        metrics.observe_prediction_latency(0.001);
        metrics.inc_predictions();
        metrics.inc_prediction_errors();
        metrics.inc_rejected_inputs();
        metrics.set_model_version("2024.1");
    }

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("price-server");
        assert_eq!(logger.service, "price-server");
    }
}

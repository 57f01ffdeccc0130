//! Core library for the laptop price predictor
//!
//! This crate provides the core functionality for:
//! - Normalizing raw laptop specifications into the fitted feature schema
//! - ML-based price inference over a trained ONNX regressor
//! - Display-price formatting
//! - Artifact loading and schema validation
//! - Health checks and observability

pub mod artifacts;
pub mod catalog;
pub mod error;
pub mod health;
pub mod models;
pub mod normalizer;
pub mod observability;
pub mod pipeline;
pub mod schema;

pub use error::{ArtifactError, NormalizeError, PredictError};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{PricerMetrics, StructuredLogger};

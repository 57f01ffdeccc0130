//! Error types for normalization, inference, and artifact loading
//!
//! Normalization errors are recoverable per-request rejections; prediction
//! errors surface model failures distinctly so callers can tell "bad input"
//! from "model failure"; artifact errors are fatal at startup.

use std::path::PathBuf;
use thiserror::Error;

/// A raw input could not be converted into the fitted feature schema.
///
/// These are caught and reported before any inference attempt.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("expected \"Yes\" or \"No\", got {0:?}")]
    InvalidChoice(String),

    #[error("malformed resolution {0:?}: expected \"<width>x<height>\"")]
    MalformedResolution(String),

    #[error("screen size must be greater than zero, got {0}")]
    NonPositiveScreenSize(f64),

    #[error("{field} {value} is outside the supported range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} {value} is not a supported option")]
    UnsupportedOption { field: &'static str, value: String },

    #[error("unknown {field} value {value:?}")]
    UnknownCategory { field: String, value: String },
}

/// The trained pipeline failed to produce a usable prediction.
///
/// Never converted into a fallback numeric guess.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("{field} value {value:?} is not in the fitted vocabulary")]
    UnknownCategory { field: String, value: String },

    #[error("encoded feature vector has {got} values, model expects {expected}")]
    WidthMismatch { got: usize, expected: usize },

    #[error("model execution failed: {0}")]
    Execution(anyhow::Error),

    #[error("model produced no output")]
    EmptyOutput,

    #[error("model produced a non-finite prediction: {0}")]
    NonFinite(f64),

    #[error("pipeline lock poisoned")]
    LockPoisoned,
}

/// A trained artifact could not be loaded or failed validation.
///
/// Fatal: the process must not serve predictions in this state.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("schema lists {got} fields, normalizer produces {expected}")]
    FieldCount { got: usize, expected: usize },

    #[error("schema field {index} is {got:?}, normalizer produces {expected:?}")]
    FieldMismatch {
        index: usize,
        got: String,
        expected: String,
    },

    #[error("checksum mismatch for {path:?}: recorded {expected}, computed {got}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        got: String,
    },

    #[error("failed to load ONNX model: {0}")]
    Model(anyhow::Error),

    #[error("model input width {model} does not match encoded schema width {schema}")]
    WidthMismatch { model: usize, schema: usize },
}

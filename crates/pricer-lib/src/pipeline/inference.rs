//! ONNX inference using tract
//!
//! Runs the trained price regressor over the encoded feature vector. The
//! regressor is opaque: one `[1, width]` f32 tensor in, one log-scale price
//! out. The model and its schema swap together behind a lock so artifact
//! rotation never mixes an old vocabulary with a new regressor.

use super::encoder;
use crate::artifacts::PipelineBundle;
use crate::error::{ArtifactError, PredictError};
use crate::models::FeatureRecord;
use crate::schema::FeatureSchema;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tract_onnx::prelude::*;
use tracing::{debug, warn};

/// Maximum inference latency before warning (5ms target)
const MAX_INFERENCE_MS: u128 = 5;

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// A fitted regressor over an encoded feature vector.
///
/// The trait seam lets tests substitute a deterministic stub for the
/// opaque ONNX artifact.
pub trait Regressor: Send + Sync {
    /// Width of the encoded input vector the regressor was fit on.
    fn input_width(&self) -> usize;

    /// Run the regressor, returning the raw log-scale prediction.
    fn run(&self, input: &[f32]) -> Result<f64, PredictError>;
}

/// tract-backed regressor loaded from ONNX bytes.
pub struct OnnxRegressor {
    model: TractModel,
    width: usize,
}

impl OnnxRegressor {
    /// Parse and optimize an ONNX model for a fixed input width.
    pub fn from_bytes(model_bytes: &[u8], width: usize) -> Result<Self, ArtifactError> {
        let model = tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(model_bytes))
            .and_then(|m| m.with_input_fact(0, f32::fact([1, width]).into()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(ArtifactError::Model)?;
        Ok(Self { model, width })
    }
}

impl Regressor for OnnxRegressor {
    fn input_width(&self) -> usize {
        self.width
    }

    fn run(&self, input: &[f32]) -> Result<f64, PredictError> {
        let tensor: Tensor =
            tract_ndarray::Array2::from_shape_vec((1, input.len()), input.to_vec())
                .map_err(|e| PredictError::Execution(e.into()))?
                .into();

        let result = self
            .model
            .run(tvec!(tensor.into()))
            .map_err(PredictError::Execution)?;
        let output = result.first().ok_or(PredictError::EmptyOutput)?;
        let view = output
            .to_array_view::<f32>()
            .map_err(PredictError::Execution)?;
        let raw = view.iter().next().copied().ok_or(PredictError::EmptyOutput)?;
        Ok(f64::from(raw))
    }
}

struct PipelineInner {
    regressor: Box<dyn Regressor>,
    schema: Arc<FeatureSchema>,
    version: String,
}

/// The trained pipeline: fitted encoder + regressor, loaded once and
/// shared read-only across requests.
pub struct PricePipeline {
    inner: RwLock<PipelineInner>,
}

impl PricePipeline {
    /// Build the pipeline from a validated artifact bundle.
    pub fn load(bundle: &PipelineBundle) -> Result<Self, ArtifactError> {
        let regressor = OnnxRegressor::from_bytes(&bundle.model_bytes, bundle.schema.encoded_width())?;
        Self::from_parts(Box::new(regressor), Arc::clone(&bundle.schema), bundle.version.clone())
    }

    /// Assemble a pipeline from pre-built parts, checking that the
    /// regressor's input width matches the schema's encoded width.
    pub fn from_parts(
        regressor: Box<dyn Regressor>,
        schema: Arc<FeatureSchema>,
        version: String,
    ) -> Result<Self, ArtifactError> {
        if regressor.input_width() != schema.encoded_width() {
            return Err(ArtifactError::WidthMismatch {
                model: regressor.input_width(),
                schema: schema.encoded_width(),
            });
        }
        Ok(Self {
            inner: RwLock::new(PipelineInner {
                regressor,
                schema,
                version,
            }),
        })
    }

    /// Swap in a new artifact bundle atomically.
    pub fn reload(&self, bundle: &PipelineBundle) -> Result<(), ArtifactError> {
        let width = bundle.schema.encoded_width();
        let regressor = OnnxRegressor::from_bytes(&bundle.model_bytes, width)?;
        let mut inner = self.inner.write().map_err(|_| {
            ArtifactError::Model(anyhow::anyhow!("pipeline lock poisoned during reload"))
        })?;
        inner.regressor = Box::new(regressor);
        inner.schema = Arc::clone(&bundle.schema);
        inner.version = bundle.version.clone();
        debug!(version = %inner.version, "Pipeline reloaded");
        Ok(())
    }

    /// Run inference, returning the raw log-scale prediction.
    pub fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictError> {
        let start = Instant::now();
        let inner = self.inner.read().map_err(|_| PredictError::LockPoisoned)?;

        let encoded = encoder::encode(&inner.schema, record)?;
        if encoded.len() != inner.regressor.input_width() {
            return Err(PredictError::WidthMismatch {
                got: encoded.len(),
                expected: inner.regressor.input_width(),
            });
        }

        let raw = inner.regressor.run(&encoded)?;
        if !raw.is_finite() {
            return Err(PredictError::NonFinite(raw));
        }

        let elapsed = start.elapsed();
        if elapsed.as_millis() > MAX_INFERENCE_MS {
            warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                "Inference exceeded {}ms target", MAX_INFERENCE_MS
            );
        } else {
            debug!(elapsed_us = elapsed.as_micros() as u64, "Inference completed");
        }

        Ok(raw)
    }

    /// The fitted schema currently backing the pipeline.
    pub fn schema(&self) -> Arc<FeatureSchema> {
        self.inner
            .read()
            .map(|inner| Arc::clone(&inner.schema))
            .unwrap_or_else(|poisoned| Arc::clone(&poisoned.into_inner().schema))
    }

    /// Version string of the loaded artifact.
    pub fn version(&self) -> String {
        self.inner
            .read()
            .map(|inner| inner.version.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::test_support::sample_schema;

    /// Deterministic stand-in for the opaque ONNX artifact.
    struct StubRegressor {
        width: usize,
        output: f64,
    }

    impl Regressor for StubRegressor {
        fn input_width(&self) -> usize {
            self.width
        }

        fn run(&self, input: &[f32]) -> Result<f64, PredictError> {
            assert_eq!(input.len(), self.width);
            Ok(self.output)
        }
    }

    fn sample_record() -> FeatureRecord {
        FeatureRecord {
            company: "Dell".to_string(),
            type_name: "Notebook".to_string(),
            ram_gb: 8,
            weight_kg: 1.5,
            touchscreen: 0,
            ips: 1,
            screen_resolution: "1920x1080".to_string(),
            ppi: 169.45,
            cpu_brand: "Intel Core i5".to_string(),
            hdd_gb: 0,
            ssd_gb: 256,
            gpu_brand: "Intel".to_string(),
            os: "Windows".to_string(),
        }
    }

    fn stub_pipeline(output: f64) -> PricePipeline {
        let schema = Arc::new(sample_schema());
        let regressor = StubRegressor {
            width: schema.encoded_width(),
            output,
        };
        PricePipeline::from_parts(Box::new(regressor), schema, "test".to_string()).unwrap()
    }

    #[test]
    fn test_predict_returns_raw_log_output() {
        let pipeline = stub_pipeline(10.8);
        let raw = pipeline.predict(&sample_record()).unwrap();
        assert_eq!(raw, 10.8);
    }

    #[test]
    fn test_predict_rejects_non_finite_output() {
        let pipeline = stub_pipeline(f64::NAN);
        assert!(matches!(
            pipeline.predict(&sample_record()),
            Err(PredictError::NonFinite(_))
        ));

        let pipeline = stub_pipeline(f64::INFINITY);
        assert!(matches!(
            pipeline.predict(&sample_record()),
            Err(PredictError::NonFinite(_))
        ));
    }

    #[test]
    fn test_predict_surfaces_unknown_category() {
        let pipeline = stub_pipeline(10.8);
        let mut record = sample_record();
        record.os = "TempleOS".to_string();
        assert!(matches!(
            pipeline.predict(&record),
            Err(PredictError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_from_parts_rejects_width_mismatch() {
        let schema = Arc::new(sample_schema());
        let regressor = StubRegressor {
            width: schema.encoded_width() + 1,
            output: 0.0,
        };
        assert!(matches!(
            PricePipeline::from_parts(Box::new(regressor), schema, "test".to_string()),
            Err(ArtifactError::WidthMismatch { .. })
        ));
    }

    #[test]
    fn test_schema_and_version_accessors() {
        let pipeline = stub_pipeline(1.0);
        assert_eq!(pipeline.version(), "test");
        assert_eq!(pipeline.schema().fields.len(), 13);
    }
}

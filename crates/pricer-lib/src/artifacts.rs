//! Trained artifact loading
//!
//! The model directory holds three artifacts: `schema.json` (the versioned
//! input schema plus the regressor file name and its SHA-256), the ONNX
//! regressor itself, and `catalog.json`. Loading validates the schema
//! against the normalizer's output columns and verifies the regressor
//! checksum; any failure is fatal at startup.

use crate::error::ArtifactError;
use crate::schema::FeatureSchema;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Schema artifact file name within the model directory.
pub const SCHEMA_FILE: &str = "schema.json";

/// Catalog artifact file name within the model directory.
pub const CATALOG_FILE: &str = "catalog.json";

/// Validated schema plus raw regressor bytes, ready to build a pipeline.
pub struct PipelineBundle {
    pub schema: Arc<FeatureSchema>,
    pub model_bytes: Vec<u8>,
    pub version: String,
}

impl PipelineBundle {
    /// Read and validate the pipeline artifacts from a model directory.
    pub fn load(model_dir: &Path) -> Result<Self, ArtifactError> {
        let schema_path = model_dir.join(SCHEMA_FILE);
        let raw = std::fs::read_to_string(&schema_path).map_err(|source| ArtifactError::Io {
            path: schema_path.clone(),
            source,
        })?;
        let schema: FeatureSchema =
            serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
                path: schema_path,
                source,
            })?;
        schema.validate()?;

        let model_path = model_dir.join(&schema.model_file);
        let model_bytes = std::fs::read(&model_path).map_err(|source| ArtifactError::Io {
            path: model_path.clone(),
            source,
        })?;
        verify_checksum(&model_path, &model_bytes, &schema.model_sha256)?;

        info!(
            schema_version = %schema.schema_version,
            model_file = %schema.model_file,
            encoded_width = schema.encoded_width(),
            "Pipeline artifacts loaded"
        );

        let version = schema.schema_version.clone();
        Ok(Self {
            schema: Arc::new(schema),
            model_bytes,
            version,
        })
    }
}

/// Path to the catalog artifact within a model directory.
pub fn catalog_path(model_dir: &Path) -> PathBuf {
    model_dir.join(CATALOG_FILE)
}

fn verify_checksum(path: &Path, bytes: &[u8], expected: &str) -> Result<(), ArtifactError> {
    let got = hex::encode(Sha256::digest(bytes));
    if got.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(ArtifactError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            got,
        })
    }
}

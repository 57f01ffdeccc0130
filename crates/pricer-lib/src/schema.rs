//! Versioned feature schema shared between training and inference
//!
//! The trained artifact ships an explicit `schema.json` describing the
//! columns the pipeline was fit on: their names, order, kind, and the
//! fitted vocabulary of each categorical column. Loading validates the
//! schema against the normalizer's output columns so a drifted artifact
//! fails fast instead of silently mispredicting.

use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};

/// Columns the normalizer produces, in fitted order.
pub const EXPECTED_FIELDS: [&str; 13] = [
    "Company",
    "TypeName",
    "Ram",
    "Weight",
    "Touchscreen",
    "Ips",
    "ScreenResolution",
    "ppi",
    "Cpu brand",
    "HDD",
    "SSD",
    "Gpu brand",
    "os",
];

/// How a single column is presented to the regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    /// Passed through as one f32 slot.
    Numeric,
    /// One-hot encoded over the fitted vocabulary, one slot per value.
    Categorical { vocabulary: Vec<String> },
}

/// One column of the fitted schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Number of f32 slots this field occupies in the encoded vector.
    pub fn width(&self) -> usize {
        match &self.kind {
            FieldKind::Numeric => 1,
            FieldKind::Categorical { vocabulary } => vocabulary.len(),
        }
    }
}

/// The fitted input schema of the trained pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub schema_version: String,
    /// Regressor file name relative to the model directory.
    pub model_file: String,
    /// Hex SHA-256 of the regressor file.
    pub model_sha256: String,
    pub fields: Vec<FieldSpec>,
}

impl FeatureSchema {
    /// Check that field names and order match what the normalizer emits.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.fields.len() != EXPECTED_FIELDS.len() {
            return Err(ArtifactError::FieldCount {
                got: self.fields.len(),
                expected: EXPECTED_FIELDS.len(),
            });
        }
        for (index, (field, expected)) in self.fields.iter().zip(EXPECTED_FIELDS).enumerate() {
            if field.name != expected {
                return Err(ArtifactError::FieldMismatch {
                    index,
                    got: field.name.clone(),
                    expected: expected.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Total width of the encoded feature vector.
    pub fn encoded_width(&self) -> usize {
        self.fields.iter().map(FieldSpec::width).sum()
    }

    /// Fitted vocabulary of a categorical field, if the field is categorical.
    pub fn vocabulary(&self, field: &str) -> Option<&[String]> {
        self.fields.iter().find(|f| f.name == field).and_then(|f| match &f.kind {
            FieldKind::Categorical { vocabulary } => Some(vocabulary.as_slice()),
            FieldKind::Numeric => None,
        })
    }

    /// Whether `value` is in the fitted vocabulary of `field`.
    pub fn contains(&self, field: &str, value: &str) -> bool {
        self.vocabulary(field)
            .map(|vocab| vocab.iter().any(|v| v == value))
            .unwrap_or(false)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A small but complete fitted schema for unit tests.
    pub fn sample_schema() -> FeatureSchema {
        let cat = |name: &str, vocab: &[&str]| FieldSpec {
            name: name.to_string(),
            kind: FieldKind::Categorical {
                vocabulary: vocab.iter().map(|v| v.to_string()).collect(),
            },
        };
        let num = |name: &str| FieldSpec {
            name: name.to_string(),
            kind: FieldKind::Numeric,
        };

        FeatureSchema {
            schema_version: "2024.1".to_string(),
            model_file: "regressor.onnx".to_string(),
            model_sha256: String::new(),
            fields: vec![
                cat("Company", &["Dell", "HP", "Apple"]),
                cat("TypeName", &["Notebook", "Ultrabook", "Gaming"]),
                num("Ram"),
                num("Weight"),
                num("Touchscreen"),
                num("Ips"),
                cat("ScreenResolution", &["1920x1080", "1366x768", "3840x2160"]),
                num("ppi"),
                cat("Cpu brand", &["Intel Core i5", "Intel Core i7", "AMD Processor"]),
                num("HDD"),
                num("SSD"),
                cat("Gpu brand", &["Intel", "Nvidia", "AMD"]),
                cat("os", &["Windows", "Mac", "Others/No OS/Linux"]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::sample_schema;
    use super::*;

    #[test]
    fn test_valid_schema_passes() {
        assert!(sample_schema().validate().is_ok());
    }

    #[test]
    fn test_field_count_mismatch_rejected() {
        let mut schema = sample_schema();
        schema.fields.pop();
        assert!(matches!(
            schema.validate(),
            Err(ArtifactError::FieldCount { got: 12, expected: 13 })
        ));
    }

    #[test]
    fn test_reordered_fields_rejected() {
        let mut schema = sample_schema();
        schema.fields.swap(0, 1);
        match schema.validate() {
            Err(ArtifactError::FieldMismatch { index, got, expected }) => {
                assert_eq!(index, 0);
                assert_eq!(got, "TypeName");
                assert_eq!(expected, "Company");
            }
            other => panic!("expected FieldMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_encoded_width() {
        // 7 numeric slots + 3+3+3+3+3+3 one-hot slots
        assert_eq!(sample_schema().encoded_width(), 25);
    }

    #[test]
    fn test_vocabulary_lookup() {
        let schema = sample_schema();
        assert_eq!(schema.vocabulary("Company").unwrap().len(), 3);
        assert!(schema.vocabulary("Ram").is_none());
        assert!(schema.vocabulary("Price").is_none());
    }

    #[test]
    fn test_contains() {
        let schema = sample_schema();
        assert!(schema.contains("Company", "Dell"));
        assert!(!schema.contains("Company", "Commodore"));
        assert!(!schema.contains("Ram", "8"));
    }

    #[test]
    fn test_schema_json_round_trip() {
        let json = r#"{
            "schema_version": "2024.1",
            "model_file": "regressor.onnx",
            "model_sha256": "abc123",
            "fields": [
                {"name": "Company", "kind": "categorical", "vocabulary": ["Dell"]},
                {"name": "Ram", "kind": "numeric"}
            ]
        }"#;
        let schema: FeatureSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[0].width(), 1);
        assert!(matches!(schema.fields[1].kind, FieldKind::Numeric));
    }
}

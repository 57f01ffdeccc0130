//! Schema-driven feature encoding
//!
//! Walks the fitted schema in column order, passing numeric fields through
//! as single f32 slots and one-hot encoding categorical fields over their
//! fitted vocabularies. An out-of-vocabulary value is an error, never a
//! silent all-zero row.

use crate::error::PredictError;
use crate::models::{FeatureRecord, FieldValue};
use crate::schema::{FeatureSchema, FieldKind};

/// Encode a feature record into the f32 vector the regressor expects.
pub fn encode(schema: &FeatureSchema, record: &FeatureRecord) -> Result<Vec<f32>, PredictError> {
    let mut encoded = Vec::with_capacity(schema.encoded_width());

    for field in &schema.fields {
        let value = record
            .value_of(&field.name)
            .ok_or_else(|| PredictError::UnknownCategory {
                field: field.name.clone(),
                value: "<missing>".to_string(),
            })?;

        match (&field.kind, value) {
            (FieldKind::Numeric, FieldValue::Numeric(n)) => encoded.push(n as f32),
            (FieldKind::Categorical { vocabulary }, FieldValue::Categorical(v)) => {
                let position = vocabulary.iter().position(|candidate| candidate == v).ok_or_else(
                    || PredictError::UnknownCategory {
                        field: field.name.clone(),
                        value: v.to_string(),
                    },
                )?;
                for i in 0..vocabulary.len() {
                    encoded.push(if i == position { 1.0 } else { 0.0 });
                }
            }
            // Kind disagreement means the artifact was fit on a different
            // column layout than the normalizer emits.
            (_, v) => {
                return Err(PredictError::UnknownCategory {
                    field: field.name.clone(),
                    value: format!("{:?}", v),
                })
            }
        }
    }

    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::test_support::sample_schema;

    fn sample_record() -> FeatureRecord {
        FeatureRecord {
            company: "HP".to_string(),
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
            gpu_brand: "Nvidia".to_string(),
            os: "Windows".to_string(),
        }
    }

    #[test]
    fn test_encoded_width_matches_schema() {
        let schema = sample_schema();
        let encoded = encode(&schema, &sample_record()).unwrap();
        assert_eq!(encoded.len(), schema.encoded_width());
    }

    #[test]
    fn test_one_hot_layout() {
        let schema = sample_schema();
        let encoded = encode(&schema, &sample_record()).unwrap();

        // Company vocab is [Dell, HP, Apple]; record is HP
        assert_eq!(&encoded[0..3], &[0.0, 1.0, 0.0]);
        // TypeName vocab is [Notebook, Ultrabook, Gaming]; record is Notebook
        assert_eq!(&encoded[3..6], &[1.0, 0.0, 0.0]);
        // Then the Ram and Weight numeric slots
        assert_eq!(encoded[6], 8.0);
        assert_eq!(encoded[7], 1.5);
    }

    #[test]
    fn test_numeric_passthrough_positions() {
        let schema = sample_schema();
        let encoded = encode(&schema, &sample_record()).unwrap();

        // Touchscreen and Ips binary slots follow Weight
        assert_eq!(encoded[8], 0.0);
        assert_eq!(encoded[9], 1.0);
        // ppi slot follows the ScreenResolution one-hot block
        assert!((encoded[13] - 169.45).abs() < 0.01);
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        let schema = sample_schema();
        let mut record = sample_record();
        record.gpu_brand = "Voodoo".to_string();

        match encode(&schema, &record) {
            Err(PredictError::UnknownCategory { field, value }) => {
                assert_eq!(field, "Gpu brand");
                assert_eq!(value, "Voodoo");
            }
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let schema = sample_schema();
        let record = sample_record();
        assert_eq!(
            encode(&schema, &record).unwrap(),
            encode(&schema, &record).unwrap()
        );
    }
}

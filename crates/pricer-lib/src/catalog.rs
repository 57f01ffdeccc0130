//! Categorical value catalog
//!
//! The observed values per categorical column from the training set,
//! persisted alongside the model. Consumed only to populate selectable
//! options on the form; the numeric contract goes through the schema.

use crate::error::ArtifactError;
use crate::normalizer::{
    DEFAULT_SCREEN_SIZE_INCHES, DEFAULT_WEIGHT_KG, HDD_OPTIONS_GB, RAM_OPTIONS_GB,
    RESOLUTION_OPTIONS, SCREEN_SIZE_RANGE_INCHES, SSD_OPTIONS_GB, WEIGHT_RANGE_KG,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Known values per categorical field, keyed by fitted column name on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueCatalog {
    #[serde(rename = "Company")]
    pub companies: Vec<String>,
    #[serde(rename = "TypeName")]
    pub type_names: Vec<String>,
    #[serde(rename = "Cpu brand")]
    pub cpu_brands: Vec<String>,
    #[serde(rename = "Gpu brand")]
    pub gpu_brands: Vec<String>,
    #[serde(rename = "os")]
    pub operating_systems: Vec<String>,
}

impl ValueCatalog {
    /// Load the catalog from its JSON artifact.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Everything the form needs to render its selectors.
    pub fn options(&self) -> FormOptions {
        FormOptions {
            companies: self.companies.clone(),
            type_names: self.type_names.clone(),
            cpu_brands: self.cpu_brands.clone(),
            gpu_brands: self.gpu_brands.clone(),
            operating_systems: self.operating_systems.clone(),
            ram_gb: RAM_OPTIONS_GB.to_vec(),
            hdd_gb: HDD_OPTIONS_GB.to_vec(),
            ssd_gb: SSD_OPTIONS_GB.to_vec(),
            resolutions: RESOLUTION_OPTIONS.iter().map(|r| r.to_string()).collect(),
            weight_kg: RangeSpec {
                min: WEIGHT_RANGE_KG.0,
                max: WEIGHT_RANGE_KG.1,
                default: DEFAULT_WEIGHT_KG,
                step: 0.1,
            },
            screen_size_inches: RangeSpec {
                min: SCREEN_SIZE_RANGE_INCHES.0,
                max: SCREEN_SIZE_RANGE_INCHES.1,
                default: DEFAULT_SCREEN_SIZE_INCHES,
                step: 0.1,
            },
        }
    }
}

/// A bounded numeric input with a suggested default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeSpec {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

/// Selectable options and ranges for the prediction form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormOptions {
    pub companies: Vec<String>,
    pub type_names: Vec<String>,
    pub cpu_brands: Vec<String>,
    pub gpu_brands: Vec<String>,
    pub operating_systems: Vec<String>,
    pub ram_gb: Vec<u32>,
    pub hdd_gb: Vec<u32>,
    pub ssd_gb: Vec<u32>,
    pub resolutions: Vec<String>,
    pub weight_kg: RangeSpec,
    pub screen_size_inches: RangeSpec,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_catalog() -> ValueCatalog {
        ValueCatalog {
            companies: vec!["Dell".to_string(), "HP".to_string()],
            type_names: vec!["Notebook".to_string()],
            cpu_brands: vec!["Intel Core i5".to_string()],
            gpu_brands: vec!["Intel".to_string(), "Nvidia".to_string()],
            operating_systems: vec!["Windows".to_string(), "Mac".to_string()],
        }
    }

    #[test]
    fn test_load_from_fitted_column_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "Company": ["Dell", "Apple"],
                "TypeName": ["Ultrabook"],
                "Cpu brand": ["Intel Core i7"],
                "Gpu brand": ["AMD"],
                "os": ["Others/No OS/Linux"]
            }}"#
        )
        .unwrap();

        let catalog = ValueCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.companies, vec!["Dell", "Apple"]);
        assert_eq!(catalog.operating_systems, vec!["Others/No OS/Linux"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ValueCatalog::load(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(err, Err(ArtifactError::Io { .. })));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            ValueCatalog::load(file.path()),
            Err(ArtifactError::Parse { .. })
        ));
    }

    #[test]
    fn test_options_carry_fixed_sets_and_ranges() {
        let options = sample_catalog().options();
        assert_eq!(options.ram_gb, vec![2, 4, 6, 8, 12, 16, 24, 32, 64]);
        assert_eq!(options.hdd_gb, vec![0, 128, 256, 512, 1024, 2048]);
        assert_eq!(options.ssd_gb, vec![0, 8, 128, 256, 512, 1024]);
        assert_eq!(options.resolutions.len(), 9);
        assert_eq!(options.weight_kg.default, 1.5);
        assert_eq!(options.screen_size_inches.min, 10.0);
        assert_eq!(options.screen_size_inches.max, 18.0);
        assert_eq!(options.companies, vec!["Dell", "HP"]);
    }
}

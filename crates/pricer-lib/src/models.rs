//! Core data models for the price predictor

use serde::{Deserialize, Serialize};

/// Raw laptop specification as submitted by the interaction surface.
///
/// Touchscreen and IPS arrive as "Yes"/"No" choices and the screen is
/// described by physical size plus a resolution string; the normalizer
/// turns these into the fitted feature schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaptopSpec {
    pub company: String,
    pub type_name: String,
    pub ram_gb: u32,
    pub weight_kg: f64,
    pub touchscreen: String,
    pub ips: String,
    pub screen_size_inches: f64,
    pub screen_resolution: String,
    pub cpu_brand: String,
    pub hdd_gb: u32,
    pub ssd_gb: u32,
    pub gpu_brand: String,
    pub os: String,
}

/// The fixed-schema record consumed by the trained pipeline.
///
/// Field names and order match the columns the pipeline was fit on.
/// Constructed fresh per request and discarded after use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "TypeName")]
    pub type_name: String,
    #[serde(rename = "Ram")]
    pub ram_gb: u32,
    #[serde(rename = "Weight")]
    pub weight_kg: f64,
    #[serde(rename = "Touchscreen")]
    pub touchscreen: u8,
    #[serde(rename = "Ips")]
    pub ips: u8,
    #[serde(rename = "ScreenResolution")]
    pub screen_resolution: String,
    #[serde(rename = "ppi")]
    pub ppi: f64,
    #[serde(rename = "Cpu brand")]
    pub cpu_brand: String,
    #[serde(rename = "HDD")]
    pub hdd_gb: u32,
    #[serde(rename = "SSD")]
    pub ssd_gb: u32,
    #[serde(rename = "Gpu brand")]
    pub gpu_brand: String,
    #[serde(rename = "os")]
    pub os: String,
}

/// A single field value viewed through the fitted schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Numeric(f64),
    Categorical(&'a str),
}

impl FeatureRecord {
    /// Look up a field by its fitted column name.
    pub fn value_of(&self, field: &str) -> Option<FieldValue<'_>> {
        let value = match field {
            "Company" => FieldValue::Categorical(&self.company),
            "TypeName" => FieldValue::Categorical(&self.type_name),
            "Ram" => FieldValue::Numeric(f64::from(self.ram_gb)),
            "Weight" => FieldValue::Numeric(self.weight_kg),
            "Touchscreen" => FieldValue::Numeric(f64::from(self.touchscreen)),
            "Ips" => FieldValue::Numeric(f64::from(self.ips)),
            "ScreenResolution" => FieldValue::Categorical(&self.screen_resolution),
            "ppi" => FieldValue::Numeric(self.ppi),
            "Cpu brand" => FieldValue::Categorical(&self.cpu_brand),
            "HDD" => FieldValue::Numeric(f64::from(self.hdd_gb)),
            "SSD" => FieldValue::Numeric(f64::from(self.ssd_gb)),
            "Gpu brand" => FieldValue::Categorical(&self.gpu_brand),
            "os" => FieldValue::Categorical(&self.os),
            _ => return None,
        };
        Some(value)
    }
}

/// Prediction output for a single request.
///
/// `price` is the authoritative un-rounded value; `display_price` is a
/// lossy presentation of the same number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePrediction {
    pub price: f64,
    pub log_price: f64,
    pub display_price: String,
    pub ppi: f64,
    pub model_version: String,
    pub generated_at: i64,
}

//! Input normalization for price inference
//!
//! Converts raw form values (brand, "Yes"/"No" choices, a "WxH" resolution
//! string, physical screen size) into the exact feature record the trained
//! pipeline was fit on: unit coercion, binary mapping, and the derived ppi
//! feature. Rejects anything outside the supported ranges or the fitted
//! vocabularies before inference is attempted.

use crate::error::NormalizeError;
use crate::models::{FeatureRecord, LaptopSpec};
use crate::schema::FeatureSchema;

/// Supported RAM sizes in GB.
pub const RAM_OPTIONS_GB: [u32; 9] = [2, 4, 6, 8, 12, 16, 24, 32, 64];

/// Supported HDD sizes in GB.
pub const HDD_OPTIONS_GB: [u32; 6] = [0, 128, 256, 512, 1024, 2048];

/// Supported SSD sizes in GB.
pub const SSD_OPTIONS_GB: [u32; 6] = [0, 8, 128, 256, 512, 1024];

/// Supported screen resolutions.
pub const RESOLUTION_OPTIONS: [&str; 9] = [
    "1920x1080",
    "1366x768",
    "1600x900",
    "3840x2160",
    "3200x1800",
    "2880x1800",
    "2560x1600",
    "2560x1440",
    "2304x1440",
];

/// Supported weight range in kg.
pub const WEIGHT_RANGE_KG: (f64, f64) = (0.0, 5.0);

/// Supported physical screen size range in inches.
pub const SCREEN_SIZE_RANGE_INCHES: (f64, f64) = (10.0, 18.0);

/// Default weight suggested by the form.
pub const DEFAULT_WEIGHT_KG: f64 = 1.5;

/// Default screen size suggested by the form.
pub const DEFAULT_SCREEN_SIZE_INCHES: f64 = 13.0;

/// Map a "Yes"/"No" choice to 1/0. Any other value is a contract violation.
pub fn to_binary(choice: &str) -> Result<u8, NormalizeError> {
    match choice {
        "Yes" => Ok(1),
        "No" => Ok(0),
        other => Err(NormalizeError::InvalidChoice(other.to_string())),
    }
}

/// Split a `"<width>x<height>"` string into its two positive dimensions.
pub fn parse_resolution(s: &str) -> Result<(u32, u32), NormalizeError> {
    let malformed = || NormalizeError::MalformedResolution(s.to_string());

    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(malformed());
    }
    let width: u32 = parts[0].parse().map_err(|_| malformed())?;
    let height: u32 = parts[1].parse().map_err(|_| malformed())?;
    if width == 0 || height == 0 {
        return Err(malformed());
    }
    Ok((width, height))
}

/// Pixels per inch from resolution and physical screen size.
///
/// The form constrains screen size to 10.0-18.0 inches, but the guard
/// against non-positive sizes holds regardless of the caller.
pub fn compute_ppi(width: u32, height: u32, screen_size_inches: f64) -> Result<f64, NormalizeError> {
    if screen_size_inches <= 0.0 {
        return Err(NormalizeError::NonPositiveScreenSize(screen_size_inches));
    }
    let diagonal_px = (f64::from(width).powi(2) + f64::from(height).powi(2)).sqrt();
    Ok(diagonal_px / screen_size_inches)
}

/// Normalizes raw laptop specs against a loaded feature schema.
///
/// Pure and request-scoped: the same spec always produces the same record.
pub struct InputNormalizer<'a> {
    schema: &'a FeatureSchema,
}

impl<'a> InputNormalizer<'a> {
    pub fn new(schema: &'a FeatureSchema) -> Self {
        Self { schema }
    }

    /// Assemble the 13-field feature record in fitted order.
    pub fn normalize(&self, spec: &LaptopSpec) -> Result<FeatureRecord, NormalizeError> {
        check_range("weight_kg", spec.weight_kg, WEIGHT_RANGE_KG)?;
        check_range(
            "screen_size_inches",
            spec.screen_size_inches,
            SCREEN_SIZE_RANGE_INCHES,
        )?;
        check_option("ram_gb", spec.ram_gb, &RAM_OPTIONS_GB)?;
        check_option("hdd_gb", spec.hdd_gb, &HDD_OPTIONS_GB)?;
        check_option("ssd_gb", spec.ssd_gb, &SSD_OPTIONS_GB)?;

        let touchscreen = to_binary(&spec.touchscreen)?;
        let ips = to_binary(&spec.ips)?;
        let (width, height) = parse_resolution(&spec.screen_resolution)?;
        let ppi = compute_ppi(width, height, spec.screen_size_inches)?;

        self.check_vocabulary("Company", &spec.company)?;
        self.check_vocabulary("TypeName", &spec.type_name)?;
        self.check_vocabulary("ScreenResolution", &spec.screen_resolution)?;
        self.check_vocabulary("Cpu brand", &spec.cpu_brand)?;
        self.check_vocabulary("Gpu brand", &spec.gpu_brand)?;
        self.check_vocabulary("os", &spec.os)?;

        Ok(FeatureRecord {
            company: spec.company.clone(),
            type_name: spec.type_name.clone(),
            ram_gb: spec.ram_gb,
            weight_kg: spec.weight_kg,
            touchscreen,
            ips,
            screen_resolution: spec.screen_resolution.clone(),
            ppi,
            cpu_brand: spec.cpu_brand.clone(),
            hdd_gb: spec.hdd_gb,
            ssd_gb: spec.ssd_gb,
            gpu_brand: spec.gpu_brand.clone(),
            os: spec.os.clone(),
        })
    }

    /// Vocabulary membership check against the fitted schema.
    ///
    /// The encoder re-checks this; rejecting here keeps out-of-vocabulary
    /// values from ever reaching the pipeline.
    fn check_vocabulary(&self, field: &str, value: &str) -> Result<(), NormalizeError> {
        if self.schema.contains(field, value) {
            Ok(())
        } else {
            Err(NormalizeError::UnknownCategory {
                field: field.to_string(),
                value: value.to_string(),
            })
        }
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), NormalizeError> {
    if value < min || value > max || !value.is_finite() {
        return Err(NormalizeError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn check_option(field: &'static str, value: u32, options: &[u32]) -> Result<(), NormalizeError> {
    if options.contains(&value) {
        Ok(())
    } else {
        Err(NormalizeError::UnsupportedOption {
            field,
            value: value.to_string(),
        })
    }
}

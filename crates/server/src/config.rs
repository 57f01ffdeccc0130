//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Prediction server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Directory holding schema.json, the ONNX regressor, and catalog.json
    #[serde(default = "default_model_dir")]
    pub model_dir: String,

    /// Currency symbol for display prices
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_api_port() -> u16 {
    8080
}

fn default_model_dir() -> String {
    std::env::var("PRICER_MODEL_DIR").unwrap_or_else(|_| "./model".to_string())
}

fn default_currency_symbol() -> String {
    pricer_lib::pipeline::DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("PRICER"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ServerConfig {
            api_port: default_api_port(),
            model_dir: default_model_dir(),
            currency_symbol: default_currency_symbol(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::load().unwrap();
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.currency_symbol, "₹");
    }
}

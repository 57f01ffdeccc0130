//! Trained price pipeline: fitted encoder + ONNX regressor

mod encoder;
mod inference;
mod output;

pub use encoder::encode;
pub use inference::{OnnxRegressor, PricePipeline, Regressor};
pub use output::{DisplayConfig, PriceFormatter, DEFAULT_CURRENCY_SYMBOL};

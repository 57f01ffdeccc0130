//! CLI command implementations

pub mod health;
pub mod options;
pub mod predict;

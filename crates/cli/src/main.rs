//! Laptop Price Predictor CLI
//!
//! A command-line tool for requesting price predictions, listing the
//! selectable form options, and checking server health.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{health, options, predict};

/// Laptop Price Predictor CLI
#[derive(Parser)]
#[command(name = "lpp")]
#[command(author, version, about = "CLI for the Laptop Price Predictor", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via LPP_API_URL env var)
    #[arg(long, env = "LPP_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict the price of a laptop specification
    Predict(PredictArgs),

    /// List the selectable options for the prediction form
    Options,

    /// Show server health
    Health,

    /// Reload the model artifacts on the server
    Reload,
}

#[derive(Args)]
pub struct PredictArgs {
    /// Laptop brand
    #[arg(long)]
    pub company: String,

    /// Laptop type (Notebook, Ultrabook, Gaming, ...)
    #[arg(long = "type")]
    pub type_name: String,

    /// RAM in GB
    #[arg(long)]
    pub ram: u32,

    /// Weight in kg
    #[arg(long, default_value_t = 1.5)]
    pub weight: f64,

    /// Touchscreen (Yes/No)
    #[arg(long, default_value = "No")]
    pub touchscreen: String,

    /// IPS display (Yes/No)
    #[arg(long, default_value = "No")]
    pub ips: String,

    /// Screen size in inches
    #[arg(long, default_value_t = 13.0)]
    pub screen_size: f64,

    /// Screen resolution, e.g. 1920x1080
    #[arg(long, default_value = "1920x1080")]
    pub resolution: String,

    /// CPU brand
    #[arg(long)]
    pub cpu: String,

    /// HDD storage in GB
    #[arg(long, default_value_t = 0)]
    pub hdd: u32,

    /// SSD storage in GB
    #[arg(long, default_value_t = 0)]
    pub ssd: u32,

    /// GPU brand
    #[arg(long)]
    pub gpu: String,

    /// Operating system
    #[arg(long)]
    pub os: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize client
    let client = client::ApiClient::new(&cli.api_url)?;

    // Execute command
    match cli.command {
        Commands::Predict(args) => {
            predict::predict(&client, &args, cli.format).await?;
        }
        Commands::Options => {
            options::show_options(&client, cli.format).await?;
        }
        Commands::Health => {
            health::show_health(&client, cli.format).await?;
        }
        Commands::Reload => {
            health::reload_artifacts(&client, cli.format).await?;
        }
    }

    Ok(())
}

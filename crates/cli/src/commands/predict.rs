//! Price prediction command

use anyhow::Result;
use colored::Colorize;

use crate::client::{ApiClient, PredictRequest, PredictResponse};
use crate::output::{format_timestamp, OutputFormat};
use crate::PredictArgs;

/// Request a price prediction for the given specification
pub async fn predict(client: &ApiClient, args: &PredictArgs, format: OutputFormat) -> Result<()> {
    let request = PredictRequest {
        company: args.company.clone(),
        type_name: args.type_name.clone(),
        ram_gb: args.ram,
        weight_kg: args.weight,
        touchscreen: args.touchscreen.clone(),
        ips: args.ips.clone(),
        screen_size_inches: args.screen_size,
        screen_resolution: args.resolution.clone(),
        cpu_brand: args.cpu.clone(),
        hdd_gb: args.hdd,
        ssd_gb: args.ssd,
        gpu_brand: args.gpu.clone(),
        os: args.os.clone(),
    };

    let response: PredictResponse = client.post("api/v1/predict", &request).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!();
            println!(
                "  Estimated price: {}",
                response.display_price.green().bold()
            );
            println!("  Exact value:     {:.2}", response.price);
            println!("  Screen density:  {:.1} ppi", response.ppi);
            println!("  Model version:   {}", response.model_version);
            println!("  Generated at:    {}", format_timestamp(response.generated_at));
            println!();
        }
    }

    Ok(())
}

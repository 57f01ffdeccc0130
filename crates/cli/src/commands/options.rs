//! Form options command

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, FormOptions, RangeSpec};
use crate::output::OutputFormat;

/// Row for the options table
#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Choices")]
    choices: String,
}

/// List selectable options for the prediction form
pub async fn show_options(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let options: FormOptions = client.get("api/v1/options").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&options)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            let rows = vec![
                OptionRow {
                    field: "Brand".to_string(),
                    choices: options.companies.join(", "),
                },
                OptionRow {
                    field: "Type".to_string(),
                    choices: options.type_names.join(", "),
                },
                OptionRow {
                    field: "CPU brand".to_string(),
                    choices: options.cpu_brands.join(", "),
                },
                OptionRow {
                    field: "GPU brand".to_string(),
                    choices: options.gpu_brands.join(", "),
                },
                OptionRow {
                    field: "OS".to_string(),
                    choices: options.operating_systems.join(", "),
                },
                OptionRow {
                    field: "RAM (GB)".to_string(),
                    choices: join_numbers(&options.ram_gb),
                },
                OptionRow {
                    field: "HDD (GB)".to_string(),
                    choices: join_numbers(&options.hdd_gb),
                },
                OptionRow {
                    field: "SSD (GB)".to_string(),
                    choices: join_numbers(&options.ssd_gb),
                },
                OptionRow {
                    field: "Resolution".to_string(),
                    choices: options.resolutions.join(", "),
                },
                OptionRow {
                    field: "Weight (kg)".to_string(),
                    choices: describe_range(&options.weight_kg),
                },
                OptionRow {
                    field: "Screen size (in)".to_string(),
                    choices: describe_range(&options.screen_size_inches),
                },
            ];

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
        }
    }

    Ok(())
}

fn join_numbers(values: &[u32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_range(range: &RangeSpec) -> String {
    format!(
        "{} to {} (default {})",
        range.min, range.max, range.default
    )
}

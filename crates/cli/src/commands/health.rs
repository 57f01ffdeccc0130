//! Server health and artifact management commands

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, HealthResponse, ReloadResponse};
use crate::output::{color_status, print_success, print_warning, OutputFormat};

/// Row for the component health table
#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Show server health
pub async fn show_health(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let health: HealthResponse = client.get("healthz").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&health)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("Overall status: {}", color_status(&health.status));

            if health.status == "degraded" {
                print_warning("Server is degraded but still operational");
            }

            let mut rows: Vec<ComponentRow> = health
                .components
                .iter()
                .map(|(name, state)| ComponentRow {
                    component: name.clone(),
                    status: color_status(&state.status),
                    message: state.message.clone().unwrap_or_default(),
                })
                .collect();
            rows.sort_by(|a, b| a.component.cmp(&b.component));

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
        }
    }

    Ok(())
}

/// Ask the server to reload its model artifacts
pub async fn reload_artifacts(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let response: ReloadResponse = client.post_empty("api/v1/admin/reload").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            print_success(&format!(
                "Artifacts reloaded, model version {}",
                response.model_version
            ));
        }
    }

    Ok(())
}

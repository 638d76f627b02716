use dotenvy::dotenv;
use pairsheet_service::config::Settings;
use pairsheet_service::observability::init_tracing;
use pairsheet_service::services::GoogleSheetClient;
use pairsheet_service::startup::Application;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing("info");

    let settings = Settings::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let sheets = Arc::new(GoogleSheetClient::new(settings.sheet.clone()));

    let app = Application::build(&settings, sheets).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    info!("Starting pairsheet-service on port {}", app.port());
    app.run_until_stopped().await?;

    Ok(())
}

//! # Kolmeya Tracker Main Entry Point

use std::sync::Arc;

use kolmeya_tracker::{
    config::ConfigLoader,
    db::{health_check, init_pool, init_schema},
    server::run_server,
    sms::KolmeyaClient,
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from layered env files and variables
    let config_loader = ConfigLoader::new();
    let config = config_loader.load()?;

    telemetry::init_tracing(&config)?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }
    if config.api_key.is_none() {
        tracing::warn!("KOLMEYA_API_KEY is not set; provider calls will be rejected");
    }

    let db = init_pool(&config).await?;
    init_schema(&db).await?;
    health_check(&db).await?;

    let dispatcher = Arc::new(KolmeyaClient::from_config(&config)?);
    run_server(config, db, dispatcher).await
}

//! Tenor pricing server
//!
//! Loads configuration (from `TENOR_CONFIG` when set) and serves the pricing
//! API on localhost.

use anyhow::Context;
use tenor_api::{start_server, AppState};
use tenor_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tenor=debug".parse()?)
                .add_directive("fixed_rate=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    tracing::info!("Starting Tenor");

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let port = config.api_port;
    tracing::info!(
        "Collateral threshold {} bps, {} currencies configured",
        config.collateral_threshold_bps,
        config.currencies.0.len()
    );

    let state = AppState::with_config(config);
    start_server(state, port)
        .await
        .with_context(|| format!("API server on port {} failed", port))?;

    Ok(())
}

//! Vetchart API Server
//!
//! Run with: cargo run --bin vetchart-api
//!
//! # Configuration
//!
//! Read from `VETCHART_CONFIG` if set, otherwise from the default config
//! locations. `VETCHART_*` environment variables override file values
//! (see `vetchart config` for the full list). `RUST_LOG` overrides the
//! configured log level.

use std::path::PathBuf;

use vetchart::api::{serve, AppState};
use vetchart::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("VETCHART_CONFIG") {
        Ok(path) => Config::load_with_env(&PathBuf::from(path))?,
        Err(_) => Config::load_default(),
    };
    config.logging.init();

    tracing::info!("Starting Vetchart API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        variant = %config.chart.variant,
        theme = %config.chart.theme,
        "Chart defaults"
    );

    let state = AppState::from_config(&config);
    let api_config = state.config.as_ref().clone();

    tracing::info!("Starting server on {}:{}", api_config.host, api_config.port);
    serve(state, &api_config).await?;

    tracing::info!("Vetchart API server stopped");
    Ok(())
}

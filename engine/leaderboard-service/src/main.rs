//! Sheet Leaderboard Service
//!
//! Polls both published sheets immediately and then on every tick, and keeps the leaderboard page
//! up to date until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

use leaderboard_service::{
    graceful_shutdown, initialize_logging_with_config, load_configuration, setup_signal_handlers,
    ServiceState,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load configuration before logging so the configured level and format apply
    let config = load_configuration().context("Failed to load configuration")?;
    let _log_guard = initialize_logging_with_config(&config.logging)?;

    info!("Starting Sheet Leaderboard Service v{}", env!("CARGO_PKG_VERSION"));

    let service_state = Arc::new(ServiceState::new(config).await?);
    info!("Service state initialized");

    let shutdown_signal = setup_signal_handlers()?;
    info!("Signal handlers configured");

    let refresh_handle = {
        let state = service_state.clone();
        tokio::spawn(async move {
            if let Err(e) = state.start_refresh_loop().await {
                error!("Refresh loop failed: {}", e);
            }
        })
    };

    info!("Sheet Leaderboard Service is running. Press Ctrl+C to shutdown gracefully.");
    let _ = shutdown_signal.await;

    info!("Shutdown signal received. Initiating graceful shutdown...");
    graceful_shutdown(service_state, refresh_handle).await?;

    info!("Sheet Leaderboard Service shutdown complete");
    Ok(())
}

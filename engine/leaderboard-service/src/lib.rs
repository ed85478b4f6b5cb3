//! Sheet Leaderboard Service Library
//!
//! Wires the sheet fetcher, the leaderboard presenter and the refresh clock into a long-running
//! service: configuration loading, logging setup, the refresh cycle itself and graceful shutdown.

use anyhow::{Context, Result};

pub mod config;
pub mod logging;
pub mod refresher;
pub mod service;
pub mod signals;

pub use config::ServiceConfig;
pub use logging::initialize_logging_with_config;
pub use refresher::{LeaderboardRefresher, RefreshError};
pub use service::{ServiceRefresher, ServiceState};
pub use signals::{graceful_shutdown, setup_signal_handlers};

/// Load configuration from files and environment variables
pub fn load_configuration() -> Result<ServiceConfig> {
    config::load_config().context("Failed to load service configuration")
}

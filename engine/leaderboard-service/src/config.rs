//! Service configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use leaderboard_presenter::PresenterConfig;
use refresh_clock::ClockConfig;
use sheet_fetcher::FetcherConfig;

/// Environment variable naming an optional TOML configuration file
pub const CONFIG_PATH_ENV: &str = "LEADERBOARD_CONFIG";

/// Configuration file read when `LEADERBOARD_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "leaderboard.toml";

/// Prefix of environment overrides, e.g. `LEADERBOARD__CLOCK__CADENCE_MS=30000`
pub const ENV_PREFIX: &str = "LEADERBOARD";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Sheet endpoints and column layout
    pub fetcher: FetcherConfig,

    /// Refresh cadence
    pub clock: ClockConfig,

    /// Page output and display texts
    pub presenter: PresenterConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Service-level configuration
    pub service: ServiceSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    pub level: String,

    /// Log format (compact, pretty, json)
    pub format: String,

    /// Log file path (if None, logs to stdout)
    pub file: Option<PathBuf>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { shutdown_timeout_secs: 10 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "compact".to_string(), file: None }
    }
}

/// Load configuration from the optional file and environment variables
pub fn load_config() -> Result<ServiceConfig> {
    let path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    load_config_from(Some(&path))
}

/// Load configuration: defaults, then `path` if it exists, then `LEADERBOARD__*` variables
pub fn load_config_from(path: Option<&Path>) -> Result<ServiceConfig> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        if path.exists() {
            tracing::debug!("Loading configuration from file: {:?}", path);
        }
        builder = builder.add_source(config::File::from(path).required(false));
    }

    builder = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true));

    let config: ServiceConfig = builder
        .build()
        .context("Failed to assemble configuration sources")?
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    config.fetcher.validate().context("Invalid fetcher configuration")?;
    config.clock.validate().context("Invalid clock configuration")?;

    // Validate log level
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    // Validate log format
    match config.logging.format.as_str() {
        "compact" | "json" | "pretty" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    if config.presenter.output_path.as_os_str().is_empty() {
        return Err(anyhow::anyhow!("Presenter output path is empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_fixed_setup() {
        let config = ServiceConfig::default();
        assert_eq!(config.clock.cadence_ms, 15_000);
        assert_eq!(config.fetcher.layout.score_column, 8);
        assert_eq!(config.fetcher.group_a.label, "MSCI");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn file_overrides_are_merged_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.toml");
        std::fs::write(
            &path,
            r#"
[fetcher.layout]
score_column = 12

[fetcher.group_b]
label = "Women"
url = "http://localhost:9/women.csv"

[clock]
cadence_ms = 30000

[logging]
format = "json"
"#,
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.fetcher.layout.score_column, 12);
        assert_eq!(config.fetcher.layout.name_column, 0);
        assert_eq!(config.fetcher.group_b.label, "Women");
        assert_eq!(config.fetcher.group_a.label, "MSCI");
        assert_eq!(config.clock.cadence_ms, 30_000);
        assert!(config.clock.immediate_first_tick);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.clock.cadence_ms, 15_000);
    }

    #[test]
    fn rejects_invalid_values() {
        let mut config = ServiceConfig::default();
        config.logging.level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = ServiceConfig::default();
        config.clock.cadence_ms = 0;
        assert!(validate_config(&config).is_err());

        let mut config = ServiceConfig::default();
        config.fetcher.group_a.url.clear();
        assert!(validate_config(&config).is_err());
    }
}

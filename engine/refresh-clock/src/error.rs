//! Error types for RefreshClock

use thiserror::Error;

/// Errors that can occur in the RefreshClock
#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clock is already running")]
    AlreadyRunning,
}

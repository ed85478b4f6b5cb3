//! Configuration for RefreshClock

use crate::error::ClockError;
use crate::{DEFAULT_CADENCE_MS, DEFAULT_METRICS_HISTORY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the RefreshClock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Time between refresh cycles in milliseconds (default: 15000)
    pub cadence_ms: u64,

    /// Fire the first cycle at startup instead of one cadence later
    pub immediate_first_tick: bool,

    /// Number of recent cycle durations kept for statistics
    pub metrics_history: usize,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            cadence_ms: DEFAULT_CADENCE_MS,
            immediate_first_tick: true,
            metrics_history: DEFAULT_METRICS_HISTORY,
        }
    }
}

impl ClockConfig {
    /// Get cadence as Duration
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }

    pub fn validate(&self) -> Result<(), ClockError> {
        if self.cadence_ms == 0 {
            return Err(ClockError::Config("cadence_ms must be positive".to_string()));
        }
        if self.metrics_history == 0 {
            return Err(ClockError::Config("metrics_history must be positive".to_string()));
        }
        Ok(())
    }
}

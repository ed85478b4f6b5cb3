//! # RefreshClock
//!
//! The heartbeat of the leaderboard service. It fires one refresh cycle immediately and then once
//! per cadence, forever, and keeps count of how those cycles went.
//!
//! Time comes from a [`Ticker`], so the production loop runs on a tokio interval while tests step
//! it by hand. Cycles never overlap: a cycle always runs to completion before the next tick is
//! awaited, and ticks missed in the meantime are skipped.

pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod ticker;


pub use clock::{CycleTask, RefreshClock};
pub use config::ClockConfig;
pub use error::ClockError;
pub use metrics::{CycleMetrics, CycleMetricsSnapshot};
pub use ticker::{manual_ticker, IntervalTicker, ManualTicker, TickHandle, TickId, Ticker};

/// Default refresh cadence (15 seconds)
pub const DEFAULT_CADENCE_MS: u64 = 15_000;

/// Default number of cycle durations kept for statistics
pub const DEFAULT_METRICS_HISTORY: usize = 100;

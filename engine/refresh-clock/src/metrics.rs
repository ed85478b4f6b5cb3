//! Metrics collection for RefreshClock

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::ticker::TickId;

/// Point-in-time view of the refresh loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleMetricsSnapshot {
    /// Tick of the most recent cycle
    pub last_tick: TickId,

    /// Total cycles run
    pub total_cycles: u64,

    /// Cycles that rendered fresh data
    pub succeeded_cycles: u64,

    /// Cycles that left the previous render in place
    pub failed_cycles: u64,

    /// Failures since the last success
    pub consecutive_failures: u64,

    /// Duration of the last cycle in milliseconds
    pub last_cycle_ms: u64,

    /// Average over the recent history in milliseconds
    pub avg_cycle_ms: u64,

    /// Longest cycle seen in milliseconds
    pub max_cycle_ms: u64,

    /// 95th percentile over the recent history in milliseconds
    pub p95_cycle_ms: u64,

    /// When a cycle last succeeded
    pub last_success_at: Option<DateTime<Utc>>,

    /// Seconds since the collector was created
    pub uptime_seconds: u64,
}

/// Lock-free counters plus a small ring buffer of recent cycle durations
pub struct CycleMetrics {
    last_tick: AtomicU64,
    total_cycles: AtomicU64,
    succeeded_cycles: AtomicU64,
    failed_cycles: AtomicU64,
    consecutive_failures: AtomicU64,
    max_cycle_ms: AtomicU64,
    durations_ms: Vec<AtomicU64>,
    last_success_at: Mutex<Option<DateTime<Utc>>>,
    start_time: Instant,
}

impl CycleMetrics {
    pub fn new(history_size: usize) -> Self {
        let history_size = history_size.max(1);
        Self {
            last_tick: AtomicU64::new(0),
            total_cycles: AtomicU64::new(0),
            succeeded_cycles: AtomicU64::new(0),
            failed_cycles: AtomicU64::new(0),
            consecutive_failures: AtomicU64::new(0),
            max_cycle_ms: AtomicU64::new(0),
            durations_ms: (0..history_size).map(|_| AtomicU64::new(0)).collect(),
            last_success_at: Mutex::new(None),
            start_time: Instant::now(),
        }
    }

    pub fn record_success(&self, tick: TickId, duration: Duration) {
        self.record_cycle(tick, duration);
        self.succeeded_cycles.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.store(0, Ordering::Relaxed);
        *self.last_success_at.lock() = Some(Utc::now());
    }

    pub fn record_failure(&self, tick: TickId, duration: Duration) {
        self.record_cycle(tick, duration);
        self.failed_cycles.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn record_cycle(&self, tick: TickId, duration: Duration) {
        // zero marks an empty slot, so sub-millisecond cycles are stored as 1
        let duration_ms = (duration.as_millis() as u64).max(1);
        let cycle = self.total_cycles.fetch_add(1, Ordering::Relaxed);
        let index = (cycle as usize) % self.durations_ms.len();

        self.last_tick.store(tick, Ordering::Relaxed);
        self.durations_ms[index].store(duration_ms, Ordering::Relaxed);
        self.max_cycle_ms.fetch_max(duration_ms, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CycleMetricsSnapshot {
        let total_cycles = self.total_cycles.load(Ordering::Relaxed);

        let last_cycle_ms = if total_cycles == 0 {
            0
        } else {
            let index = ((total_cycles - 1) as usize) % self.durations_ms.len();
            self.durations_ms[index].load(Ordering::Relaxed)
        };

        let mut durations: Vec<u64> = self
            .durations_ms
            .iter()
            .map(|d| d.load(Ordering::Relaxed))
            .filter(|&d| d > 0)
            .collect();
        durations.sort_unstable();

        let avg_cycle_ms = if durations.is_empty() {
            0
        } else {
            durations.iter().sum::<u64>() / durations.len() as u64
        };

        let p95_cycle_ms = if durations.is_empty() {
            0
        } else {
            let index = (durations.len() as f64 * 0.95) as usize;
            durations[index.min(durations.len() - 1)]
        };

        CycleMetricsSnapshot {
            last_tick: self.last_tick.load(Ordering::Relaxed),
            total_cycles,
            succeeded_cycles: self.succeeded_cycles.load(Ordering::Relaxed),
            failed_cycles: self.failed_cycles.load(Ordering::Relaxed),
            consecutive_failures: self.consecutive_failures.load(Ordering::Relaxed),
            last_cycle_ms,
            avg_cycle_ms,
            max_cycle_ms: self.max_cycle_ms.load(Ordering::Relaxed),
            p95_cycle_ms,
            last_success_at: *self.last_success_at.lock(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

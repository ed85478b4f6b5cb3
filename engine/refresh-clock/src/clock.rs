//! Core RefreshClock implementation

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::config::ClockConfig;
use crate::error::ClockError;
use crate::metrics::{CycleMetrics, CycleMetricsSnapshot};
use crate::ticker::{TickId, Ticker};

/// Work performed once per tick
#[async_trait]
pub trait CycleTask: Send {
    type Error: Display + Send;

    async fn run_cycle(&mut self, tick: TickId) -> Result<(), Self::Error>;
}

/// The RefreshClock - runs one cycle per tick and never lets cycles overlap
pub struct RefreshClock {
    current_tick: AtomicU64,
    is_running: AtomicBool,
    shutdown: watch::Sender<bool>,
    metrics: CycleMetrics,
    config: ClockConfig,
}

impl RefreshClock {
    /// Create a new RefreshClock
    pub fn new(config: ClockConfig) -> Result<Self, ClockError> {
        config.validate()?;

        tracing::info!("Creating RefreshClock with cadence {}ms", config.cadence_ms);

        let (shutdown, _) = watch::channel(false);
        Ok(Self {
            current_tick: AtomicU64::new(0),
            is_running: AtomicBool::new(false),
            shutdown,
            metrics: CycleMetrics::new(config.metrics_history),
            config,
        })
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Drive `task` from `ticker` until the ticker closes or [`stop`](Self::stop) is called.
    ///
    /// A failing cycle is logged and counted; the loop carries on with the next tick.
    pub async fn run_loop<T, C>(&self, mut ticker: T, task: &mut C) -> Result<(), ClockError>
    where
        T: Ticker,
        C: CycleTask,
    {
        if self.is_running.swap(true, Ordering::SeqCst) {
            return Err(ClockError::AlreadyRunning);
        }

        let mut shutdown = self.shutdown.subscribe();
        tracing::info!("Starting RefreshClock loop");

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            let tick = tokio::select! {
                biased;
                _ = shutdown.changed() => continue,
                tick = ticker.tick() => match tick {
                    Some(tick) => tick,
                    None => {
                        tracing::info!("Ticker closed");
                        break;
                    }
                },
            };

            self.current_tick.store(tick, Ordering::Relaxed);
            let cycle_start = Instant::now();

            match task.run_cycle(tick).await {
                Ok(()) => {
                    self.metrics.record_success(tick, cycle_start.elapsed());
                    tracing::debug!("Cycle {} completed in {:?}", tick, cycle_start.elapsed());
                }
                Err(e) => {
                    self.metrics.record_failure(tick, cycle_start.elapsed());
                    tracing::warn!("Cycle {} failed: {}", tick, e);
                }
            }
        }

        self.is_running.store(false, Ordering::SeqCst);
        tracing::info!("RefreshClock loop stopped");
        Ok(())
    }

    /// Stop the loop at the next tick boundary. A cycle in flight finishes first.
    ///
    /// Stopping is final: a loop started after `stop` returns without running a cycle.
    pub fn stop(&self) {
        self.shutdown.send_replace(true);
    }

    /// Get current tick
    pub fn get_current_tick(&self) -> TickId {
        self.current_tick.load(Ordering::Relaxed)
    }

    /// Check if clock is running
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Get current metrics
    pub fn get_metrics(&self) -> CycleMetricsSnapshot {
        self.metrics.snapshot()
    }
}

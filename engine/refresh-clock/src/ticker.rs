//! Tick sources for the refresh loop

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::config::ClockConfig;

/// Sequence number of a tick, starting at 0
pub type TickId = u64;

/// Source of refresh ticks. Returning `None` ends the refresh loop.
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self) -> Option<TickId>;
}

/// Wall-clock ticker backed by a tokio interval
pub struct IntervalTicker {
    interval: Interval,
    next: TickId,
}

impl IntervalTicker {
    pub fn new(config: &ClockConfig) -> Self {
        let period = config.cadence();
        let start = if config.immediate_first_tick { Instant::now() } else { Instant::now() + period };

        let mut interval = interval_at(start, period);
        // a slow cycle swallows the ticks it overran instead of triggering a burst
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self { interval, next: 0 }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> Option<TickId> {
        self.interval.tick().await;
        let tick = self.next;
        self.next += 1;
        Some(tick)
    }
}

/// Ticker fired by hand through a [`TickHandle`]
pub struct ManualTicker {
    rx: mpsc::UnboundedReceiver<()>,
    next: TickId,
}

/// Fires ticks on the paired [`ManualTicker`]. Dropping every handle closes the ticker.
#[derive(Clone)]
pub struct TickHandle {
    tx: mpsc::UnboundedSender<()>,
}

/// Create a connected handle/ticker pair
pub fn manual_ticker() -> (TickHandle, ManualTicker) {
    let (tx, rx) = mpsc::unbounded_channel();
    (TickHandle { tx }, ManualTicker { rx, next: 0 })
}

impl TickHandle {
    /// Queue one tick. Returns false once the ticker is gone.
    pub fn fire(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

#[async_trait]
impl Ticker for ManualTicker {
    async fn tick(&mut self) -> Option<TickId> {
        self.rx.recv().await?;
        let tick = self.next;
        self.next += 1;
        Some(tick)
    }
}

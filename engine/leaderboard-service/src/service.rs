//! Service state management and component initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::ServiceConfig;
use crate::refresher::LeaderboardRefresher;
use leaderboard_presenter::{FileSink, LeaderboardPresenter};
use refresh_clock::{IntervalTicker, RefreshClock, Ticker};
use sheet_fetcher::SheetFetcher;

/// Refresher wired to the real HTTP fetcher and the page file
pub type ServiceRefresher = LeaderboardRefresher<SheetFetcher, LeaderboardPresenter<FileSink>>;

/// Service state containing all initialized components
pub struct ServiceState {
    /// Service configuration
    pub config: ServiceConfig,

    /// RefreshClock instance
    pub refresh_clock: Arc<RefreshClock>,

    /// The only path to the presenter; the loop holds the lock for as long as it runs
    refresher: Mutex<ServiceRefresher>,
}

impl ServiceState {
    /// Create a new service state with all components initialized
    pub async fn new(config: ServiceConfig) -> Result<Self> {
        info!("Initializing service components...");

        let fetcher = SheetFetcher::new(&config.fetcher).context("Failed to create sheet fetcher")?;

        let sink = FileSink::new(&config.presenter.output_path);
        let mut presenter = LeaderboardPresenter::new(
            config.presenter.clone(),
            config.fetcher.group_a.label.clone(),
            config.fetcher.group_b.label.clone(),
            sink,
        );
        presenter.publish_initial().with_context(|| {
            format!("Failed to write initial page to {:?}", config.presenter.output_path)
        })?;
        info!("Publishing leaderboard to {:?}", config.presenter.output_path);

        let refresher = LeaderboardRefresher::new(
            fetcher,
            presenter,
            config.fetcher.clone(),
            config.presenter.texts.load_error.clone(),
        );

        let refresh_clock = Arc::new(
            RefreshClock::new(config.clock.clone()).context("Failed to create RefreshClock")?,
        );

        Ok(Self { config, refresh_clock, refresher: Mutex::new(refresher) })
    }

    /// Run the refresh loop on the wall clock until stopped
    pub async fn start_refresh_loop(&self) -> Result<()> {
        let ticker = IntervalTicker::new(&self.config.clock);
        self.run_refresh_loop(ticker).await
    }

    /// Run the refresh loop on any ticker until it closes or the clock is stopped
    pub async fn run_refresh_loop<T: Ticker>(&self, ticker: T) -> Result<()> {
        let mut refresher = self.refresher.lock().await;
        info!(
            "Refreshing {} and {} every {}ms",
            self.config.fetcher.group_a.label,
            self.config.fetcher.group_b.label,
            self.config.clock.cadence_ms
        );

        self.refresh_clock
            .run_loop(ticker, &mut *refresher)
            .await
            .context("Refresh loop failed")?;

        info!("Final cycle metrics: {:?}", self.refresh_clock.get_metrics());
        Ok(())
    }

    /// Run a single cycle outside the loop. Fails straight away while the loop is running.
    pub async fn refresh_once(&self) -> Result<sheet_fetcher::RankingPair> {
        let mut refresher = self
            .refresher
            .try_lock()
            .map_err(|_| anyhow::anyhow!("Refresh loop is running, cannot refresh out of band"))?;
        Ok(refresher.refresh().await?)
    }

    /// Ask the refresh loop to stop after the cycle in flight
    pub fn stop_refresh_loop(&self) {
        info!("Stopping RefreshClock...");
        self.refresh_clock.stop();
    }
}

//! One fetch → parse → render pass per tick

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use leaderboard_presenter::{Presenter, PresenterError};
use refresh_clock::{CycleTask, TickId};
use sheet_fetcher::{fetch_ranking_pair, FetchError, FetcherConfig, RankingPair, SheetSource};

/// Why a refresh cycle left the previous render in place
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("Network failure: {0}")]
    Network(#[from] FetchError),

    #[error("Render failure: {0}")]
    Render(#[from] PresenterError),
}

/// Refresh cycle wiring: a sheet source feeding a presenter
pub struct LeaderboardRefresher<S, P> {
    source: S,
    presenter: P,
    fetcher_config: FetcherConfig,
    error_text: String,
}

impl<S, P> LeaderboardRefresher<S, P>
where
    S: SheetSource,
    P: Presenter,
{
    pub fn new(
        source: S,
        presenter: P,
        fetcher_config: FetcherConfig,
        error_text: impl Into<String>,
    ) -> Self {
        Self { source, presenter, fetcher_config, error_text: error_text.into() }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Fetch both sheets and render them. Nothing is rendered unless both fetches succeed.
    pub async fn refresh(&mut self) -> Result<RankingPair, RefreshError> {
        let pair = fetch_ranking_pair(&self.source, &self.fetcher_config).await?;
        self.presenter.render(&pair.group_a, &pair.group_b)?;
        Ok(pair)
    }
}

#[async_trait]
impl<S, P> CycleTask for LeaderboardRefresher<S, P>
where
    S: SheetSource,
    P: Presenter,
{
    type Error = RefreshError;

    async fn run_cycle(&mut self, tick: TickId) -> Result<(), RefreshError> {
        match self.refresh().await {
            Ok(pair) => {
                info!(
                    tick,
                    group_a = pair.group_a.len(),
                    group_b = pair.group_b.len(),
                    "Leaderboard refreshed"
                );
                Ok(())
            }
            Err(e) => {
                error!(tick, "Error fetching or processing data: {}", e);
                if let Err(status_err) = self.presenter.show_error(&self.error_text) {
                    error!("Failed to show error status: {}", status_err);
                }
                Err(e)
            }
        }
    }
}

use sheet_fetcher::{fetch_ranking_pair, FetcherConfig, Ranking, SheetFetcher};
use tracing::{error, info};

fn log_ranking(label: &str, ranking: &Ranking) {
    info!("{} - {} entries", label, ranking.len());
    for (rank, entry) in ranking.ranked() {
        info!("  #{} {} - {} pts", rank, entry.name, entry.score);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = FetcherConfig::default();
    config.validate()?;
    info!("Fetching {} and {} once", config.group_a.label, config.group_b.label);

    let fetcher = SheetFetcher::new(&config)?;
    match fetch_ranking_pair(&fetcher, &config).await {
        Ok(pair) => {
            log_ranking(&config.group_a.label, &pair.group_a);
            log_ranking(&config.group_b.label, &pair.group_b);
        }
        Err(e) => {
            error!("Fetch failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::{FetcherConfig, SheetEndpoint};
use crate::error::{FetchError, Result};
use crate::models::RankingPair;
use crate::parser::process_sheet_data;

/// Anything that can hand back the raw CSV body of a sheet
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_text(&self, endpoint: &SheetEndpoint) -> Result<String>;
}

/// HTTP client for the published sheets
pub struct SheetFetcher {
    client: Client,
}

impl SheetFetcher {
    /// Create a new fetcher instance
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SheetSource for SheetFetcher {
    async fn fetch_text(&self, endpoint: &SheetEndpoint) -> Result<String> {
        debug!("Fetching {} from: {}", endpoint.label, endpoint.url);

        let response = self.client.get(&endpoint.url).send().await.map_err(|source| {
            FetchError::Request { endpoint: endpoint.label.clone(), source }
        })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.label.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Body { endpoint: endpoint.label.clone(), source })?;

        debug!("Fetched {} bytes for {}", body.len(), endpoint.label);
        Ok(body)
    }
}

#[async_trait]
impl<S: SheetSource + ?Sized> SheetSource for std::sync::Arc<S> {
    async fn fetch_text(&self, endpoint: &SheetEndpoint) -> Result<String> {
        (**self).fetch_text(endpoint).await
    }
}

/// Fetch both sheets concurrently and rank each of them.
///
/// Both requests always run to completion; if either fails the pair is discarded and the first
/// failure (group A before group B) is returned.
pub async fn fetch_ranking_pair<S>(source: &S, config: &FetcherConfig) -> Result<RankingPair>
where
    S: SheetSource + ?Sized,
{
    let (text_a, text_b) = futures::future::join(
        source.fetch_text(&config.group_a),
        source.fetch_text(&config.group_b),
    )
    .await;

    let (text_a, text_b) = (text_a?, text_b?);

    let pair = RankingPair {
        group_a: process_sheet_data(&text_a, &config.layout),
        group_b: process_sheet_data(&text_b, &config.layout),
    };

    info!(
        "Ranked {} entries for {} and {} entries for {}",
        pair.group_a.len(),
        config.group_a.label,
        pair.group_b.len(),
        config.group_b.label
    );
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> FetcherConfig {
        FetcherConfig {
            group_a: SheetEndpoint::new("MSCI", format!("{}/msci.csv", server.uri())),
            group_b: SheetEndpoint::new("SSCI", format!("{}/ssci.csv", server.uri())),
            request_timeout_secs: 5,
            ..Default::default()
        }
    }

    async fn mount(server: &MockServer, route: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn fetches_and_ranks_both_sheets() {
        let server = MockServer::start().await;
        mount(&server, "/msci.csv", 200, "\"Alice\",,,,,,,,\"10\"\n\"Bob\",,,,,,,,\"5\"\n").await;
        mount(&server, "/ssci.csv", 200, "Cara,,,,,,,,3\nDana,,,,,,,,8\n").await;

        let config = config_for(&server);
        let fetcher = SheetFetcher::new(&config).expect("client");
        let pair = fetch_ranking_pair(&fetcher, &config).await.expect("pair");

        assert_eq!(pair.group_a.entries(), &[Entry::new("Alice", 10.0), Entry::new("Bob", 5.0)]);
        assert_eq!(pair.group_b.entries(), &[Entry::new("Dana", 8.0), Entry::new("Cara", 3.0)]);
    }

    #[tokio::test]
    async fn one_failing_sheet_fails_the_pair() {
        let server = MockServer::start().await;
        mount(&server, "/msci.csv", 200, "Alice,,,,,,,,10\n").await;
        mount(&server, "/ssci.csv", 503, "unavailable").await;

        let config = config_for(&server);
        let fetcher = SheetFetcher::new(&config).expect("client");
        let err = fetch_ranking_pair(&fetcher, &config).await.unwrap_err();

        match err {
            FetchError::Status { endpoint, status } => {
                assert_eq!(endpoint, "SSCI");
                assert_eq!(status, 503);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn both_requests_are_issued_even_when_one_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/msci.csv"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ssci.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Eve,,,,,,,,1"))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let fetcher = SheetFetcher::new(&config).expect("client");
        let err = fetch_ranking_pair(&fetcher, &config).await.unwrap_err();
        assert_eq!(err.endpoint(), Some("MSCI"));
        // expectations are verified when the server drops
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_error() {
        let config = FetcherConfig {
            group_a: SheetEndpoint::new("MSCI", "http://127.0.0.1:1/a.csv"),
            group_b: SheetEndpoint::new("SSCI", "http://127.0.0.1:1/b.csv"),
            request_timeout_secs: 2,
            ..Default::default()
        };
        let fetcher = SheetFetcher::new(&config).expect("client");
        let err = fetch_ranking_pair(&fetcher, &config).await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }

    #[tokio::test]
    async fn empty_body_gives_empty_ranking() {
        let server = MockServer::start().await;
        mount(&server, "/msci.csv", 200, "").await;
        mount(&server, "/ssci.csv", 200, "Finn,,,,,,,,2").await;

        let config = config_for(&server);
        let fetcher = SheetFetcher::new(&config).expect("client");
        let pair = fetch_ranking_pair(&fetcher, &config).await.expect("pair");
        assert!(pair.group_a.is_empty());
        assert_eq!(pair.group_b.len(), 1);
    }
}

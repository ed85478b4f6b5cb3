use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Column holding the player name
pub const DEFAULT_NAME_COLUMN: usize = 0;

/// Column holding the score in the `A2:I50` layout of the published sheets.
/// Older revisions of the sheet kept the score in column 12.
pub const DEFAULT_SCORE_COLUMN: usize = 8;

const SHEET_BASE_URL: &str =
    "https://docs.google.com/spreadsheets/d/1B34MYj61oXb4hZ0WmkMG8LoUxOz2igB20eVMEGmLk8I/gviz/tq";

/// Configuration for the sheet fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Sheet feeding the first leaderboard
    pub group_a: SheetEndpoint,

    /// Sheet feeding the second leaderboard
    pub group_b: SheetEndpoint,

    /// Where the name and score live in each row
    pub layout: ColumnLayout,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

/// One published sheet range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetEndpoint {
    /// Group label shown in the leaderboard and chart legend
    pub label: String,

    /// CSV export URL
    pub url: String,
}

/// Column indices the parser reads from each row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub name_column: usize,
    pub score_column: usize,
}

impl SheetEndpoint {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self { label: label.into(), url: url.into() }
    }

    /// CSV export of rows 2..50 of the named sheet
    pub fn published_sheet(sheet: &str) -> Self {
        Self::new(sheet, format!("{SHEET_BASE_URL}?tqx=out:csv&sheet={sheet}&range=A2:I50"))
    }
}

impl ColumnLayout {
    pub fn new(name_column: usize, score_column: usize) -> Self {
        Self { name_column, score_column }
    }

    /// Minimum number of fields a row needs before both columns can be read
    pub fn required_fields(&self) -> usize {
        self.name_column.max(self.score_column) + 1
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self { name_column: DEFAULT_NAME_COLUMN, score_column: DEFAULT_SCORE_COLUMN }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            group_a: SheetEndpoint::published_sheet("MSCI"),
            group_b: SheetEndpoint::published_sheet("SSCI"),
            layout: ColumnLayout::default(),
            request_timeout_secs: 30,
            user_agent: format!("sheet-leaderboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FetcherConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check that both endpoints are usable
    pub fn validate(&self) -> crate::Result<()> {
        for endpoint in [&self.group_a, &self.group_b] {
            if endpoint.url.trim().is_empty() {
                return Err(crate::FetchError::Config(format!(
                    "endpoint {} has no URL",
                    endpoint.label
                )));
            }
            if endpoint.label.trim().is_empty() {
                return Err(crate::FetchError::Config(format!(
                    "endpoint {} has no label",
                    endpoint.url
                )));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(crate::FetchError::Config("request timeout must be positive".to_string()));
        }

        Ok(())
    }
}

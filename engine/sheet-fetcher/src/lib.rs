//! Sheet Fetcher
//!
//! Downloads the two published spreadsheet ranges that feed the leaderboard and turns each CSV
//! body into a ranked top-4 list of (name, score) entries.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod parser;

pub use config::{
    ColumnLayout, FetcherConfig, SheetEndpoint, DEFAULT_NAME_COLUMN, DEFAULT_SCORE_COLUMN,
};
pub use error::{FetchError, Result};
pub use fetcher::{fetch_ranking_pair, SheetFetcher, SheetSource};
pub use models::*;
pub use parser::process_sheet_data;

//! Leaderboard Presenter
//!
//! Owns everything the dashboard shows: the two ranked tables, the bar chart series with its
//! adaptive value axis, and the status line. Rendering is published as a self-contained HTML page
//! through a [`PageSink`].

pub mod chart;
pub mod config;
pub mod error;
pub mod page;
pub mod presenter;
pub mod table;

pub use chart::{chart_ceiling, ChartData, ChartDataset, CEILING_FALLBACK, CEILING_HEADROOM};
pub use config::{DisplayTexts, PresenterConfig};
pub use error::{PresenterError, Result};
pub use page::{FileSink, MemorySink, PageSink, RenderedPage, StatusLine};
pub use presenter::{LeaderboardPresenter, Presenter};

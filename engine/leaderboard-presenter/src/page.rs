//! Page assembly and output sinks

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::ChartData;
use crate::error::{PresenterError, Result};
use crate::table::escape_html;

/// Status line shown above the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: false }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: true }
    }
}

/// Complete view state after the latest change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPage {
    pub title: String,
    pub status: StatusLine,

    /// Markup of the leaderboard container
    pub board_html: String,

    /// Chart series, `None` until the first successful render
    pub chart: Option<ChartData>,
}

impl RenderedPage {
    /// Standalone HTML document. Chart data is embedded as JSON for the charting script.
    pub fn to_html(&self) -> Result<String> {
        let chart_json = match &self.chart {
            Some(chart) => serde_json::to_string(chart)?,
            None => "null".to_string(),
        };
        // keep the JSON from closing the script element early
        let chart_json = chart_json.replace("</", "<\\/");

        let status_class = if self.status.is_error { "status error" } else { "status" };

        let mut html = String::new();
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n\
             <p id=\"lastUpdated\" class=\"{status_class}\">{status}</p>\n\
             <div id=\"leaderboard-container\">{board}</div>\n\
             <canvas id=\"myChart\"></canvas>\n\
             <script type=\"application/json\" id=\"chart-data\">{chart_json}</script>\n\
             </body>\n</html>\n",
            title = escape_html(&self.title),
            status = escape_html(&self.status.text),
            board = self.board_html,
        );
        Ok(html)
    }
}

/// Destination for rendered pages
pub trait PageSink: Send {
    fn publish(&mut self, page: &RenderedPage) -> Result<()>;
}

/// Writes the page to a file, replacing it atomically
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> PresenterError {
        PresenterError::Write { path: self.path.clone(), source }
    }
}

impl PageSink for FileSink {
    fn publish(&mut self, page: &RenderedPage) -> Result<()> {
        let html = page.to_html()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, html).map_err(|e| self.write_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.write_error(e))?;

        debug!("Published page to {:?}", self.path);
        Ok(())
    }
}

/// Keeps every published page in memory. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pages: Arc<Mutex<Vec<RenderedPage>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<RenderedPage> {
        self.pages.lock().last().cloned()
    }

    pub fn published_count(&self) -> usize {
        self.pages.lock().len()
    }
}

impl PageSink for MemorySink {
    fn publish(&mut self, page: &RenderedPage) -> Result<()> {
        self.pages.lock().push(page.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartData, ChartDataset};

    fn page(chart: Option<ChartData>) -> RenderedPage {
        RenderedPage {
            title: "Board".to_string(),
            status: StatusLine::error("load failed"),
            board_html: "<div class=\"leaderboard\"></div>".to_string(),
            chart,
        }
    }

    #[test]
    fn html_embeds_board_status_and_chart() {
        let chart = ChartData {
            labels: vec!["R 1".to_string()],
            datasets: vec![ChartDataset {
                label: "A".to_string(),
                data: vec![1.0],
                background_color: "red".to_string(),
                names: vec!["</script>".to_string()],
                tooltips: vec![],
                data_labels: vec![],
            }],
            y_max: 21.0,
        };
        let html = page(Some(chart)).to_html().unwrap();

        assert!(html.contains("<p id=\"lastUpdated\" class=\"status error\">load failed</p>"));
        assert!(html.contains("<div id=\"leaderboard-container\"><div class=\"leaderboard\"></div></div>"));
        assert!(html.contains("\"yMax\":21.0"));
        assert!(html.contains("<\\/script>"));
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn html_without_chart_embeds_null() {
        let html = page(None).to_html().unwrap();
        assert!(html.contains("id=\"chart-data\">null</script>"));
    }

    #[test]
    fn file_sink_writes_and_replaces_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("index.html");
        let mut sink = FileSink::new(&path);

        sink.publish(&page(None)).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.contains("load failed"));

        let mut updated = page(None);
        updated.status = StatusLine::info("fresh");
        sink.publish(&updated).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert!(second.contains("class=\"status\">fresh"));
        assert!(!path.with_file_name("index.html.tmp").exists());
    }

    #[test]
    fn memory_sink_clones_share_history() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer.publish(&page(None)).unwrap();
        writer.publish(&page(None)).unwrap();
        assert_eq!(sink.published_count(), 2);
        assert_eq!(sink.last().unwrap().status.text, "load failed");
    }
}

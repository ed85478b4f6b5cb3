use chrono::Local;
use sheet_fetcher::Ranking;
use tracing::debug;

use crate::chart::ChartData;
use crate::config::PresenterConfig;
use crate::error::Result;
use crate::page::{PageSink, RenderedPage, StatusLine};
use crate::table::leaderboard_table;

/// Receiver of refresh results
pub trait Presenter: Send {
    /// Replace the leaderboard and chart with a fresh pair of rankings
    fn render(&mut self, group_a: &Ranking, group_b: &Ranking) -> Result<()>;

    /// Flag a failed refresh. Whatever was rendered before stays on screen.
    fn show_error(&mut self, message: &str) -> Result<()>;
}

/// Presenter that owns the page state and republishes it through a sink on every change
pub struct LeaderboardPresenter<K: PageSink> {
    config: PresenterConfig,
    group_a_title: String,
    group_b_title: String,
    page: RenderedPage,
    sink: K,
}

impl<K: PageSink> LeaderboardPresenter<K> {
    pub fn new(
        config: PresenterConfig,
        group_a_title: impl Into<String>,
        group_b_title: impl Into<String>,
        sink: K,
    ) -> Self {
        let page = RenderedPage {
            title: config.texts.title.clone(),
            status: StatusLine::info(config.texts.loading.clone()),
            board_html: String::new(),
            chart: None,
        };

        Self {
            config,
            group_a_title: group_a_title.into(),
            group_b_title: group_b_title.into(),
            page,
            sink,
        }
    }

    /// Current view state
    pub fn page(&self) -> &RenderedPage {
        &self.page
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Publish the initial "loading" page
    pub fn publish_initial(&mut self) -> Result<()> {
        self.sink.publish(&self.page)
    }
}

impl<K: PageSink> Presenter for LeaderboardPresenter<K> {
    fn render(&mut self, group_a: &Ranking, group_b: &Ranking) -> Result<()> {
        let texts = &self.config.texts;

        let board_html = leaderboard_table(&self.group_a_title, group_a, texts)
            + &leaderboard_table(&self.group_b_title, group_b, texts);

        let chart = ChartData::build(
            &texts.rank_label,
            (self.group_a_title.as_str(), self.config.group_a_color.as_str(), group_a),
            (self.group_b_title.as_str(), self.config.group_b_color.as_str(), group_b),
        );

        let status = StatusLine::info(format!(
            "{}{}",
            texts.last_updated_prefix,
            Local::now().format("%H:%M:%S")
        ));

        let next = RenderedPage {
            title: self.page.title.clone(),
            status,
            board_html,
            chart: Some(chart),
        };

        // only commit the new state once it has been published
        self.sink.publish(&next)?;
        debug!("Rendered leaderboard with y max {:?}", next.chart.as_ref().map(|c| c.y_max));
        self.page = next;
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<()> {
        self.page.status = StatusLine::error(message);
        self.sink.publish(&self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemorySink;
    use sheet_fetcher::Entry;

    fn presenter() -> (LeaderboardPresenter<MemorySink>, MemorySink) {
        let sink = MemorySink::new();
        let presenter =
            LeaderboardPresenter::new(PresenterConfig::default(), "MSCI", "SSCI", sink.clone());
        (presenter, sink)
    }

    fn ranking(entries: &[(&str, f64)]) -> Ranking {
        Ranking::from_sorted(entries.iter().map(|(n, s)| Entry::new(*n, *s)).collect())
    }

    #[test]
    fn starts_in_loading_state() {
        let (mut presenter, sink) = presenter();
        assert!(presenter.page().chart.is_none());
        assert!(!presenter.page().status.is_error);

        presenter.publish_initial().unwrap();
        assert_eq!(sink.published_count(), 1);
    }

    #[test]
    fn render_replaces_board_and_chart() {
        let (mut presenter, sink) = presenter();
        presenter
            .render(&ranking(&[("Alice", 30.0)]), &ranking(&[("Bea", 50.0), ("Cat", 10.0)]))
            .unwrap();

        let page = sink.last().unwrap();
        assert!(page.board_html.contains("<h3>MSCI</h3>"));
        assert!(page.board_html.contains("<h3>SSCI</h3>"));
        assert!(page.board_html.contains("<td>Bea</td>"));
        let chart = page.chart.expect("chart");
        assert_eq!(chart.y_max, 70.0);
        assert_eq!(chart.labels[0], "อันดับ 1");
        assert!(page.status.text.starts_with("อัปเดตล่าสุด: "));
        assert!(!page.status.is_error);

        presenter.render(&ranking(&[("Dan", 1.0)]), &Ranking::default()).unwrap();
        let page = presenter.page();
        assert!(!page.board_html.contains("Alice"));
        assert_eq!(page.chart.as_ref().unwrap().y_max, 21.0);
    }

    #[test]
    fn show_error_keeps_previous_render() {
        let (mut presenter, sink) = presenter();
        presenter.render(&ranking(&[("Alice", 10.0)]), &ranking(&[("Bea", 5.0)])).unwrap();
        let before = presenter.page().clone();

        presenter.show_error("load failed").unwrap();

        let after = sink.last().unwrap();
        assert_eq!(after.board_html, before.board_html);
        assert_eq!(after.chart, before.chart);
        assert_eq!(after.status, StatusLine::error("load failed"));
    }
}

//! Bar chart series and value axis

use serde::{Deserialize, Serialize};
use sheet_fetcher::{Ranking, MAX_RANKED};

/// Space added above the highest bar
pub const CEILING_HEADROOM: f64 = 20.0;

/// Axis maximum when there is no positive score to scale against
pub const CEILING_FALLBACK: f64 = 100.0;

/// Upper bound of the value axis for the given rankings
pub fn chart_ceiling(group_a: &Ranking, group_b: &Ranking) -> f64 {
    let max = [group_a.max_score(), group_b.max_score()]
        .into_iter()
        .flatten()
        .reduce(f64::max);

    match max {
        Some(max) if max > 0.0 => max + CEILING_HEADROOM,
        _ => CEILING_FALLBACK,
    }
}

/// Everything the charting front end needs to draw the bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// X axis labels, one per rank position
    pub labels: Vec<String>,

    pub datasets: Vec<ChartDataset>,

    /// Value axis upper bound
    pub y_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,

    /// Entry name per bar
    pub names: Vec<String>,

    /// Hover text per bar, `"<name>: <score>"`
    pub tooltips: Vec<String>,

    /// Text drawn under each bar, empty for bars without a positive score
    pub data_labels: Vec<String>,
}

impl ChartDataset {
    pub fn from_ranking(label: &str, color: &str, ranking: &Ranking) -> Self {
        let names: Vec<String> = ranking.iter().map(|entry| entry.name.clone()).collect();
        let tooltips = ranking
            .iter()
            .map(|entry| format!("{}: {}", entry.name, entry.score))
            .collect();
        let data_labels = ranking
            .iter()
            .map(|entry| if entry.score <= 0.0 { String::new() } else { entry.name.clone() })
            .collect();

        Self {
            label: label.to_string(),
            data: ranking.scores(),
            background_color: color.to_string(),
            names,
            tooltips,
            data_labels,
        }
    }
}

impl ChartData {
    pub fn build(
        rank_label: &str,
        group_a: (&str, &str, &Ranking),
        group_b: (&str, &str, &Ranking),
    ) -> Self {
        let labels = (1..=MAX_RANKED).map(|rank| format!("{rank_label} {rank}")).collect();
        let (label_a, color_a, ranking_a) = group_a;
        let (label_b, color_b, ranking_b) = group_b;

        Self {
            labels,
            datasets: vec![
                ChartDataset::from_ranking(label_a, color_a, ranking_a),
                ChartDataset::from_ranking(label_b, color_b, ranking_b),
            ],
            y_max: chart_ceiling(ranking_a, ranking_b),
        }
    }
}

//! Configuration for the leaderboard presenter

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Where the rendered page is written
    pub output_path: PathBuf,

    /// Bar colour for group A
    pub group_a_color: String,

    /// Bar colour for group B
    pub group_b_color: String,

    /// Texts shown on the page
    pub texts: DisplayTexts,
}

/// Every piece of fixed wording on the page. Defaults are the Thai texts the dashboard has always
/// used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayTexts {
    /// Word used for chart axis labels, followed by the rank number
    pub rank_label: String,

    pub rank_header: String,
    pub name_header: String,
    pub score_header: String,

    /// Prefix of the status line after a successful refresh
    pub last_updated_prefix: String,

    /// Status line after a failed refresh
    pub load_error: String,

    /// Status line before the first refresh completes
    pub loading: String,

    /// Page title
    pub title: String,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("./public/index.html"),
            group_a_color: "rgba(255, 99, 132, 0.8)".to_string(),
            group_b_color: "rgba(255, 182, 193, 0.8)".to_string(),
            texts: DisplayTexts::default(),
        }
    }
}

impl Default for DisplayTexts {
    fn default() -> Self {
        Self {
            rank_label: "อันดับ".to_string(),
            rank_header: "อันดับ".to_string(),
            name_header: "ชื่อ".to_string(),
            score_header: "คะแนน".to_string(),
            last_updated_prefix: "อัปเดตล่าสุด: ".to_string(),
            load_error: "เกิดข้อผิดพลาดในการโหลดข้อมูล".to_string(),
            loading: "กำลังโหลดข้อมูล...".to_string(),
            title: "Leaderboard".to_string(),
        }
    }
}

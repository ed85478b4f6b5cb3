//! Leaderboard table markup

use std::fmt::Write;

use sheet_fetcher::Ranking;

use crate::config::DisplayTexts;

/// Escape text for use inside HTML element content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// One leaderboard block: title plus a rank / name / score table
pub fn leaderboard_table(title: &str, ranking: &Ranking, texts: &DisplayTexts) -> String {
    let mut html = String::new();
    // writing into a String cannot fail
    let _ = write!(
        html,
        "<div class=\"leaderboard\"><h3>{}</h3><table><thead><tr><th>{}</th><th>{}</th><th>{}</th></tr></thead><tbody>",
        escape_html(title),
        escape_html(&texts.rank_header),
        escape_html(&texts.name_header),
        escape_html(&texts.score_header),
    );

    for (rank, entry) in ranking.ranked() {
        let _ = write!(
            html,
            "<tr><td>#{}</td><td>{}</td><td>{}</td></tr>",
            rank,
            escape_html(&entry.name),
            entry.score
        );
    }

    html.push_str("</tbody></table></div>");
    html
}

//! CSV-to-ranking transform

use std::cmp::Ordering;

use tracing::trace;

use crate::config::ColumnLayout;
use crate::models::{Entry, Ranking};

/// Turn the CSV body of one sheet into its top-4 ranking.
///
/// Quote characters are dropped, rows are split on newlines and fields on commas, and every field
/// is trimmed. Rows too short to reach both columns, or whose trimmed name is empty, are skipped. A score that does not read as a
/// number counts as 0 and the row is kept.
pub fn process_sheet_data(csv_text: &str, layout: &ColumnLayout) -> Ranking {
    let text = csv_text.trim();
    if text.is_empty() {
        return Ranking::default();
    }

    let cleaned = text.replace('"', "");
    let required = layout.required_fields();

    let mut entries: Vec<Entry> = Vec::new();
    for (row_index, row) in cleaned.split('\n').enumerate() {
        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        if fields.len() < required {
            trace!(row = row_index, fields = fields.len(), required, "skipping short row");
            continue;
        }

        let name = fields[layout.name_column];
        if name.is_empty() {
            trace!(row = row_index, "skipping row without a name");
            continue;
        }

        entries.push(Entry::new(name, parse_score(fields[layout.score_column])));
    }

    // sort_by is stable, so equal scores keep their sheet order
    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ranking::from_sorted(entries)
}

/// Read a score the way a spreadsheet export is usually read in a browser: take the longest
/// numeric prefix and fall back to 0 when there is none.
pub fn parse_score(field: &str) -> f64 {
    let field = field.trim();
    let end = numeric_prefix_len(field.as_bytes());
    match field[..end].parse::<f64>() {
        Ok(value) if value.is_finite() && value != 0.0 => value,
        _ => 0.0,
    }
}

fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            pos = frac_end;
        }
    }

    if digits == 0 {
        return 0;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_digits_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_digits_start {
            pos = exp;
        }
    }

    pos
}

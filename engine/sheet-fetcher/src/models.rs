use serde::{Deserialize, Serialize};

/// Number of entries kept per leaderboard
pub const MAX_RANKED: usize = 4;

/// One leaderboard row read from a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Display name (never empty)
    pub name: String,

    /// Score, 0 when the sheet cell could not be read as a number
    pub score: f64,
}

impl Entry {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self { name: name.into(), score }
    }
}

/// Top entries of one sheet, sorted by score descending.
///
/// A `Ranking` is rebuilt from scratch on every refresh; nothing about an entry carries over
/// from one cycle to the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking(Vec<Entry>);

impl Ranking {
    /// Build a ranking from entries already in rank order, dropping anything past the top 4
    pub fn from_sorted(mut entries: Vec<Entry>) -> Self {
        entries.truncate(MAX_RANKED);
        Self(entries)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }

    /// Entries paired with their 1-based rank
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.0.iter().enumerate().map(|(index, entry)| (index + 1, entry))
    }

    pub fn scores(&self) -> Vec<f64> {
        self.0.iter().map(|entry| entry.score).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Highest score in the ranking, `None` when it is empty
    pub fn max_score(&self) -> Option<f64> {
        self.0.iter().map(|entry| entry.score).reduce(f64::max)
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Rankings of both groups from one refresh cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingPair {
    pub group_a: Ranking,
    pub group_b: Ranking,
}

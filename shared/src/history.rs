//! Bounded score history
//!
//! One entry is appended per daily rollover. Only the most recent
//! [`MAX_HISTORY_ENTRIES`] days are kept.

use crate::scoring::ScoreSet;
use crate::TimestampMs;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of days kept in the history
pub const MAX_HISTORY_ENTRIES: usize = 30;

/// Final scores of one finished day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Start of the day the scores were earned in (ms since epoch)
    pub date: TimestampMs,
    pub total_score: u32,
    pub individual_scores: ScoreSet,
}

/// Chronological history, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")]
pub struct ScoreHistory {
    entries: VecDeque<HistoryEntry>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest beyond the cap
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        self.truncate();
    }

    /// Drop the oldest entries until at most [`MAX_HISTORY_ENTRIES`] remain
    pub fn truncate(&mut self) {
        while self.entries.len() > MAX_HISTORY_ENTRIES {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Aggregate view over the kept days
    pub fn summary(&self) -> HistorySummary {
        let days = self.entries.len();
        let sum: u32 = self.entries.iter().map(|e| e.total_score).sum();
        let average_score = if days == 0 {
            0.0
        } else {
            f64::from(sum) / days as f64
        };

        HistorySummary {
            days,
            average_score,
            best_score: self.entries.iter().map(|e| e.total_score).max(),
            latest_score: self.latest().map(|e| e.total_score),
        }
    }
}

impl From<Vec<HistoryEntry>> for ScoreHistory {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let mut history = Self {
            entries: entries.into(),
        };
        history.truncate();
        history
    }
}

impl From<ScoreHistory> for Vec<HistoryEntry> {
    fn from(history: ScoreHistory) -> Self {
        history.entries.into()
    }
}

/// Aggregate statistics over the score history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub days: usize,
    pub average_score: f64,
    pub best_score: Option<u32>,
    pub latest_score: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: i64, total_score: u32) -> HistoryEntry {
        HistoryEntry {
            date: day * 86_400_000,
            total_score,
            individual_scores: ScoreSet::default(),
        }
    }

    #[test]
    fn test_push_keeps_order() {
        let mut history = ScoreHistory::new();
        history.push(entry(1, 10));
        history.push(entry(2, 20));

        let dates: Vec<_> = history.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![86_400_000, 172_800_000]);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = ScoreHistory::new();
        for day in 1..=31 {
            history.push(entry(day, day as u32));
        }

        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(history.first().unwrap().date, entry(2, 0).date);
        assert_eq!(history.latest().unwrap().date, entry(31, 0).date);
    }

    #[test]
    fn test_from_oversized_vec_truncates() {
        let entries: Vec<_> = (0..45).map(|day| entry(day, 1)).collect();
        let history = ScoreHistory::from(entries);
        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(history.first().unwrap().date, entry(15, 0).date);
    }

    #[test]
    fn test_serializes_as_array() {
        let mut history = ScoreHistory::new();
        history.push(entry(1, 12));

        let value = serde_json::to_value(&history).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["totalScore"], 12);
        assert!(value[0]["individualScores"].is_object());
    }

    #[test]
    fn test_deserialize_truncates() {
        let entries: Vec<_> = (0..35).map(|day| entry(day, 2)).collect();
        let json = serde_json::to_string(&entries).unwrap();
        let history: ScoreHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
    }

    #[test]
    fn test_summary() {
        let empty = ScoreHistory::new().summary();
        assert_eq!(empty.days, 0);
        assert_eq!(empty.average_score, 0.0);
        assert_eq!(empty.best_score, None);

        let history = ScoreHistory::from(vec![entry(1, 10), entry(2, 30), entry(3, 20)]);
        let summary = history.summary();
        assert_eq!(summary.days, 3);
        assert!((summary.average_score - 20.0).abs() < 1e-9);
        assert_eq!(summary.best_score, Some(30));
        assert_eq!(summary.latest_score, Some(20));
    }
}

//! Per-user wellness state and its daily rollover
//!
//! [`UserWellnessState`] owns a user's daily goals and the scores derived
//! from them. Every mutation goes through a method that rescores before
//! returning, so `daily_scores` and `wellness_score` can never drift from
//! `daily_goals`.
//!
//! Once 24 hours have passed since `last_reset`, [`UserWellnessState::rollover_if_due`]
//! records the day's final scores in the history and starts a fresh day.

use crate::daily_goals::{MetricKey, MetricSet, MetricTargets};
use crate::fitness::FitnessReading;
use crate::history::{HistoryEntry, ScoreHistory};
use crate::meals::MealIntake;
use crate::scoring::{score_all, ScoreSet};
use crate::validation::{accumulate_quantity, sanitize_quantity};
use crate::TimestampMs;
use serde::{Deserialize, Serialize};

/// Length of one scoring day
pub const ROLLOVER_INTERVAL_MS: TimestampMs = 24 * 60 * 60 * 1000;

/// Persisted layout of a user's wellness document
///
/// Scores stored here are informational only; they are recomputed from
/// `daily_goals` when the document is loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WellnessDocument {
    pub daily_goals: MetricSet,
    pub daily_scores: ScoreSet,
    pub wellness_score: u32,
    pub score_history: ScoreHistory,
    pub last_reset: TimestampMs,
}

/// A user's daily goals, scores and score history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WellnessDocument", into = "WellnessDocument")]
pub struct UserWellnessState {
    daily_goals: MetricSet,
    daily_scores: ScoreSet,
    wellness_score: u32,
    score_history: ScoreHistory,
    last_reset: TimestampMs,
}

impl UserWellnessState {
    /// State for a user seen for the first time
    pub fn new(targets: &MetricTargets, now: TimestampMs) -> Self {
        Self::from_parts(MetricSet::with_targets(targets), ScoreHistory::new(), now)
    }

    /// Build a consistent state from goals and history
    pub fn from_parts(daily_goals: MetricSet, score_history: ScoreHistory, last_reset: TimestampMs) -> Self {
        let mut state = Self {
            daily_goals,
            daily_scores: ScoreSet::default(),
            wellness_score: 0,
            score_history,
            last_reset,
        };
        state.rescore();
        state
    }

    pub fn daily_goals(&self) -> &MetricSet {
        &self.daily_goals
    }

    pub fn daily_scores(&self) -> &ScoreSet {
        &self.daily_scores
    }

    /// Sum of the daily scores (0-33)
    pub fn wellness_score(&self) -> u32 {
        self.wellness_score
    }

    pub fn score_history(&self) -> &ScoreHistory {
        &self.score_history
    }

    pub fn last_reset(&self) -> TimestampMs {
        self.last_reset
    }

    /// Start of the next rollover window
    pub fn next_reset(&self) -> TimestampMs {
        self.last_reset.saturating_add(ROLLOVER_INTERVAL_MS)
    }

    /// Whether a full day has passed since the last reset
    ///
    /// A clock that moved backwards is never due.
    pub fn is_rollover_due(&self, now: TimestampMs) -> bool {
        now.saturating_sub(self.last_reset) >= ROLLOVER_INTERVAL_MS
    }

    /// Close the current day if it is over
    ///
    /// Scores the goals as they stood before the reset, appends them to the
    /// history under the old `last_reset`, zeroes every `current` and moves
    /// `last_reset` to `now`. Returns the appended entry, or `None` when the
    /// day is still running.
    pub fn rollover_if_due(&mut self, now: TimestampMs) -> Option<HistoryEntry> {
        if !self.is_rollover_due(now) {
            return None;
        }

        let final_scores = score_all(&self.daily_goals);
        let entry = HistoryEntry {
            date: self.last_reset,
            total_score: final_scores.total(),
            individual_scores: final_scores,
        };
        self.score_history.push(entry);

        self.daily_goals.reset_current();
        self.last_reset = now;
        self.rescore();

        Some(entry)
    }

    /// Overwrite metrics observed by a fitness provider
    ///
    /// Only the six tracker-backed metrics are touched, and only for the
    /// fields the reading carries. Targets are never changed.
    pub fn apply_external_metrics(&mut self, reading: &FitnessReading) {
        let updates = [
            (MetricKey::Steps, reading.steps),
            (MetricKey::Sleep, reading.sleep_hours),
            (MetricKey::HeartRate, reading.heart_rate_bpm),
            (MetricKey::Distance, reading.distance_km),
            (MetricKey::ActiveMinutes, reading.active_minutes),
            (MetricKey::Calories, reading.calories_burned),
        ];

        for (key, value) in updates {
            if let Some(value) = value {
                self.daily_goals.get_mut(key).current = sanitize_quantity(value);
            }
        }
        self.rescore();
    }

    /// Add a logged meal to the nutrition metrics
    pub fn apply_meal(&mut self, intake: &MealIntake) {
        let updates = [
            (MetricKey::Calories, intake.calories),
            (MetricKey::Carbs, intake.carbs),
            (MetricKey::Protein, intake.protein),
            (MetricKey::Fat, intake.fat),
            (MetricKey::Sugar, intake.sugar),
        ];

        for (key, amount) in updates {
            let metric = self.daily_goals.get_mut(key);
            metric.current = accumulate_quantity(metric.current, amount);
        }
        self.rescore();
    }

    /// Record glasses of water drunk
    pub fn log_water(&mut self, glasses: f64) {
        let metric = self.daily_goals.get_mut(MetricKey::Water);
        metric.current = accumulate_quantity(metric.current, glasses);
        self.rescore();
    }

    fn rescore(&mut self) {
        self.daily_scores = score_all(&self.daily_goals);
        self.wellness_score = self.daily_scores.total();
    }
}

impl From<WellnessDocument> for UserWellnessState {
    fn from(doc: WellnessDocument) -> Self {
        Self::from_parts(doc.daily_goals, doc.score_history, doc.last_reset)
    }
}

impl From<UserWellnessState> for WellnessDocument {
    fn from(state: UserWellnessState) -> Self {
        Self {
            daily_goals: state.daily_goals,
            daily_scores: state.daily_scores,
            wellness_score: state.wellness_score,
            score_history: state.score_history,
            last_reset: state.last_reset,
        }
    }
}

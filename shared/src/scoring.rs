//! Daily wellness scoring
//!
//! Each metric earns 0-3 points from its completion percentage:
//!
//! | completion | points |
//! |------------|--------|
//! | 0-25%      | 0      |
//! | 26-50%     | 1      |
//! | 51-75%     | 2      |
//! | 76-100%    | 3      |
//!
//! Completion is clamped at 100%, so overachieving never adds points. The
//! wellness score is the sum across all eleven metrics (0-33).
//!
//! All functions here are pure and total: malformed input scores zero.

use crate::daily_goals::{Metric, MetricKey, MetricSet};
use crate::validation::sanitize_quantity;
use serde::{Deserialize, Serialize};

/// Points awarded for one metric
pub type Score = u8;

/// Highest score a single metric can earn
pub const MAX_METRIC_SCORE: Score = 3;

/// Highest achievable wellness score
pub const MAX_WELLNESS_SCORE: u32 = MAX_METRIC_SCORE as u32 * MetricKey::ALL.len() as u32;

/// Inclusive lower bounds for each band, highest first
const SCORE_BANDS: &[(f64, Score)] = &[(76.0, 3), (51.0, 2), (26.0, 1)];

/// Completion percentage of a metric, clamped to `0..=100`
///
/// Returns `None` when the target is zero, negative or not a number.
pub fn completion_percentage(metric: &Metric) -> Option<f64> {
    if !metric.target.is_finite() || metric.target <= 0.0 {
        return None;
    }
    let current = sanitize_quantity(metric.current);
    let percentage = (current / metric.target * 100.0).min(100.0);
    Some(percentage)
}

/// Score a single metric
pub fn score(metric: &Metric) -> Score {
    let Some(percentage) = completion_percentage(metric) else {
        return 0;
    };
    score_percentage(percentage)
}

/// Map a completion percentage to its band
pub fn score_percentage(percentage: f64) -> Score {
    SCORE_BANDS
        .iter()
        .find(|(lower, _)| percentage >= *lower)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

/// Score every metric in a set
pub fn score_all(goals: &MetricSet) -> ScoreSet {
    ScoreSet {
        calories: score(&goals.calories),
        water: score(&goals.water),
        steps: score(&goals.steps),
        sleep: score(&goals.sleep),
        sugar: score(&goals.sugar),
        carbs: score(&goals.carbs),
        protein: score(&goals.protein),
        fat: score(&goals.fat),
        heart_rate: score(&goals.heart_rate),
        distance: score(&goals.distance),
        active_minutes: score(&goals.active_minutes),
    }
}

/// Per-metric points, derived from a [`MetricSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreSet {
    pub calories: Score,
    pub water: Score,
    pub steps: Score,
    pub sleep: Score,
    pub sugar: Score,
    pub carbs: Score,
    pub protein: Score,
    pub fat: Score,
    pub heart_rate: Score,
    pub distance: Score,
    pub active_minutes: Score,
}

impl ScoreSet {
    pub fn get(&self, key: MetricKey) -> Score {
        match key {
            MetricKey::Calories => self.calories,
            MetricKey::Water => self.water,
            MetricKey::Steps => self.steps,
            MetricKey::Sleep => self.sleep,
            MetricKey::Sugar => self.sugar,
            MetricKey::Carbs => self.carbs,
            MetricKey::Protein => self.protein,
            MetricKey::Fat => self.fat,
            MetricKey::HeartRate => self.heart_rate,
            MetricKey::Distance => self.distance,
            MetricKey::ActiveMinutes => self.active_minutes,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, Score)> + '_ {
        MetricKey::ALL.iter().map(move |&key| (key, self.get(key)))
    }

    /// Sum of all points (0-33)
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, points)| u32::from(points)).sum()
    }
}

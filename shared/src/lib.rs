//! Wellness Coach Shared Library
//!
//! Domain model and pure logic shared by the backend and the WASM module:
//! daily goals, scoring, score history, the daily rollover, fitness
//! readings and meal analysis.

pub mod daily_goals;
pub mod errors;
pub mod fitness;
pub mod history;
pub mod meals;
pub mod scoring;
pub mod types;
pub mod validation;
pub mod wellness;

/// Milliseconds since the Unix epoch
pub type TimestampMs = i64;

/// Current wall-clock time in milliseconds
pub fn now_millis() -> TimestampMs {
    chrono::Utc::now().timestamp_millis()
}

// Re-export commonly used items
pub use daily_goals::{Metric, MetricKey, MetricSet, MetricTargets};
pub use errors::*;
pub use fitness::FitnessReading;
pub use history::{HistoryEntry, HistorySummary, ScoreHistory};
pub use meals::{MealAnalysis, MealIntake, MealItem};
pub use scoring::{score, score_all, Score, ScoreSet};
pub use wellness::{UserWellnessState, WellnessDocument, ROLLOVER_INTERVAL_MS};

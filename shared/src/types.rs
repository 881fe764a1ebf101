//! API request and response types

use crate::daily_goals::MetricSet;
use crate::history::{HistoryEntry, HistorySummary};
use crate::meals::{MealAnalysis, MealIntake, MealItem};
use crate::scoring::{ScoreSet, MAX_WELLNESS_SCORE};
use crate::wellness::UserWellnessState;
use crate::TimestampMs;
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub retryable: bool,
}

// ============================================================================
// Wellness Types
// ============================================================================

/// Current day's goals and scores
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessResponse {
    pub daily_goals: MetricSet,
    pub daily_scores: ScoreSet,
    pub wellness_score: u32,
    pub max_wellness_score: u32,
    pub last_reset: TimestampMs,
    pub next_reset: TimestampMs,
    /// Entry recorded if this request closed the previous day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolled_over: Option<HistoryEntry>,
}

impl WellnessResponse {
    pub fn new(state: &UserWellnessState, rolled_over: Option<HistoryEntry>) -> Self {
        Self {
            daily_goals: *state.daily_goals(),
            daily_scores: *state.daily_scores(),
            wellness_score: state.wellness_score(),
            max_wellness_score: MAX_WELLNESS_SCORE,
            last_reset: state.last_reset(),
            next_reset: state.next_reset(),
            rolled_over,
        }
    }
}

/// Meal log request: either detected items or raw nutrition totals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogMealRequest {
    Analyzed { items: Vec<MealItem> },
    Intake(MealIntake),
}

/// Meal log response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMealResponse {
    pub wellness: WellnessResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<MealAnalysis>,
}

/// Water log request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogWaterRequest {
    pub glasses: f64,
}

/// Pull today's data from the fitness provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessSyncRequest {
    pub access_token: String,
}

/// Score history with summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub summary: HistorySummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily_goals::MetricTargets;

    #[test]
    fn test_log_meal_request_items() {
        let json = r#"{ "items": [ { "name": "Oatmeal", "calories": 68, "carbs": 12 } ] }"#;
        match serde_json::from_str::<LogMealRequest>(json).unwrap() {
            LogMealRequest::Analyzed { items } => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].name, "Oatmeal");
                assert_eq!(items[0].protein, 0.0);
            }
            other => panic!("expected items, got {:?}", other),
        }
    }

    #[test]
    fn test_log_meal_request_intake() {
        let json = r#"{ "calories": 450, "protein": 30 }"#;
        match serde_json::from_str::<LogMealRequest>(json).unwrap() {
            LogMealRequest::Intake(intake) => {
                assert_eq!(intake.calories, 450.0);
                assert_eq!(intake.protein, 30.0);
                assert_eq!(intake.sugar, 0.0);
            }
            other => panic!("expected intake, got {:?}", other),
        }
    }

    #[test]
    fn test_wellness_response_shape() {
        let state = UserWellnessState::new(&MetricTargets::default(), 1_000);
        let value = serde_json::to_value(WellnessResponse::new(&state, None)).unwrap();

        assert_eq!(value["maxWellnessScore"], 33);
        assert_eq!(value["nextReset"], 1_000 + 86_400_000i64);
        assert!(value.get("rolledOver").is_none());
        assert!(value["dailyGoals"]["heartRate"].is_object());
    }
}

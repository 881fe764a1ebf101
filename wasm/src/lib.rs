//! Wellness Coach WASM Module
//!
//! Browser bindings for the wellness scorer so the client can preview
//! scores and the daily rollover without a round trip.

use wasm_bindgen::prelude::*;
use wellness_coach_shared::daily_goals::{Metric, MetricKey, MetricSet};
use wellness_coach_shared::{meals, scoring, TimestampMs, UserWellnessState, WellnessDocument};

/// Points (0-3) for one metric
#[wasm_bindgen]
pub fn score_metric(current: f64, target: f64) -> u8 {
    scoring::score(&Metric::new(current, target))
}

/// Total wellness score for parallel arrays of current values and targets
///
/// Entries follow the fixed metric order (calories, water, steps, sleep,
/// sugar, carbs, protein, fat, heart rate, distance, active minutes).
/// Missing entries score 0.
#[wasm_bindgen]
pub fn wellness_score(currents: &[f64], targets: &[f64]) -> u32 {
    metric_set(currents, targets).map_or(0, |set| scoring::score_all(&set).total())
}

/// Whether a day starting at `last_reset` is over at `now` (ms since epoch)
#[wasm_bindgen]
pub fn is_rollover_due(last_reset: f64, now: f64) -> bool {
    let state = UserWellnessState::from_parts(
        MetricSet::default(),
        Default::default(),
        last_reset as TimestampMs,
    );
    state.is_rollover_due(now as TimestampMs)
}

/// Normalize a stored wellness document at `now`
///
/// Recomputes scores and applies the rollover if due. Returns the document
/// as JSON.
#[wasm_bindgen]
pub fn refresh_document(document_json: &str, now: f64) -> Result<String, JsValue> {
    refresh(document_json, now as TimestampMs).map_err(|e| JsValue::from_str(&e))
}

/// Advice text for a meal's calories, protein and carbs
#[wasm_bindgen]
pub fn meal_suggestion(calories: f64, protein: f64, carbs: f64) -> String {
    meals::suggestion(calories, protein, carbs)
}

fn metric_set(currents: &[f64], targets: &[f64]) -> Option<MetricSet> {
    if currents.is_empty() {
        return None;
    }

    let mut set = MetricSet::default();
    for (i, key) in MetricKey::ALL.iter().enumerate() {
        let metric = set.get_mut(*key);
        metric.current = currents.get(i).copied().unwrap_or(0.0);
        metric.target = targets.get(i).copied().unwrap_or(0.0);
    }
    Some(set)
}

fn refresh(document_json: &str, now: TimestampMs) -> Result<String, String> {
    let mut state: UserWellnessState =
        serde_json::from_str(document_json).map_err(|e| format!("Invalid document: {}", e))?;
    state.rollover_if_due(now);
    serde_json::to_string(&WellnessDocument::from(state))
        .map_err(|e| format!("Failed to encode document: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: f64 = 86_400_000.0;

    #[test]
    fn test_score_metric_bands() {
        assert_eq!(score_metric(0.0, 8.0), 0);
        assert_eq!(score_metric(2.0, 8.0), 0);
        assert_eq!(score_metric(2.1, 8.0), 1);
        assert_eq!(score_metric(6.1, 8.0), 3);
        assert_eq!(score_metric(5.0, 0.0), 0);
    }

    #[test]
    fn test_wellness_score_over_arrays() {
        let currents = [2000.0, 8.0, 10000.0];
        let targets = [2000.0, 8.0, 10000.0];
        assert_eq!(wellness_score(&currents, &targets), 9);
        assert_eq!(wellness_score(&[], &[]), 0);
    }

    #[test]
    fn test_rollover_due() {
        assert!(!is_rollover_due(0.0, DAY_MS - 1.0));
        assert!(is_rollover_due(0.0, DAY_MS));
        assert!(!is_rollover_due(DAY_MS, 0.0));
    }

    #[test]
    fn test_refresh_rolls_over_stale_document() {
        let doc = r#"{
            "dailyGoals": { "water": { "current": 8, "target": 8 } },
            "wellnessScore": 0,
            "lastReset": 0
        }"#;

        let refreshed: serde_json::Value =
            serde_json::from_str(&refresh(doc, 90_000_000).unwrap()).unwrap();

        assert_eq!(refreshed["lastReset"], 90_000_000);
        assert_eq!(refreshed["scoreHistory"][0]["totalScore"], 3);
        assert_eq!(refreshed["dailyGoals"]["water"]["current"], 0.0);
    }

    #[test]
    fn test_refresh_recomputes_scores() {
        let doc = r#"{ "dailyGoals": { "steps": { "current": 7000, "target": 10000 } }, "lastReset": 1000 }"#;
        let refreshed: serde_json::Value =
            serde_json::from_str(&refresh(doc, 2000).unwrap()).unwrap();
        assert_eq!(refreshed["dailyScores"]["steps"], 2);
        assert_eq!(refreshed["wellnessScore"], 2);
    }

    #[test]
    fn test_refresh_rejects_garbage() {
        assert!(refresh("not json", 0).is_err());
    }
}

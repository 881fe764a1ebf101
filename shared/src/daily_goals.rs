//! Daily goal metrics
//!
//! The eleven wellness dimensions tracked per user per day. The key set is
//! closed, so both [`MetricSet`] and [`MetricTargets`] are fixed-shape
//! records rather than maps.

use serde::{Deserialize, Serialize};

// ============================================================================
// Metric keys
// ============================================================================

/// One tracked wellness dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    Calories,
    Water,
    Steps,
    Sleep,
    Sugar,
    Carbs,
    Protein,
    Fat,
    HeartRate,
    Distance,
    ActiveMinutes,
}

impl MetricKey {
    /// Every metric, in display order
    pub const ALL: [MetricKey; 11] = [
        MetricKey::Calories,
        MetricKey::Water,
        MetricKey::Steps,
        MetricKey::Sleep,
        MetricKey::Sugar,
        MetricKey::Carbs,
        MetricKey::Protein,
        MetricKey::Fat,
        MetricKey::HeartRate,
        MetricKey::Distance,
        MetricKey::ActiveMinutes,
    ];

    /// Wire name used in persisted documents
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Calories => "calories",
            MetricKey::Water => "water",
            MetricKey::Steps => "steps",
            MetricKey::Sleep => "sleep",
            MetricKey::Sugar => "sugar",
            MetricKey::Carbs => "carbs",
            MetricKey::Protein => "protein",
            MetricKey::Fat => "fat",
            MetricKey::HeartRate => "heartRate",
            MetricKey::Distance => "distance",
            MetricKey::ActiveMinutes => "activeMinutes",
        }
    }

    /// Unit the `current` and `target` values are measured in
    pub fn unit(&self) -> &'static str {
        match self {
            MetricKey::Calories => "kcal",
            MetricKey::Water => "glasses",
            MetricKey::Steps => "steps",
            MetricKey::Sleep => "hours",
            MetricKey::Sugar | MetricKey::Carbs | MetricKey::Protein | MetricKey::Fat => "g",
            MetricKey::HeartRate => "bpm",
            MetricKey::Distance => "km",
            MetricKey::ActiveMinutes => "min",
        }
    }

    /// Built-in daily target
    pub fn default_target(&self) -> f64 {
        match self {
            MetricKey::Calories => 2000.0,
            MetricKey::Water => 8.0,
            MetricKey::Steps => 10000.0,
            MetricKey::Sleep => 8.0,
            MetricKey::Sugar => 50.0,
            MetricKey::Carbs => 250.0,
            MetricKey::Protein => 100.0,
            MetricKey::Fat => 70.0,
            // average resting heart rate
            MetricKey::HeartRate => 70.0,
            MetricKey::Distance => 5.0,
            MetricKey::ActiveMinutes => 30.0,
        }
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Metric
// ============================================================================

/// Observed quantity against a goal quantity
///
/// Both fields default to zero when absent from a document; a zero target
/// always scores zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub current: f64,
    #[serde(default)]
    pub target: f64,
}

impl Metric {
    pub fn new(current: f64, target: f64) -> Self {
        Self { current, target }
    }

    /// A metric with nothing recorded yet
    pub fn empty(target: f64) -> Self {
        Self {
            current: 0.0,
            target,
        }
    }
}

// ============================================================================
// Targets
// ============================================================================

/// Configurable daily targets, one per metric
///
/// Field names stay snake_case so they survive the lowercasing done by
/// layered config sources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricTargets {
    pub calories: f64,
    pub water: f64,
    pub steps: f64,
    pub sleep: f64,
    pub sugar: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub heart_rate: f64,
    pub distance: f64,
    pub active_minutes: f64,
}

impl MetricTargets {
    pub fn get(&self, key: MetricKey) -> f64 {
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
}

impl Default for MetricTargets {
    fn default() -> Self {
        Self {
            calories: MetricKey::Calories.default_target(),
            water: MetricKey::Water.default_target(),
            steps: MetricKey::Steps.default_target(),
            sleep: MetricKey::Sleep.default_target(),
            sugar: MetricKey::Sugar.default_target(),
            carbs: MetricKey::Carbs.default_target(),
            protein: MetricKey::Protein.default_target(),
            fat: MetricKey::Fat.default_target(),
            heart_rate: MetricKey::HeartRate.default_target(),
            distance: MetricKey::Distance.default_target(),
            active_minutes: MetricKey::ActiveMinutes.default_target(),
        }
    }
}

// ============================================================================
// Metric set
// ============================================================================

/// The full set of daily goals for one user
///
/// Keys missing from a deserialized document fall back to an empty metric
/// with that key's built-in target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricSet {
    pub calories: Metric,
    pub water: Metric,
    pub steps: Metric,
    pub sleep: Metric,
    pub sugar: Metric,
    pub carbs: Metric,
    pub protein: Metric,
    pub fat: Metric,
    pub heart_rate: Metric,
    pub distance: Metric,
    pub active_minutes: Metric,
}

impl MetricSet {
    /// Fresh goals for a new day using the given targets
    pub fn with_targets(targets: &MetricTargets) -> Self {
        Self {
            calories: Metric::empty(targets.calories),
            water: Metric::empty(targets.water),
            steps: Metric::empty(targets.steps),
            sleep: Metric::empty(targets.sleep),
            sugar: Metric::empty(targets.sugar),
            carbs: Metric::empty(targets.carbs),
            protein: Metric::empty(targets.protein),
            fat: Metric::empty(targets.fat),
            heart_rate: Metric::empty(targets.heart_rate),
            distance: Metric::empty(targets.distance),
            active_minutes: Metric::empty(targets.active_minutes),
        }
    }

    pub fn get(&self, key: MetricKey) -> &Metric {
        match key {
            MetricKey::Calories => &self.calories,
            MetricKey::Water => &self.water,
            MetricKey::Steps => &self.steps,
            MetricKey::Sleep => &self.sleep,
            MetricKey::Sugar => &self.sugar,
            MetricKey::Carbs => &self.carbs,
            MetricKey::Protein => &self.protein,
            MetricKey::Fat => &self.fat,
            MetricKey::HeartRate => &self.heart_rate,
            MetricKey::Distance => &self.distance,
            MetricKey::ActiveMinutes => &self.active_minutes,
        }
    }

    pub fn get_mut(&mut self, key: MetricKey) -> &mut Metric {
        match key {
            MetricKey::Calories => &mut self.calories,
            MetricKey::Water => &mut self.water,
            MetricKey::Steps => &mut self.steps,
            MetricKey::Sleep => &mut self.sleep,
            MetricKey::Sugar => &mut self.sugar,
            MetricKey::Carbs => &mut self.carbs,
            MetricKey::Protein => &mut self.protein,
            MetricKey::Fat => &mut self.fat,
            MetricKey::HeartRate => &mut self.heart_rate,
            MetricKey::Distance => &mut self.distance,
            MetricKey::ActiveMinutes => &mut self.active_minutes,
        }
    }

    /// Iterate `(key, metric)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, &Metric)> + '_ {
        MetricKey::ALL.iter().map(move |&key| (key, self.get(key)))
    }

    /// Zero every `current`, keeping targets
    pub fn reset_current(&mut self) {
        for key in MetricKey::ALL {
            self.get_mut(key).current = 0.0;
        }
    }
}

impl Default for MetricSet {
    fn default() -> Self {
        Self::with_targets(&MetricTargets::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_match_keys() {
        let goals = MetricSet::default();
        for (key, metric) in goals.iter() {
            assert_eq!(metric.target, key.default_target(), "target for {}", key);
            assert_eq!(metric.current, 0.0);
        }
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let json = r#"{ "steps": { "current": 4200, "target": 8000 } }"#;
        let goals: MetricSet = serde_json::from_str(json).unwrap();

        assert_eq!(goals.steps, Metric::new(4200.0, 8000.0));
        assert_eq!(goals.heart_rate, Metric::empty(70.0));
        assert_eq!(goals.active_minutes, Metric::empty(30.0));
    }

    #[test]
    fn test_missing_target_is_zero() {
        let json = r#"{ "water": { "current": 3 } }"#;
        let goals: MetricSet = serde_json::from_str(json).unwrap();
        assert_eq!(goals.water, Metric::new(3.0, 0.0));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let value = serde_json::to_value(MetricSet::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 11);
        for key in MetricKey::ALL {
            assert!(object.contains_key(key.as_str()), "missing {}", key);
        }
    }

    #[test]
    fn test_reset_keeps_targets() {
        let mut goals = MetricSet::default();
        goals.steps.current = 12000.0;
        goals.protein.current = 80.0;

        goals.reset_current();

        assert_eq!(goals, MetricSet::default());
    }

    #[test]
    fn test_custom_targets() {
        let targets = MetricTargets {
            steps: 6000.0,
            ..Default::default()
        };
        let goals = MetricSet::with_targets(&targets);
        assert_eq!(goals.get(MetricKey::Steps).target, 6000.0);
        assert_eq!(goals.get(MetricKey::Water).target, 8.0);
    }

    #[test]
    fn test_target_validation() {
        use crate::validation::validate_targets;

        assert!(validate_targets(&MetricTargets::default()).is_ok());

        let invalid = MetricTargets {
            sleep: 0.0,
            ..Default::default()
        };
        assert!(validate_targets(&invalid).is_err());
    }
}

//! Fitness tracker readings
//!
//! A [`FitnessReading`] is today's activity snapshot pulled from a fitness
//! data provider. The aggregation helpers turn the provider's raw dataset
//! points into the reading's units.

use serde::{Deserialize, Serialize};

/// Today's activity snapshot from a fitness provider
///
/// Every field is optional; absent readings leave the matching daily goal
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessReading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate_bpm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
}

impl FitnessReading {
    /// True when the reading carries no values at all
    pub fn is_empty(&self) -> bool {
        self.steps.is_none()
            && self.sleep_hours.is_none()
            && self.heart_rate_bpm.is_none()
            && self.distance_km.is_none()
            && self.active_minutes.is_none()
            && self.calories_burned.is_none()
    }
}

// ============================================================================
// Provider datasets
// ============================================================================

/// Dataset types requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitnessDataType {
    Steps,
    Sleep,
    HeartRate,
    Calories,
    Distance,
    ActiveMinutes,
}

impl FitnessDataType {
    pub const ALL: [FitnessDataType; 6] = [
        FitnessDataType::Steps,
        FitnessDataType::Sleep,
        FitnessDataType::HeartRate,
        FitnessDataType::Calories,
        FitnessDataType::Distance,
        FitnessDataType::ActiveMinutes,
    ];

    /// Data source name in the provider API
    pub fn source_name(&self) -> &'static str {
        match self {
            FitnessDataType::Steps => "com.google.step_count.delta",
            FitnessDataType::Sleep => "com.google.sleep.segment",
            FitnessDataType::HeartRate => "com.google.heart_rate.bpm",
            FitnessDataType::Calories => "com.google.calories.expended",
            FitnessDataType::Distance => "com.google.distance.delta",
            FitnessDataType::ActiveMinutes => "com.google.active_minutes",
        }
    }
}

/// Response body of a dataset request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub point: Vec<DataPoint>,
}

/// One sample in a dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(default)]
    pub value: Vec<DataValue>,
}

/// Typed sample value; only one of the fields is set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_val: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fp_val: Option<f64>,
}

impl DataPoint {
    fn int_val(&self) -> Option<i64> {
        self.value.first().and_then(|v| v.int_val)
    }

    fn fp_val(&self) -> Option<f64> {
        self.value.first().and_then(|v| v.fp_val)
    }
}

fn sum_int(points: &[DataPoint]) -> f64 {
    points.iter().filter_map(DataPoint::int_val).sum::<i64>() as f64
}

fn sum_fp(points: &[DataPoint]) -> f64 {
    points.iter().filter_map(DataPoint::fp_val).sum()
}

/// Total step count
pub fn aggregate_steps(points: &[DataPoint]) -> f64 {
    sum_int(points)
}

/// Total sleep in hours; segments are reported in minutes
pub fn aggregate_sleep_hours(points: &[DataPoint]) -> f64 {
    sum_int(points) / 60.0
}

/// Mean heart rate over the samples that carry a value, 0 without samples
pub fn aggregate_heart_rate(points: &[DataPoint]) -> f64 {
    let rates: Vec<f64> = points.iter().filter_map(DataPoint::fp_val).collect();
    if rates.is_empty() {
        return 0.0;
    }
    rates.iter().sum::<f64>() / rates.len() as f64
}

/// Total calories expended
pub fn aggregate_calories(points: &[DataPoint]) -> f64 {
    sum_fp(points)
}

/// Total distance in km; samples are reported in meters
pub fn aggregate_distance_km(points: &[DataPoint]) -> f64 {
    sum_fp(points) / 1000.0
}

/// Total active minutes
pub fn aggregate_active_minutes(points: &[DataPoint]) -> f64 {
    sum_int(points)
}

/// Aggregate one dataset into the value for its type
pub fn aggregate(data_type: FitnessDataType, points: &[DataPoint]) -> f64 {
    match data_type {
        FitnessDataType::Steps => aggregate_steps(points),
        FitnessDataType::Sleep => aggregate_sleep_hours(points),
        FitnessDataType::HeartRate => aggregate_heart_rate(points),
        FitnessDataType::Calories => aggregate_calories(points),
        FitnessDataType::Distance => aggregate_distance_km(points),
        FitnessDataType::ActiveMinutes => aggregate_active_minutes(points),
    }
}

impl FitnessReading {
    /// Set the field matching a dataset type
    pub fn set(&mut self, data_type: FitnessDataType, value: f64) {
        let slot = match data_type {
            FitnessDataType::Steps => &mut self.steps,
            FitnessDataType::Sleep => &mut self.sleep_hours,
            FitnessDataType::HeartRate => &mut self.heart_rate_bpm,
            FitnessDataType::Calories => &mut self.calories_burned,
            FitnessDataType::Distance => &mut self.distance_km,
            FitnessDataType::ActiveMinutes => &mut self.active_minutes,
        };
        *slot = Some(value);
    }
}

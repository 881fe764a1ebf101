//! Input sanitizing and validation
//!
//! Observed quantities come from device sensors and user entry and are not
//! trusted to be well-formed; they are clamped rather than rejected.
//! Configuration values such as targets are validated strictly.

use crate::daily_goals::{MetricKey, MetricTargets};

/// Clamp an observed quantity to a usable non-negative number
///
/// Negative values and NaN become 0. Positive infinity saturates at
/// `f64::MAX` so the value still encodes as a JSON number.
pub fn sanitize_quantity(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value.min(f64::MAX)
    }
}

/// Add an observed amount to a running total, both clamped
pub fn accumulate_quantity(total: f64, amount: f64) -> f64 {
    sanitize_quantity(sanitize_quantity(total) + sanitize_quantity(amount))
}

/// Validate a single daily target
pub fn validate_target(key: MetricKey, target: f64) -> Result<(), String> {
    if !target.is_finite() {
        return Err(format!("Target for {} must be a valid number", key));
    }
    if target <= 0.0 {
        return Err(format!("Target for {} must be greater than zero", key));
    }
    Ok(())
}

/// Validate a full set of targets, collecting every problem
pub fn validate_targets(targets: &MetricTargets) -> Result<(), Vec<String>> {
    let errors: Vec<String> = MetricKey::ALL
        .iter()
        .filter_map(|&key| validate_target(key, targets.get(key)).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

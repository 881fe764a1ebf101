//! Meal analysis
//!
//! Turns the items detected in a meal photo into totals, a readable meal
//! name and a short nutrition suggestion. The totals feed the daily
//! nutrition goals through [`MealIntake`].

use serde::{Deserialize, Serialize};

/// Calories below which a meal counts as light
const LIGHT_MEAL_KCAL: f64 = 300.0;
/// Calories above which a meal counts as hearty
const HEARTY_MEAL_KCAL: f64 = 800.0;
/// Protein share of calories (percent) considered low / high
const LOW_PROTEIN_SHARE: f64 = 15.0;
const HIGH_PROTEIN_SHARE: f64 = 30.0;
/// Carbs in grams below which a meal counts as low-carb
const LOW_CARBS_G: f64 = 20.0;
/// Energy per gram of protein
const KCAL_PER_G_PROTEIN: f64 = 4.0;

/// One food item detected in a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealItem {
    pub name: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub sugar: f64,
}

/// Nutrition consumed in one meal, accumulated into the daily goals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MealIntake {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub sugar: f64,
}

/// Totals and feedback for an analyzed meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealAnalysis {
    pub items: Vec<MealItem>,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_sugar: f64,
    pub meal_name: String,
    pub suggestion: String,
}

impl MealAnalysis {
    pub fn from_items(items: Vec<MealItem>) -> Self {
        let total_calories: f64 = items.iter().map(|i| i.calories).sum();
        let total_protein: f64 = items.iter().map(|i| i.protein).sum();
        let total_carbs: f64 = items.iter().map(|i| i.carbs).sum();
        let total_fat: f64 = items.iter().map(|i| i.fat).sum();
        let total_sugar: f64 = items.iter().map(|i| i.sugar).sum();
        let meal_name = meal_name(&items);
        let suggestion = suggestion(total_calories, total_protein, total_carbs);

        Self {
            items,
            total_calories,
            total_protein,
            total_carbs,
            total_fat,
            total_sugar,
            meal_name,
            suggestion,
        }
    }

    /// Nutrition to add to the daily goals
    pub fn intake(&self) -> MealIntake {
        MealIntake {
            calories: self.total_calories,
            carbs: self.total_carbs,
            protein: self.total_protein,
            fat: self.total_fat,
            sugar: self.total_sugar,
        }
    }
}

/// Descriptive name built from the first two items
pub fn meal_name(items: &[MealItem]) -> String {
    match items {
        [] => String::new(),
        [only] => only.name.clone(),
        [first, second] => format!("{} with {}", first.name, second.name),
        [first, second, rest @ ..] => format!(
            "{} with {} and {} more items",
            first.name,
            second.name,
            rest.len()
        ),
    }
}

/// Short nutrition feedback for a meal's totals
pub fn suggestion(total_calories: f64, total_protein: f64, total_carbs: f64) -> String {
    let mut parts = Vec::new();

    if total_calories < LIGHT_MEAL_KCAL {
        parts.push("This is a light meal. Consider adding more protein or healthy carbs for sustained energy.");
    } else if total_calories > HEARTY_MEAL_KCAL {
        parts.push("This is a hearty meal! Great for replenishing energy after exercise.");
    } else {
        parts.push("Well-balanced portion size! This meal provides good nutrition.");
    }

    if total_calories > 0.0 {
        let protein_share = total_protein * KCAL_PER_G_PROTEIN / total_calories * 100.0;
        if protein_share < LOW_PROTEIN_SHARE {
            parts.push("Consider adding more protein sources like chicken, fish, or legumes.");
        } else if protein_share > HIGH_PROTEIN_SHARE {
            parts.push("High protein content! Great for muscle maintenance and satiety.");
        }
    }

    if total_carbs < LOW_CARBS_G {
        parts.push("Low in carbohydrates. Add whole grains or fruits for balanced nutrition.");
    }

    parts.join(" ")
}

//! Prompt text and response schemas for the advisory model.

use serde_json::{json, Value};

use super::dto::DaySnapshot;
use crate::profile::Profile;

/// Below this many remaining kcal the request asks for snacks or drinks.
pub const SNACK_THRESHOLD_KCAL: f64 = 200.0;
pub const WATER_GOAL_GLASSES: u32 = 8;

pub fn analyze_food(description: &str) -> String {
    format!(
        "Estimate the nutrition of \"{description}\". Give approximate values for one plate or piece."
    )
}

pub fn meal_plan(target_calories: f64) -> String {
    format!(
        "Create a one-day meal plan for a Thai person who wants to lose weight, with a total of \
         about {target_calories} kcal. Prefer dishes that are easy to buy or cook, healthy but tasty."
    )
}

pub fn remaining(remaining_calories: f64) -> String {
    if remaining_calories < SNACK_THRESHOLD_KCAL {
        format!(
            "{remaining_calories} kcal left in today's budget. Suggest 3 low-calorie snacks or \
             drinks (Thai, or easy to buy at a convenience store)."
        )
    } else {
        format!(
            "{remaining_calories} kcal left in today's budget. Suggest 3 healthy, filling Thai \
             meals that stay within this."
        )
    }
}

pub fn health_advice(profile: &Profile, day: DaySnapshot) -> String {
    format!(
        "The user does not like exercising. Age {age}, weight {weight} kg, height {height} cm. \
         Today they ate {calories} kcal (against a TDEE-based deficit target) and drank {water} \
         glasses of water. Give a short analysis and some encouragement, and remind them to drink \
         more if they are under the goal of {goal} glasses. Friendly, short and to the point.",
        age = profile.age,
        weight = profile.weight,
        height = profile.height,
        calories = day.calories,
        water = day.water_glasses,
        goal = WATER_GOAL_GLASSES,
    )
}

pub fn food_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": "Standard dish name" },
            "calories": { "type": "NUMBER", "description": "Energy (kcal)" },
            "protein": { "type": "NUMBER", "description": "Protein (g)" },
            "carbs": { "type": "NUMBER", "description": "Carbohydrates (g)" },
            "fat": { "type": "NUMBER", "description": "Fat (g)" }
        },
        "required": ["name", "calories", "protein", "carbs", "fat"]
    })
}

pub fn suggestions_schema(description_hint: Option<&str>) -> Value {
    let mut description = json!({ "type": "STRING" });
    if let Some(hint) = description_hint {
        description["description"] = Value::String(hint.to_string());
    }
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "type": { "type": "STRING", "enum": ["breakfast", "lunch", "dinner", "snack"] },
                "mealName": { "type": "STRING" },
                "description": description,
                "calories": { "type": "NUMBER" }
            },
            "required": ["type", "mealName", "description", "calories"]
        }
    })
}

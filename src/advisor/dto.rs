use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    /// Any unrecognized tag from the model lands here.
    #[serde(other)]
    Snack,
}

/// A display-only suggestion; held in memory, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSuggestion {
    pub meal_name: String,
    pub description: String,
    pub calories: f64,
    #[serde(rename = "type")]
    pub meal_type: MealType,
}

/// What the coach sees of today.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaySnapshot {
    pub calories: f64,
    pub water_glasses: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    /// The calorie figure the request was made for.
    pub calories: f64,
    pub suggestions: Vec<MealSuggestion>,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: Option<String>,
}

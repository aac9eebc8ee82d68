use async_trait::async_trait;

use super::dto::{DaySnapshot, MealSuggestion};
use crate::logs::dto::FoodItem;
use crate::profile::Profile;

pub const ADVICE_NO_KEY: &str = "Add a Gemini API key to receive advice.";
pub const ADVICE_EMPTY: &str = "Keep going, you did great today!";
pub const ADVICE_UNAVAILABLE: &str = "Unable to reach the AI service right now.";

/// The remote advisory service. Every call is independently failable and
/// never surfaces an error: failures come back as `None`, an empty list or
/// a fixed sentence.
#[async_trait]
pub trait AdvisoryGateway: Send + Sync {
    /// One serving's nutrition estimate for a free-text description.
    async fn analyze_food(&self, description: &str) -> Option<FoodItem>;

    /// A full day of meals summing to roughly `target_calories`.
    async fn suggest_meal_plan(&self, target_calories: f64) -> Vec<MealSuggestion>;

    /// A few options that fit in what is left of today's budget. Every
    /// returned item is tagged as a snack.
    async fn suggest_food_for_remaining(&self, remaining_calories: f64) -> Vec<MealSuggestion>;

    async fn health_advice(&self, profile: &Profile, day: DaySnapshot) -> String;
}

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::dto::{DaySnapshot, MealSuggestion, MealType};
use super::gateway::AdvisoryGateway;
use crate::logs::dto::FoodItem;
use crate::profile::Profile;

/// Canned advisory answers for handler tests.
#[derive(Default)]
pub struct StubGateway {
    pub food: Option<FoodItem>,
    pub plan: Vec<MealSuggestion>,
    pub remaining: Vec<MealSuggestion>,
    pub advice: String,
    pub calls: AtomicUsize,
}

impl StubGateway {
    pub fn healthy() -> Self {
        Self {
            food: Some(FoodItem {
                name: "Tom yum goong".into(),
                calories: 250.0,
                protein: 20.0,
                carbs: 10.0,
                fat: 12.0,
                timestamp: "2026-10-15T12:00:00Z".into(),
            }),
            plan: vec![MealSuggestion {
                meal_name: "Jok".into(),
                description: "rice porridge with pork".into(),
                calories: 350.0,
                meal_type: MealType::Breakfast,
            }],
            remaining: vec![MealSuggestion {
                meal_name: "Boiled egg".into(),
                description: "protein".into(),
                calories: 75.0,
                meal_type: MealType::Snack,
            }],
            advice: "Nice work, drink more water.".into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AdvisoryGateway for StubGateway {
    async fn analyze_food(&self, _description: &str) -> Option<FoodItem> {
        self.hit();
        self.food.clone()
    }

    async fn suggest_meal_plan(&self, _target_calories: f64) -> Vec<MealSuggestion> {
        self.hit();
        self.plan.clone()
    }

    async fn suggest_food_for_remaining(&self, _remaining_calories: f64) -> Vec<MealSuggestion> {
        self.hit();
        self.remaining.clone()
    }

    async fn health_advice(&self, _profile: &Profile, _day: DaySnapshot) -> String {
        self.hit();
        self.advice.clone()
    }
}

//! Body and calorie figures derived from the profile and today's log.
//!
//! BMR uses the Mifflin-St Jeor equation (Mifflin et al., 1990):
//! `10·weight + 6.25·height − 5·age + 5` for men, `… − 161` for women.

use crate::logs::dto::{FoodItem, ML_PER_GLASS};
use crate::profile::{Gender, Profile};

/// Fixed diet-only deficit behind the daily target and the projection.
pub const DAILY_DEFICIT_KCAL: f64 = 500.0;
pub const WATER_GOAL_ML: f64 = 2000.0;

/// `None` when height is not positive.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if height_cm <= 0.0 {
        return None;
    }
    let m = height_cm / 100.0;
    Some(weight_kg / (m * m))
}

pub fn bmr(profile: &Profile) -> f64 {
    let base = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * profile.age;
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

pub fn tdee(profile: &Profile) -> f64 {
    bmr(profile) * profile.activity_level
}

pub fn target_calories(profile: &Profile) -> f64 {
    (tdee(profile) - DAILY_DEFICIT_KCAL).floor()
}

pub fn consumed_calories(foods: &[FoodItem]) -> f64 {
    foods.iter().map(|f| f.calories).sum()
}

pub fn remaining_calories(target: f64, consumed: f64) -> f64 {
    (target - consumed).max(0.0)
}

/// Whole percent of the target eaten so far.
pub fn consumed_percent(target: f64, consumed: f64) -> Option<i64> {
    (target > 0.0).then(|| (consumed / target * 100.0).round() as i64)
}

pub fn glasses_equivalent(water_ml: f64) -> f64 {
    round1(water_ml / ML_PER_GLASS)
}

pub fn glasses_rounded(water_ml: f64) -> u32 {
    (water_ml / ML_PER_GLASS).round().max(0.0) as u32
}

pub fn water_percent(water_ml: f64) -> f64 {
    (water_ml / WATER_GOAL_ML * 100.0).min(100.0)
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use super::calc;
use super::memo::BodyMetrics;
use super::projection::{project_weight, WeightProjection};
use crate::{error::ApiError, logs::services::today_date, state::AppState};

pub fn metrics_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/projection", get(get_projection))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterSummary {
    pub intake_ml: f64,
    pub glasses_equivalent: f64,
    pub goal_ml: f64,
    pub percent: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub name: String,
    pub date: String,
    pub metrics: BodyMetrics,
    pub water: WaterSummary,
    pub food_count: usize,
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let mut tracker = state.tracker.lock().await;
    let metrics = tracker.metrics()?;
    let name = tracker.require_profile()?.name.clone();
    let log = tracker.log.today();
    let water_ml = log.water_intake;

    Ok(Json(DashboardResponse {
        name,
        date: log.date.clone(),
        metrics,
        water: WaterSummary {
            intake_ml: water_ml,
            glasses_equivalent: calc::glasses_equivalent(water_ml),
            goal_ml: calc::WATER_GOAL_ML,
            percent: calc::water_percent(water_ml),
        },
        food_count: log.foods.len(),
    }))
}

#[instrument(skip(state))]
pub async fn get_projection(
    State(state): State<AppState>,
) -> Result<Json<WeightProjection>, ApiError> {
    let tracker = state.tracker.lock().await;
    let profile = tracker.require_profile()?;
    Ok(Json(project_weight(
        profile.weight,
        profile.target_weight,
        today_date(),
    )))
}

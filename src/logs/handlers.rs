use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{AnalyzeFoodRequest, AnalyzeFoodResponse, DailyLog, FoodItem, WaterRequest};
use super::services::today_date;
use crate::{error::ApiError, state::AppState};

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/log", get(get_log))
        .route("/log/reload", post(reload_log))
        .route("/log/foods", get(list_foods).post(add_food))
        .route("/log/foods/:index", delete(remove_food))
        .route("/log/foods/display/:index", delete(remove_food_display))
        .route("/log/water", post(add_water))
}

#[instrument(skip(state))]
pub async fn get_log(State(state): State<AppState>) -> Json<DailyLog> {
    let tracker = state.tracker.lock().await;
    Json(tracker.log.today().clone())
}

#[instrument(skip(state))]
pub async fn reload_log(State(state): State<AppState>) -> Result<Json<DailyLog>, ApiError> {
    let mut tracker = state.tracker.lock().await;
    tracker.log.reload(today_date()).await?;
    Ok(Json(tracker.log.today().clone()))
}

/// Most recent first.
#[instrument(skip(state))]
pub async fn list_foods(State(state): State<AppState>) -> Json<Vec<FoodItem>> {
    let tracker = state.tracker.lock().await;
    Json(tracker.log.today().foods_recent_first())
}

/// Sends the description to the advisory service and appends whatever it
/// estimates. Nothing is appended when the service has no answer.
#[instrument(skip(state, payload))]
pub async fn add_food(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeFoodRequest>,
) -> Result<Json<AnalyzeFoodResponse>, ApiError> {
    let description = payload.description.trim();
    if description.is_empty() {
        return Err(ApiError::BadRequest("description is required".into()));
    }

    let food = {
        let _slot = state.inflight.analyze_food.try_begin()?;
        state.advisor.analyze_food(description).await
    };

    let mut tracker = state.tracker.lock().await;
    match &food {
        Some(item) => {
            tracker.log.add_food(item.clone()).await?;
            info!(name = %item.name, calories = item.calories, "food logged");
        }
        None => warn!("food analysis returned nothing; log unchanged"),
    }
    Ok(Json(AnalyzeFoodResponse {
        food,
        log: tracker.log.today().clone(),
    }))
}

#[instrument(skip(state))]
pub async fn remove_food(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<DailyLog>, ApiError> {
    let mut tracker = state.tracker.lock().await;
    tracker
        .log
        .remove_food(index)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no food at index {index}")))?;
    Ok(Json(tracker.log.today().clone()))
}

/// `index` counts from the most recent entry.
#[instrument(skip(state))]
pub async fn remove_food_display(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<DailyLog>, ApiError> {
    let mut tracker = state.tracker.lock().await;
    tracker
        .log
        .remove_food_display(index)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no food at display index {index}")))?;
    Ok(Json(tracker.log.today().clone()))
}

#[instrument(skip(state))]
pub async fn add_water(
    State(state): State<AppState>,
    Json(payload): Json<WaterRequest>,
) -> Result<Json<DailyLog>, ApiError> {
    if !payload.delta_ml.is_finite() {
        return Err(ApiError::BadRequest("deltaMl must be a number".into()));
    }
    let mut tracker = state.tracker.lock().await;
    tracker.log.add_water(payload.delta_ml).await?;
    Ok(Json(tracker.log.today().clone()))
}

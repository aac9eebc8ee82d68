use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, instrument};

use super::dto::{AdviceResponse, DaySnapshot, SuggestionsResponse};
use crate::{error::ApiError, metrics::calc, state::AppState};

pub fn advisor_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plan", get(get_meal_plan).post(generate_meal_plan))
        .route(
            "/suggestions/remaining",
            get(get_remaining_suggestions).post(suggest_for_remaining),
        )
        .route("/advice", get(get_advice).post(refresh_advice))
}

#[instrument(skip(state))]
pub async fn get_meal_plan(
    State(state): State<AppState>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let mut tracker = state.tracker.lock().await;
    let target = tracker.metrics()?.target_calories;
    Ok(Json(SuggestionsResponse {
        calories: target,
        suggestions: tracker.suggestions.meal_plan.clone(),
    }))
}

#[instrument(skip(state))]
pub async fn generate_meal_plan(
    State(state): State<AppState>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let target = state.tracker.lock().await.metrics()?.target_calories;

    let plan = {
        let _slot = state.inflight.meal_plan.try_begin()?;
        state.advisor.suggest_meal_plan(target).await
    };
    debug!(items = plan.len(), target, "meal plan received");

    let mut tracker = state.tracker.lock().await;
    tracker.suggestions.meal_plan = plan.clone();
    Ok(Json(SuggestionsResponse {
        calories: target,
        suggestions: plan,
    }))
}

#[instrument(skip(state))]
pub async fn get_remaining_suggestions(
    State(state): State<AppState>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let mut tracker = state.tracker.lock().await;
    let cached = tracker.suggestions.remaining_for;
    let remaining = match cached {
        Some(r) => r,
        None => tracker.metrics()?.remaining_calories,
    };
    Ok(Json(SuggestionsResponse {
        calories: remaining,
        suggestions: tracker.suggestions.remaining.clone(),
    }))
}

#[instrument(skip(state))]
pub async fn suggest_for_remaining(
    State(state): State<AppState>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let remaining = state.tracker.lock().await.metrics()?.remaining_calories;

    let suggestions = {
        let _slot = state.inflight.remaining.try_begin()?;
        state.advisor.suggest_food_for_remaining(remaining).await
    };
    debug!(items = suggestions.len(), remaining, "suggestions received");

    let mut tracker = state.tracker.lock().await;
    tracker.suggestions.remaining = suggestions.clone();
    tracker.suggestions.remaining_for = Some(remaining);
    Ok(Json(SuggestionsResponse {
        calories: remaining,
        suggestions,
    }))
}

#[instrument(skip(state))]
pub async fn get_advice(State(state): State<AppState>) -> Json<AdviceResponse> {
    let tracker = state.tracker.lock().await;
    Json(AdviceResponse {
        advice: tracker.suggestions.advice.clone(),
    })
}

#[instrument(skip(state))]
pub async fn refresh_advice(
    State(state): State<AppState>,
) -> Result<Json<AdviceResponse>, ApiError> {
    let (profile, day) = {
        let mut tracker = state.tracker.lock().await;
        let consumed = tracker.metrics()?.consumed_calories;
        let profile = tracker.require_profile()?.clone();
        let day = DaySnapshot {
            calories: consumed,
            water_glasses: calc::glasses_rounded(tracker.log.today().water_intake),
        };
        (profile, day)
    };

    let advice = {
        let _slot = state.inflight.advice.try_begin()?;
        state.advisor.health_advice(&profile, day).await
    };

    let mut tracker = state.tracker.lock().await;
    tracker.suggestions.advice = Some(advice.clone());
    Ok(Json(AdviceResponse {
        advice: Some(advice),
    }))
}

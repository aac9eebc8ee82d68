use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};

use super::dto::{ProfileRequest, ProfileResponse};
use crate::{error::ApiError, state::AppState};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(get_profile).put(put_profile).delete(delete_profile),
        )
        .route("/session", get(get_session))
}

#[instrument(skip(state))]
pub async fn get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    let tracker = state.tracker.lock().await;
    Json(ProfileResponse {
        profile: tracker.profile.profile().clone(),
        is_set: tracker.profile.is_set(),
        view: tracker.view(),
    })
}

#[instrument(skip(state, payload))]
pub async fn put_profile(
    State(state): State<AppState>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = payload.into_profile()?;
    let mut tracker = state.tracker.lock().await;
    let first = tracker.submit_profile(profile).await?;
    info!(first, view = ?tracker.view(), "profile submitted");
    Ok(Json(ProfileResponse {
        profile: tracker.profile.profile().clone(),
        is_set: true,
        view: tracker.view(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_profile(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let mut tracker = state.tracker.lock().await;
    tracker.clear_profile().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub is_set: bool,
    pub view: crate::tracker::View,
    pub date: String,
}

#[instrument(skip(state))]
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let tracker = state.tracker.lock().await;
    Json(SessionResponse {
        is_set: tracker.profile.is_set(),
        view: tracker.view(),
        date: tracker.log.today().date.clone(),
    })
}

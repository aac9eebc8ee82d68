pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use services::DailyLogStore;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::log_routes())
}

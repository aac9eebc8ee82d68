pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use dto::{Gender, Profile};
pub use services::ProfileStore;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::profile_routes())
}

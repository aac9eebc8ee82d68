pub mod calc;
pub mod handlers;
pub mod memo;
pub mod projection;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::metrics_routes())
}

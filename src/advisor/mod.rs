pub mod dto;
pub mod gateway;
pub mod gemini;
pub mod handlers;
pub mod inflight;
pub mod prompts;
#[cfg(test)]
pub mod stub;

use crate::state::AppState;
use axum::Router;

pub use gateway::AdvisoryGateway;
pub use gemini::GeminiGateway;
pub use inflight::InFlight;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::advisor_routes())
}

use std::net::SocketAddr;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::advisor::inflight::SlotState;
use crate::state::AppState;
use crate::{advisor, logs, metrics, profile};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(profile::router())
                .merge(logs::router())
                .merge(metrics::router())
                .merge(advisor::router()),
        )
        .route("/health", get(health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis();
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

#[derive(Debug, Serialize)]
pub struct InFlightStatus {
    pub analyze_food: SlotState,
    pub meal_plan: SlotState,
    pub remaining: SlotState,
    pub advice: SlotState,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub advisor_configured: bool,
    pub inflight: InFlightStatus,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let f = &state.inflight;
    Json(HealthResponse {
        status: "ok",
        advisor_configured: state.config.gemini.api_key.is_some(),
        inflight: InFlightStatus {
            analyze_food: f.analyze_food.state(),
            meal_plan: f.meal_plan.state(),
            remaining: f.remaining.state(),
            advice: f.advice.state(),
        },
    })
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

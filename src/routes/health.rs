use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    news_enabled: bool,
    speech_enabled: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    info!("GET /health - Health check");
    Json(HealthStatus {
        status: "OK",
        news_enabled: state.news_service.is_enabled(),
        speech_enabled: state.speech_service.is_enabled(),
    })
}

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{analysis, health, reports};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/analyze", analysis::router())
        .nest("/api/reports", reports::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

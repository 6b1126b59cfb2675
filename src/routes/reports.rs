use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{AnalysisReport, ReportRequest};
use crate::routes::analysis::require_company;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(build_report))
}

/// POST /api/reports
///
/// Build a comparative report from caller-supplied articles. No fetching, no speech.
///
/// Request body:
/// {
///   "company": "Acme",
///   "articles": [
///     { "title": "...", "summary": "...", "content": "...", "sentiment": "Positive", "topics": ["Sales"] }
///   ]
/// }
///
/// `sentiment` and `topics` are optional per article; an unrecognized sentiment label is a 422.
async fn build_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let company = require_company(request.company)?;
    info!(
        "POST /api/reports - Building report for {} from {} articles",
        company,
        request.articles.len()
    );

    let report = state
        .pipeline
        .build_report(&company, request.articles)
        .map_err(|e| {
            error!("Rejected report request for {}: {}", company, e);
            e
        })?;

    Ok(Json(report))
}

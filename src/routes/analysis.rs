use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{AnalysisResponse, AnalyzeRequest, ArticleInput, ComparativeSentimentScore};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(analyze_company))
}

/// Trimmed company name, or the 400 the front-end expects
pub(crate) fn require_company(company: Option<String>) -> Result<String, AppError> {
    company
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("No company provided".to_string()))
}

/// POST /api/analyze
///
/// Fetch coverage for a company, score and compare it, and narrate the verdict.
///
/// Request body: { "company": "Tesla" }
///
/// Fetch failures never fail the request; the sample articles stand in instead.
async fn analyze_company(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let company = require_company(request.company)?;
    info!("POST /api/analyze - Analyzing coverage for {}", company);

    let candidates: Vec<ArticleInput> = state
        .news_service
        .fetch_company_news(&company)
        .await
        .into_iter()
        .map(ArticleInput::from)
        .collect();

    let report = state
        .pipeline
        .build_report(&company, candidates)
        .map_err(|e| {
            error!("Failed to build report for {}: {}", company, e);
            e
        })?;

    let spoken = state.speech_service.narrate(&report.narrative).await;

    info!(
        "Analysis for {} complete: {} (fallback: {}, audio: {})",
        company,
        report.narrative,
        report.used_fallback,
        spoken.audio.is_some()
    );

    Ok(Json(AnalysisResponse {
        comparative_sentiment_score: ComparativeSentimentScore::from(&report.comparative),
        final_sentiment: report.comparative.final_sentiment,
        final_sentiment_analysis: report.narrative,
        translated_summary: spoken.text,
        audio: spoken.audio,
        used_fallback: report.used_fallback,
        articles: report.articles,
        company: report.company,
        generated_at: Utc::now(),
    }))
}

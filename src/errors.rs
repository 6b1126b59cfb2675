use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

/// Failures the report pipeline refuses to recover from
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid sentiment label '{label}' on article {position}")]
    InvalidSentimentLabel { position: usize, label: String },
}

#[derive(Debug, Error)]
pub enum NewsProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Empty text provided for speech synthesis")]
    EmptyText,
    #[error("Speech request failed: {0}")]
    Request(String),
    #[error("Unexpected speech response: {0}")]
    BadResponse(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Analysis(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
        }
    }
}

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use newslens_backend::app;
use newslens_backend::logging::{init_logging, LoggingConfig};
use newslens_backend::services::news_service::{NewsConfig, NewsService};
use newslens_backend::services::report_service::{PipelineConfig, ReportPipeline};
use newslens_backend::services::speech_service::{SpeechConfig, SpeechService};
use newslens_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
        .parse()
        .context("BIND_ADDR must be a socket address such as 0.0.0.0:5000")?;

    let state = AppState {
        pipeline: Arc::new(ReportPipeline::from_config(&PipelineConfig::from_env())),
        news_service: Arc::new(NewsService::new(NewsConfig::from_env())),
        speech_service: Arc::new(SpeechService::new(SpeechConfig::from_env())),
    };
    let app = app::create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 NewsLens backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

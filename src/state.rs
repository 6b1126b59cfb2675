use std::sync::Arc;

use crate::services::news_service::NewsService;
use crate::services::report_service::ReportPipeline;
use crate::services::speech_service::SpeechService;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReportPipeline>,
    pub news_service: Arc<NewsService>,
    pub speech_service: Arc<SpeechService>,
}

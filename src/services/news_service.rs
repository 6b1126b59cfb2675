use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::errors::NewsProviderError;
use crate::models::RawArticle;
use crate::services::failure_cache::{FailureType, FetchFailureCache};

/// Configuration for news service
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub enabled: bool,
    pub provider: String,
    pub api_key: Option<String>,
    pub max_articles: usize,
    pub timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: "serper".to_string(),
            api_key: None,
            max_articles: 10,
            timeout_secs: 10,
        }
    }
}

impl NewsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            enabled: std::env::var("NEWS_ENABLED")
                .ok()
                .and_then(|s| s.parse::<bool>().ok())
                .unwrap_or(defaults.enabled),
            provider: std::env::var("NEWS_PROVIDER").unwrap_or(defaults.provider),
            api_key: std::env::var("NEWS_API_KEY").ok(),
            max_articles: std::env::var("NEWS_MAX_ARTICLES")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(defaults.max_articles),
            timeout_secs: std::env::var("NEWS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

/// Trait for news providers
#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn fetch_articles(
        &self,
        company: &str,
        max_results: usize,
    ) -> Result<Vec<RawArticle>, NewsProviderError>;
}

/// Serper API provider (uses Google's news search)
pub struct SerperProvider {
    api_key: String,
    client: Client,
}

impl SerperProvider {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout ({}), using defaults", e);
                Client::new()
            });

        Self { api_key, client }
    }
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    news: Option<Vec<SerperNewsItem>>,
}

#[derive(Debug, Deserialize)]
struct SerperNewsItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: String,
}

/// Keeps the first occurrence of each link; items without a link are kept as-is
fn unique_articles(items: Vec<SerperNewsItem>, max_results: usize) -> Vec<RawArticle> {
    let mut seen_links = HashSet::new();
    items
        .into_iter()
        .filter(|item| match &item.link {
            Some(link) if !link.trim().is_empty() => seen_links.insert(link.trim().to_string()),
            _ => true,
        })
        .take(max_results)
        .map(RawArticle::from)
        .collect()
}

impl From<SerperNewsItem> for RawArticle {
    fn from(item: SerperNewsItem) -> Self {
        RawArticle::new(item.title, item.snippet.clone(), item.snippet)
    }
}

#[async_trait]
impl NewsProvider for SerperProvider {
    async fn fetch_articles(
        &self,
        company: &str,
        max_results: usize,
    ) -> Result<Vec<RawArticle>, NewsProviderError> {
        info!("Fetching news from Serper for company: {}", company);

        let request_body = serde_json::json!({
            "q": format!("{} news", company),
            "num": max_results.min(100), // Serper max is 100
        });

        let response = self
            .client
            .post("https://google.serper.dev/news")
            .header("X-API-KEY", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| NewsProviderError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(NewsProviderError::RateLimited);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NewsProviderError::BadResponse(format!(
                "{}: {}",
                status, error_text
            )));
        }

        let serper_response: SerperResponse = response
            .json()
            .await
            .map_err(|e| NewsProviderError::Parse(e.to_string()))?;

        let articles = unique_articles(serper_response.news.unwrap_or_default(), max_results);

        info!("Fetched {} news articles from Serper", articles.len());
        Ok(articles)
    }
}

/// Fetches company coverage, turning every failure into "no articles"
pub struct NewsService {
    config: NewsConfig,
    provider: Option<Arc<dyn NewsProvider>>,
    failures: FetchFailureCache,
}

impl NewsService {
    pub fn new(config: NewsConfig) -> Self {
        let provider: Option<Arc<dyn NewsProvider>> = if config.enabled {
            if let Some(api_key) = &config.api_key {
                match config.provider.as_str() {
                    "serper" => {
                        info!("Initializing Serper news provider");
                        Some(Arc::new(SerperProvider::new(
                            api_key.clone(),
                            Duration::from_secs(config.timeout_secs),
                        )))
                    }
                    _ => {
                        warn!("Unknown news provider: {}", config.provider);
                        None
                    }
                }
            } else {
                warn!("News enabled but no API key provided");
                None
            }
        } else {
            info!("News service disabled, sample articles will be used");
            None
        };

        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: NewsConfig, provider: Option<Arc<dyn NewsProvider>>) -> Self {
        Self {
            config,
            provider,
            failures: FetchFailureCache::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled && self.provider.is_some()
    }

    /// Fetch up to `max_articles` articles. Never fails: a disabled service,
    /// a recent failure, a provider error or a timeout all yield an empty list.
    pub async fn fetch_company_news(&self, company: &str) -> Vec<RawArticle> {
        let provider = match &self.provider {
            Some(provider) if self.config.enabled => provider,
            _ => return Vec::new(),
        };

        if let Some(failure) = self.failures.is_failed(company) {
            info!(
                "Skipping news fetch for {} after recent {:?} failure",
                company, failure.error_type
            );
            return Vec::new();
        }

        let fetch = provider.fetch_articles(company, self.config.max_articles);
        match tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), fetch).await {
            Ok(Ok(articles)) => {
                self.failures.clear_failure(company);
                articles
            }
            Ok(Err(e)) => {
                error!("Failed to fetch news for {}: {}", company, e);
                self.failures.record_failure(company, FailureType::from(&e));
                Vec::new()
            }
            Err(_) => {
                error!(
                    "News fetch for {} timed out after {}s",
                    company, self.config.timeout_secs
                );
                self.failures.record_failure(company, FailureType::Network);
                Vec::new()
            }
        }
    }
}

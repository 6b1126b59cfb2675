use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::AnalysisError;
use crate::models::{
    AnalysisReport, Article, ArticleInput, ComparativeReport, Sentiment, SentimentDistribution,
};
use crate::services::comparator::{
    topic_overlap, ContrastDifferences, DifferenceGenerator, FixedDifferences, UniqueTopicsPolicy,
};
use crate::services::sample_articles::{SampleArticleProvider, StaticSampleProvider};
use crate::services::sentiment_classifier::{LexiconClassifier, SentimentClassifier};
use crate::services::topic_extractor::{FrequencyTopicExtractor, TopicExtractor, MAX_TOPICS};

/// Fewer candidates than this and the sample set is used instead
pub const MIN_ARTICLES: usize = 2;

/// Which coverage-difference generator the pipeline uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifferencePolicy {
    #[default]
    Fixed,
    Contrast,
}

impl FromStr for DifferencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(DifferencePolicy::Fixed),
            "contrast" => Ok(DifferencePolicy::Contrast),
            other => Err(format!("unknown difference policy: {}", other)),
        }
    }
}

impl DifferencePolicy {
    pub fn generator(&self) -> Arc<dyn DifferenceGenerator> {
        match self {
            DifferencePolicy::Fixed => Arc::new(FixedDifferences),
            DifferencePolicy::Contrast => Arc::new(ContrastDifferences),
        }
    }
}

/// Configuration for the report pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub demo_companies: Vec<String>,
    pub sample_articles_enabled: bool,
    pub difference_policy: DifferencePolicy,
    pub unique_topics_policy: UniqueTopicsPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            demo_companies: vec!["tesla".to_string()],
            sample_articles_enabled: true,
            difference_policy: DifferencePolicy::default(),
            unique_topics_policy: UniqueTopicsPolicy::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            demo_companies: std::env::var("DEMO_COMPANIES")
                .map(|s| s.split(',').map(|c| c.trim().to_string()).collect())
                .unwrap_or(defaults.demo_companies),
            sample_articles_enabled: std::env::var("SAMPLE_ARTICLES_ENABLED")
                .ok()
                .and_then(|s| s.parse::<bool>().ok())
                .unwrap_or(defaults.sample_articles_enabled),
            difference_policy: parse_setting("DIFFERENCE_POLICY", defaults.difference_policy),
            unique_topics_policy: parse_setting("UNIQUE_TOPICS_POLICY", defaults.unique_topics_policy),
        }
    }
}

fn parse_setting<T: FromStr<Err = String>>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            warn!("{} ({}), using default", e, key);
            default
        }),
        Err(_) => default,
    }
}

/// Candidates after the fallback decision
#[derive(Debug, Clone)]
pub struct Normalized {
    pub articles: Vec<ArticleInput>,
    pub used_fallback: bool,
}

/// Turns candidate articles into a comparative report.
///
/// Every collaborator is injected; nothing here holds state across calls.
#[derive(Clone)]
pub struct ReportPipeline {
    classifier: Arc<dyn SentimentClassifier>,
    extractor: Arc<dyn TopicExtractor>,
    samples: Arc<dyn SampleArticleProvider>,
    differences: Arc<dyn DifferenceGenerator>,
    unique_topics_policy: UniqueTopicsPolicy,
}

impl ReportPipeline {
    pub fn new(
        classifier: Arc<dyn SentimentClassifier>,
        extractor: Arc<dyn TopicExtractor>,
        samples: Arc<dyn SampleArticleProvider>,
        differences: Arc<dyn DifferenceGenerator>,
        unique_topics_policy: UniqueTopicsPolicy,
    ) -> Self {
        Self {
            classifier,
            extractor,
            samples,
            differences,
            unique_topics_policy,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        let samples = if config.sample_articles_enabled {
            StaticSampleProvider::new(config.demo_companies.clone())
        } else {
            info!("Demo company override disabled");
            StaticSampleProvider::without_demo_companies()
        };

        info!(
            "Report pipeline: differences={:?}, unique topics={:?}",
            config.difference_policy, config.unique_topics_policy
        );

        Self::new(
            Arc::new(LexiconClassifier::new()),
            Arc::new(FrequencyTopicExtractor::new()),
            Arc::new(samples),
            config.difference_policy.generator(),
            config.unique_topics_policy,
        )
    }

    /// Keep the candidates, or swap in the full sample set.
    ///
    /// Entirely blank candidates are discarded before counting. Blank titles and
    /// summaries on the survivors get placeholders.
    pub fn normalize(&self, company: &str, candidates: Vec<ArticleInput>) -> Normalized {
        let usable: Vec<ArticleInput> = candidates
            .into_iter()
            .filter(|a| {
                !(a.title.trim().is_empty() && a.summary.trim().is_empty() && a.content.trim().is_empty())
            })
            .collect();

        if usable.len() < MIN_ARTICLES || self.samples.is_demo_company(company) {
            if usable.len() < MIN_ARTICLES {
                warn!(
                    "Only {} usable articles for {}, substituting sample articles",
                    usable.len(),
                    company
                );
            } else {
                info!("{} is a demo company, substituting sample articles", company);
            }

            return Normalized {
                articles: self
                    .samples
                    .sample_articles(company)
                    .into_iter()
                    .map(|raw| ArticleInput::from(raw.with_placeholders()))
                    .collect(),
                used_fallback: true,
            };
        }

        Normalized {
            articles: usable
                .into_iter()
                .map(|input| {
                    let raw = input.raw().with_placeholders();
                    ArticleInput {
                        title: raw.title,
                        summary: raw.summary,
                        ..input
                    }
                })
                .collect(),
            used_fallback: false,
        }
    }

    /// Attach sentiment and topics, keeping any the caller already assigned
    pub fn score(&self, inputs: Vec<ArticleInput>) -> Result<Vec<Article>, AnalysisError> {
        inputs
            .into_iter()
            .enumerate()
            .map(|(i, input)| {
                let sentiment = match input.parsed_sentiment(i + 1)? {
                    Some(sentiment) => sentiment,
                    None => self.classifier.classify(&input.content),
                };

                let topics = match input.topics {
                    Some(topics) => supplied_topics(topics),
                    None => self.extractor.extract(&input.content),
                };

                debug!(
                    "Article {} '{}': {} {:?}",
                    i + 1,
                    input.title,
                    sentiment,
                    topics
                );

                Ok(Article {
                    title: input.title,
                    summary: input.summary,
                    content: input.content,
                    sentiment,
                    topics,
                })
            })
            .collect()
    }

    /// Normalize, score, aggregate, compare and pick the verdict
    pub fn build_report(
        &self,
        company: &str,
        candidates: Vec<ArticleInput>,
    ) -> Result<AnalysisReport, AnalysisError> {
        info!(
            "Building report for {} from {} candidate articles",
            company,
            candidates.len()
        );

        let normalized = self.normalize(company, candidates);
        let articles = self.score(normalized.articles)?;
        let comparative = self.compare(&articles);
        let narrative = render_narrative(company, comparative.final_sentiment);

        info!(
            "Report for {} complete: {} articles, distribution {:?}, verdict {}",
            company,
            articles.len(),
            comparative.sentiment_distribution,
            comparative.final_sentiment
        );

        Ok(AnalysisReport {
            company: company.to_string(),
            articles,
            comparative,
            narrative,
            used_fallback: normalized.used_fallback,
        })
    }

    /// Aggregate already-scored articles
    pub fn compare(&self, articles: &[Article]) -> ComparativeReport {
        let sentiment_distribution = sentiment_distribution(articles);

        ComparativeReport {
            sentiment_distribution,
            coverage_differences: self.differences.differences(articles),
            topic_overlap: topic_overlap(articles, self.unique_topics_policy),
            final_sentiment: select_verdict(&sentiment_distribution),
        }
    }
}

/// Count articles per sentiment category
/// Trimmed, deduplicated in first-seen order, at most `MAX_TOPICS`
fn supplied_topics(topics: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    topics
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .take(MAX_TOPICS)
        .collect()
}

pub fn sentiment_distribution(articles: &[Article]) -> SentimentDistribution {
    let mut distribution = SentimentDistribution::default();
    for article in articles {
        distribution.increment(article.sentiment);
    }
    distribution
}

/// Category with the highest count. Ties resolve Positive, then Negative, then Neutral.
pub fn select_verdict(distribution: &SentimentDistribution) -> Sentiment {
    let mut best = Sentiment::ALL[0];
    for sentiment in Sentiment::ALL.into_iter().skip(1) {
        if distribution.count(sentiment) > distribution.count(best) {
            best = sentiment;
        }
    }
    best
}

pub fn render_narrative(company: &str, sentiment: Sentiment) -> String {
    format!("{} news coverage is mostly {}.", company, sentiment)
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::article::{Article, ArticleInput, Sentiment};

/// Article count per sentiment category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn increment(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// A contrast between two articles' framing and its likely consequence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverageDifference {
    pub comparison: String,
    pub impact: String,
}

impl CoverageDifference {
    pub fn new(comparison: impl Into<String>, impact: impl Into<String>) -> Self {
        Self {
            comparison: comparison.into(),
            impact: impact.into(),
        }
    }
}

/// Topics shared by every article, and topics keyed by 1-based article position
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicOverlap {
    pub common_topics: BTreeSet<String>,
    pub unique_topics: BTreeMap<usize, Vec<String>>,
}

/// Aggregated comparison across all articles of one request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparativeReport {
    pub sentiment_distribution: SentimentDistribution,
    pub coverage_differences: Vec<CoverageDifference>,
    pub topic_overlap: TopicOverlap,
    pub final_sentiment: Sentiment,
}

/// Everything one pipeline run produces
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub company: String,
    pub articles: Vec<Article>,
    pub comparative: ComparativeReport,
    pub narrative: String,
    pub used_fallback: bool,
}

/// Request body for POST /api/analyze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub company: Option<String>,
}

/// Request body for POST /api/reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub articles: Vec<ArticleInput>,
}

/// Response body for POST /api/analyze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub company: String,
    pub articles: Vec<Article>,
    pub comparative_sentiment_score: ComparativeSentimentScore,
    pub final_sentiment: Sentiment,
    pub final_sentiment_analysis: String,
    pub translated_summary: String,
    /// `data:audio/mp3;base64,...` URI, absent when synthesis is disabled or failed
    pub audio: Option<String>,
    pub used_fallback: bool,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparativeSentimentScore {
    pub sentiment_distribution: SentimentDistribution,
    pub coverage_differences: Vec<CoverageDifference>,
    pub topic_overlap: TopicOverlap,
}

impl From<&ComparativeReport> for ComparativeSentimentScore {
    fn from(report: &ComparativeReport) -> Self {
        Self {
            sentiment_distribution: report.sentiment_distribution,
            coverage_differences: report.coverage_differences.clone(),
            topic_overlap: report.topic_overlap.clone(),
        }
    }
}

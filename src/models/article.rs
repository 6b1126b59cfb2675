use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::AnalysisError;

pub const PLACEHOLDER_TITLE: &str = "No Title";
pub const PLACEHOLDER_SUMMARY: &str = "No summary available.";

/// Sentiment classification for a single article
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Declaration order doubles as the verdict tie-break priority.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(s.to_string()),
        }
    }
}

/// Article as delivered by a news provider, before scoring
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawArticle {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub content: String,
}

impl RawArticle {
    pub fn new(title: impl Into<String>, summary: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            content: content.into(),
        }
    }

    /// Substitute placeholders for a blank title or summary. Content may stay empty.
    pub fn with_placeholders(mut self) -> Self {
        if self.title.trim().is_empty() {
            self.title = PLACEHOLDER_TITLE.to_string();
        }
        if self.summary.trim().is_empty() {
            self.summary = PLACEHOLDER_SUMMARY.to_string();
        }
        self
    }
}

/// Candidate article entering the pipeline.
///
/// Sentiment and topics are optional: when absent the pipeline's classifier and
/// extractor fill them in, when present they are taken as already scored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArticleInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
}

impl ArticleInput {
    pub fn raw(&self) -> RawArticle {
        RawArticle::new(self.title.clone(), self.summary.clone(), self.content.clone())
    }

    /// Parse the pre-assigned label, if any. Unknown labels are rejected, never coerced.
    pub fn parsed_sentiment(&self, position: usize) -> Result<Option<Sentiment>, AnalysisError> {
        match &self.sentiment {
            None => Ok(None),
            Some(label) => label
                .parse::<Sentiment>()
                .map(Some)
                .map_err(|label| AnalysisError::InvalidSentimentLabel { position, label }),
        }
    }
}

impl From<RawArticle> for ArticleInput {
    fn from(raw: RawArticle) -> Self {
        Self {
            title: raw.title,
            summary: raw.summary,
            content: raw.content,
            sentiment: None,
            topics: None,
        }
    }
}

/// A normalized, scored unit of coverage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub sentiment: Sentiment,
    pub topics: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_parse_is_case_insensitive() {
        assert_eq!("Positive".parse::<Sentiment>(), Ok(Sentiment::Positive));
        assert_eq!(" negative ".parse::<Sentiment>(), Ok(Sentiment::Negative));
        assert_eq!("NEUTRAL".parse::<Sentiment>(), Ok(Sentiment::Neutral));
        assert_eq!("Mixed".parse::<Sentiment>(), Err("Mixed".to_string()));
    }

    #[test]
    fn test_sentiment_display_keeps_label_casing() {
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
        assert_eq!(Sentiment::Negative.to_string(), "Negative");
        assert_eq!(Sentiment::Neutral.to_string(), "Neutral");
    }

    #[test]
    fn test_placeholders_fill_blank_fields_only() {
        let raw = RawArticle::new("  ", "", "").with_placeholders();
        assert_eq!(raw.title, PLACEHOLDER_TITLE);
        assert_eq!(raw.summary, PLACEHOLDER_SUMMARY);
        assert_eq!(raw.content, "");

        let raw = RawArticle::new("Headline", "Blurb", "Body").with_placeholders();
        assert_eq!(raw.title, "Headline");
        assert_eq!(raw.summary, "Blurb");
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let input = ArticleInput {
            sentiment: Some("Bullish".to_string()),
            ..Default::default()
        };
        match input.parsed_sentiment(3) {
            Err(AnalysisError::InvalidSentimentLabel { position, label }) => {
                assert_eq!(position, 3);
                assert_eq!(label, "Bullish");
            }
            other => panic!("expected InvalidSentimentLabel, got {:?}", other),
        }
    }
}

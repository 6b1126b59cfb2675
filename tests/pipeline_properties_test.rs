/// Report pipeline properties
///
/// Exercises the public pipeline API end to end:
/// - fallback substitution boundaries
/// - distribution totals
/// - common-topic edge cases
/// - verdict determinism and narrative text

use std::sync::Arc;

use newslens_backend::models::{Article, ArticleInput, RawArticle, Sentiment, SentimentDistribution};
use newslens_backend::services::comparator::{topic_overlap, FixedDifferences, UniqueTopicsPolicy};
use newslens_backend::services::report_service::{
    render_narrative, select_verdict, sentiment_distribution, PipelineConfig, ReportPipeline,
};
use newslens_backend::services::sample_articles::{SampleArticleProvider, StaticSampleProvider};
use newslens_backend::services::sentiment_classifier::SentimentClassifier;
use newslens_backend::services::topic_extractor::TopicExtractor;

struct KeywordClassifier;

impl SentimentClassifier for KeywordClassifier {
    fn classify(&self, content: &str) -> Sentiment {
        if content.contains("up") {
            Sentiment::Positive
        } else if content.contains("down") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

struct FirstWordTopic;

impl TopicExtractor for FirstWordTopic {
    fn extract(&self, content: &str) -> Vec<String> {
        content.split_whitespace().take(1).map(String::from).collect()
    }
}

fn stub_pipeline() -> ReportPipeline {
    ReportPipeline::new(
        Arc::new(KeywordClassifier),
        Arc::new(FirstWordTopic),
        Arc::new(StaticSampleProvider::without_demo_companies()),
        Arc::new(FixedDifferences),
        UniqueTopicsPolicy::Reference,
    )
}

fn candidates(n: usize) -> Vec<ArticleInput> {
    (0..n)
        .map(|i| {
            let mood = ["up", "down", "flat"][i % 3];
            ArticleInput::from(RawArticle::new(
                format!("Title {}", i),
                format!("Summary {}", i),
                format!("Shares {} today", mood),
            ))
        })
        .collect()
}

fn article(sentiment: Sentiment, topics: &[&str]) -> Article {
    Article {
        title: "T".to_string(),
        summary: "S".to_string(),
        content: String::new(),
        sentiment,
        topics: topics.iter().map(|t| t.to_string()).collect(),
    }
}

#[test]
fn test_distribution_total_matches_article_count() {
    let pipeline = stub_pipeline();
    for n in 2..12 {
        let report = pipeline.build_report("Acme", candidates(n)).unwrap();
        assert_eq!(report.articles.len(), n);
        assert_eq!(report.comparative.sentiment_distribution.total(), n);
        assert_eq!(sentiment_distribution(&report.articles).total(), n);
    }
}

#[test]
fn test_fallback_boundary() {
    let pipeline = stub_pipeline();
    let samples: Vec<ArticleInput> = StaticSampleProvider::without_demo_companies()
        .sample_articles("x")
        .into_iter()
        .map(ArticleInput::from)
        .collect();

    for company in ["Acme", "Globex", "", "Tesla"] {
        for n in 0..2 {
            let normalized = pipeline.normalize(company, candidates(n));
            assert!(normalized.used_fallback);
            assert_eq!(normalized.articles, samples);
        }
    }

    let kept = pipeline.normalize("Acme", candidates(2));
    assert!(!kept.used_fallback);
    assert_eq!(kept.articles, candidates(2));
}

#[test]
fn test_common_topics_edge_cases() {
    let with_empty = vec![
        article(Sentiment::Positive, &["Sales"]),
        article(Sentiment::Negative, &[]),
        article(Sentiment::Neutral, &["Sales"]),
    ];
    assert!(topic_overlap(&with_empty, UniqueTopicsPolicy::Difference).common_topics.is_empty());
    assert!(topic_overlap(&with_empty, UniqueTopicsPolicy::Reference).common_topics.is_empty());

    let overlap = topic_overlap(&[], UniqueTopicsPolicy::Reference);
    assert!(overlap.common_topics.is_empty());
    assert!(overlap.unique_topics.is_empty());
}

#[test]
fn test_duplicate_topics_are_tolerated() {
    let articles = vec![
        article(Sentiment::Positive, &["Sales", "Sales"]),
        article(Sentiment::Negative, &["Sales", "Recall", "Recall"]),
    ];
    let overlap = topic_overlap(&articles, UniqueTopicsPolicy::Difference);
    assert_eq!(overlap.common_topics.len(), 1);
    assert!(overlap.unique_topics[&1].is_empty());
    assert_eq!(overlap.unique_topics[&2], vec!["Recall".to_string()]);
}

#[test]
fn test_verdict_is_maximal_and_deterministic() {
    for positive in 0..4usize {
        for negative in 0..4 {
            for neutral in 0..4 {
                let distribution = SentimentDistribution { positive, negative, neutral };
                let verdict = select_verdict(&distribution);
                let max = positive.max(negative).max(neutral);
                assert_eq!(distribution.count(verdict), max);
                assert_eq!(select_verdict(&distribution), verdict);
            }
        }
    }
}

#[test]
fn test_narrative_text() {
    let distribution = SentimentDistribution { positive: 2, negative: 0, neutral: 0 };
    let verdict = select_verdict(&distribution);
    assert_eq!(verdict, Sentiment::Positive);
    assert_eq!(render_narrative("Tesla", verdict), "Tesla news coverage is mostly Positive.");
}

#[test]
fn test_end_to_end_without_articles() {
    let pipeline = ReportPipeline::from_config(&PipelineConfig::default());
    let report = pipeline.build_report("Acme", Vec::new()).unwrap();

    assert!(report.used_fallback);
    assert_eq!(report.articles.len(), 2);
    assert_eq!(report.comparative.sentiment_distribution.total(), 2);
    assert_eq!(report.comparative.coverage_differences.len(), 2);
    assert!(report.narrative.contains("Acme"));
}

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::str::FromStr;

use crate::models::{Article, CoverageDifference, TopicOverlap};

/// Produces the ordered coverage-difference statements for a set of articles
pub trait DifferenceGenerator: Send + Sync {
    fn differences(&self, articles: &[Article]) -> Vec<CoverageDifference>;
}

/// Two pre-authored statements, emitted whenever at least two articles are present.
/// The text does not depend on article content.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDifferences;

impl DifferenceGenerator for FixedDifferences {
    fn differences(&self, articles: &[Article]) -> Vec<CoverageDifference> {
        if articles.len() < 2 {
            return Vec::new();
        }

        vec![
            CoverageDifference::new(
                "Article 1 highlights Tesla's strong sales, while Article 2 discusses regulatory issues.",
                "The first article boosts confidence in Tesla's market growth, while the second raises concerns about future regulatory hurdles.",
            ),
            CoverageDifference::new(
                "Article 1 is focused on financial success and innovation, whereas Article 2 is about legal challenges and risks.",
                "Investors may react positively to growth news but remain cautious due to regulatory scrutiny.",
            ),
        ]
    }
}

/// Content-driven statements contrasting the first two articles' sentiment and topic focus
#[derive(Debug, Clone, Copy, Default)]
pub struct ContrastDifferences;

impl DifferenceGenerator for ContrastDifferences {
    fn differences(&self, articles: &[Article]) -> Vec<CoverageDifference> {
        let (first, second) = match articles {
            [first, second, ..] => (first, second),
            _ => return Vec::new(),
        };

        let tone = CoverageDifference::new(
            format!(
                "Article 1 ({}) reports \"{}\", while Article 2 ({}) reports \"{}\".",
                first.sentiment, first.title, second.sentiment, second.title
            ),
            if first.sentiment == second.sentiment {
                format!(
                    "Both articles reinforce a {} reading of the coverage.",
                    first.sentiment
                )
            } else {
                format!(
                    "Readers get mixed signals: Article 1 leans {} while Article 2 leans {}.",
                    first.sentiment, second.sentiment
                )
            },
        );

        let shared: Vec<&String> = first
            .topics
            .iter()
            .filter(|t| second.topics.contains(t))
            .collect();

        let focus = CoverageDifference::new(
            format!(
                "Article 1 focuses on {}, whereas Article 2 focuses on {}.",
                describe_topics(&first.topics),
                describe_topics(&second.topics)
            ),
            if shared.is_empty() {
                "The articles cover distinct subjects, broadening the picture of the company.".to_string()
            } else {
                format!(
                    "Both articles cover {}, so the contrast lies in framing rather than subject.",
                    shared.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
                )
            },
        );

        vec![tone, focus]
    }
}

fn describe_topics(topics: &[String]) -> String {
    if topics.is_empty() {
        "no clear topics".to_string()
    } else {
        topics.join(", ")
    }
}

/// How per-article unique topics are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniqueTopicsPolicy {
    /// Every position maps to its topics that appear in no other article
    #[default]
    Difference,
    /// Positions 1 and 2 map to their raw topic lists
    Reference,
}

impl FromStr for UniqueTopicsPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "difference" => Ok(UniqueTopicsPolicy::Difference),
            "reference" => Ok(UniqueTopicsPolicy::Reference),
            other => Err(format!("unknown unique topics policy: {}", other)),
        }
    }
}

/// Common topics across every article, plus the per-position unique topics.
/// An empty article set yields empty structures.
pub fn topic_overlap(articles: &[Article], policy: UniqueTopicsPolicy) -> TopicOverlap {
    if articles.is_empty() {
        return TopicOverlap::default();
    }

    let topic_sets: Vec<HashSet<&String>> = articles
        .iter()
        .map(|a| a.topics.iter().collect())
        .collect();

    let common_topics: BTreeSet<String> = topic_sets[0]
        .iter()
        .filter(|topic| topic_sets[1..].iter().all(|set| set.contains(*topic)))
        .map(|topic| (*topic).clone())
        .collect();

    let unique_topics = match policy {
        UniqueTopicsPolicy::Reference => {
            let mut unique = BTreeMap::new();
            unique.insert(1, articles[0].topics.clone());
            unique.insert(
                2,
                articles.get(1).map(|a| a.topics.clone()).unwrap_or_default(),
            );
            unique
        }
        UniqueTopicsPolicy::Difference => articles
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let mut seen = HashSet::new();
                let unique: Vec<String> = article
                    .topics
                    .iter()
                    .filter(|topic| seen.insert(*topic))
                    .filter(|topic| {
                        topic_sets
                            .iter()
                            .enumerate()
                            .all(|(j, set)| j == i || !set.contains(topic))
                    })
                    .cloned()
                    .collect();
                (i + 1, unique)
            })
            .collect(),
    };

    TopicOverlap {
        common_topics,
        unique_topics,
    }
}

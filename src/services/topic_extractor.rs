use std::collections::HashMap;

use regex::Regex;

const STOP_WORDS: [&str; 12] = [
    "the", "and", "is", "in", "to", "of", "a", "for", "with", "on", "by", "an",
];

/// Words of this many characters or fewer are never topics
const MIN_TOPIC_CHARS: usize = 4;

pub const MAX_TOPICS: usize = 3;

/// Pulls a short list of keywords out of an article body
pub trait TopicExtractor: Send + Sync {
    fn extract(&self, content: &str) -> Vec<String>;
}

/// Most-frequent-word extractor
///
/// Ranks the remaining words by frequency; equal counts keep first-occurrence order.
pub struct FrequencyTopicExtractor {
    word_pattern: Regex,
    max_topics: usize,
}

impl Default for FrequencyTopicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTopicExtractor {
    pub fn new() -> Self {
        Self {
            word_pattern: Regex::new(r"\b\w+\b").expect("static word pattern"),
            max_topics: MAX_TOPICS,
        }
    }
}

impl TopicExtractor for FrequencyTopicExtractor {
    fn extract(&self, content: &str) -> Vec<String> {
        let lowered = content.to_lowercase();

        // (word, count), kept in first-occurrence order
        let mut ranked: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for word in self.word_pattern.find_iter(&lowered).map(|m| m.as_str()) {
            if STOP_WORDS.contains(&word) || word.chars().count() <= MIN_TOPIC_CHARS {
                continue;
            }
            match index.get(word) {
                Some(&i) => ranked[i].1 += 1,
                None => {
                    index.insert(word, ranked.len());
                    ranked.push((word, 1));
                }
            }
        }

        // stable sort keeps first occurrence ahead on ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
            .into_iter()
            .take(self.max_topics)
            .map(|(word, _)| capitalize(word))
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

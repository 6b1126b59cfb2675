use std::collections::HashMap;

use regex::Regex;

use crate::models::Sentiment;

/// Compound score at or above which text is Positive (and at or below the negation, Negative)
const COMPOUND_THRESHOLD: f64 = 0.05;

/// Normalization constant for mapping a raw lexicon sum into (-1, 1)
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Assigns a sentiment label to an article body
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, content: &str) -> Sentiment;
}

/// Rule-based classifier over a small news lexicon
///
/// Scores each matched word, flips the sign after a negation, scales after an
/// intensifier, then squashes the sum into a compound score in (-1, 1).
pub struct LexiconClassifier {
    words: HashMap<&'static str, f64>,
    negations: Vec<&'static str>,
    intensifiers: HashMap<&'static str, f64>,
    tokenizer: Regex,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    pub fn new() -> Self {
        let positive_words = [
            ("record", 1.5),
            ("records", 1.5),
            ("innovative", 1.9),
            ("innovation", 1.6),
            ("efficiency", 1.5),
            ("efficient", 1.5),
            ("growth", 1.6),
            ("gain", 1.4),
            ("gains", 1.4),
            ("profit", 1.6),
            ("profits", 1.6),
            ("surge", 1.7),
            ("strong", 1.7),
            ("success", 2.0),
            ("successful", 2.0),
            ("improve", 1.5),
            ("improved", 1.5),
            ("beat", 1.2),
            ("exceed", 1.3),
            ("boost", 1.5),
            ("win", 2.0),
            ("wins", 2.0),
            ("optimistic", 1.8),
            ("confident", 1.8),
            ("upgrade", 1.4),
            ("rally", 1.5),
            ("recovery", 1.3),
            ("good", 1.9),
            ("great", 3.1),
            ("positive", 2.3),
        ];

        let negative_words = [
            ("concern", -1.4),
            ("concerns", -1.4),
            ("challenge", -0.9),
            ("challenges", -0.9),
            ("scrutiny", -1.2),
            ("risk", -1.1),
            ("risks", -1.1),
            ("lawsuit", -1.8),
            ("recall", -1.3),
            ("loss", -1.6),
            ("losses", -1.6),
            ("decline", -1.5),
            ("drop", -1.2),
            ("fall", -1.3),
            ("crash", -2.5),
            ("weak", -1.6),
            ("fail", -2.0),
            ("failure", -2.3),
            ("fraud", -2.9),
            ("crisis", -3.0),
            ("warning", -1.4),
            ("downgrade", -1.4),
            ("layoffs", -1.7),
            ("fine", -0.8),
            ("probe", -1.0),
            ("problem", -1.7),
            ("problems", -1.7),
            ("bad", -2.5),
            ("negative", -2.7),
            ("uncertainty", -1.4),
        ];

        let words = positive_words
            .into_iter()
            .chain(negative_words)
            .collect::<HashMap<_, _>>();

        let negations = vec![
            "not", "no", "never", "none", "cannot", "cant", "dont", "doesnt", "didnt",
            "wont", "isnt", "arent", "wasnt", "hardly", "barely",
        ];

        let intensifiers = [
            ("very", 1.3),
            ("extremely", 1.5),
            ("highly", 1.3),
            ("significantly", 1.3),
            ("slightly", 0.7),
            ("somewhat", 0.8),
        ]
        .into_iter()
        .collect::<HashMap<_, _>>();

        Self {
            words,
            negations,
            intensifiers,
            tokenizer: Regex::new(r"[a-z]+").expect("static tokenizer pattern"),
        }
    }

    /// Compound score in (-1, 1); 0.0 for text without lexicon hits
    pub fn compound_score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase().replace('\'', "");
        let mut sum = 0.0;
        let mut negate_next = false;
        let mut intensifier = 1.0;

        for token in self.tokenizer.find_iter(&lowered).map(|m| m.as_str()) {
            if self.negations.contains(&token) {
                negate_next = true;
                continue;
            }

            if let Some(mult) = self.intensifiers.get(token) {
                intensifier = *mult;
                continue;
            }

            if let Some(score) = self.words.get(token) {
                let mut score = *score * intensifier;
                if negate_next {
                    score = -score;
                }
                sum += score;
                negate_next = false;
                intensifier = 1.0;
            }
        }

        if sum == 0.0 {
            return 0.0;
        }

        sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, content: &str) -> Sentiment {
        if content.trim().is_empty() {
            return Sentiment::Neutral;
        }

        let compound = self.compound_score(content);
        if compound >= COMPOUND_THRESHOLD {
            Sentiment::Positive
        } else if compound <= -COMPOUND_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_neutral() {
        let classifier = LexiconClassifier::new();
        assert_eq!(classifier.classify(""), Sentiment::Neutral);
        assert_eq!(classifier.classify("   \n"), Sentiment::Neutral);
    }

    #[test]
    fn test_classify_positive_and_negative() {
        let classifier = LexiconClassifier::new();
        assert_eq!(
            classifier.classify("The new model has broken sales records due to its innovative design and efficiency."),
            Sentiment::Positive
        );
        assert_eq!(
            classifier.classify("Regulators are examining the software amid safety concerns and potential legal challenges."),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_text_without_lexicon_hits_is_neutral() {
        let classifier = LexiconClassifier::new();
        assert_eq!(classifier.classify("The company held its annual meeting on Tuesday."), Sentiment::Neutral);
    }

    #[test]
    fn test_negation_flips_score() {
        let classifier = LexiconClassifier::new();
        assert!(classifier.compound_score("results were good") > 0.0);
        assert!(classifier.compound_score("results were not good") < 0.0);
        assert!(classifier.compound_score("this isn't a problem") > 0.0);
    }

    #[test]
    fn test_compound_is_bounded() {
        let classifier = LexiconClassifier::new();
        let text = "great ".repeat(200);
        let score = classifier.compound_score(&text);
        assert!(score > 0.9 && score < 1.0);
    }
}

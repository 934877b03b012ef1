// Lexicon-based polarity scorer — the default backend.
//
// Runs locally with no model files. Each lexicon hit contributes its
// weight to the positive or negative tally; a negation in the two words
// before a hit flips its polarity, an intensifier raises its weight. The
// score is the positive share of the total tally, so it lands in [0, 1]
// with 0.5 for balanced or signal-free text.
//
// Sentiment works on the raw text, not the topic tokens — stop-words like
// "not" are exactly what negation handling needs.

use std::collections::HashSet;

use super::traits::{ScoreError, SentimentScorer};

/// How far back a negation or intensifier reaches, in words.
const MODIFIER_WINDOW: usize = 2;
const INTENSIFIER_WEIGHT: f64 = 1.5;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "love", "loved", "amazing", "wonderful", "happy", "fantastic",
    "awesome", "best", "perfect", "nice", "helpful", "friendly", "fast", "recommend",
    "recommended", "satisfied", "pleased", "enjoy", "enjoyed", "impressive", "solid", "reliable",
    "smooth", "beautiful", "comfortable", "worth", "delicious", "fresh", "clean", "polite",
    "quick", "easy", "superb", "brilliant", "outstanding", "delightful", "charming", "thrilled",
    "glad", "favorite", "favourite", "works", "worked", "improved", "improvement", "painless",
    "responsive", "sturdy", "gorgeous", "tasty", "cozy", "affordable", "bargain", "generous",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "hate", "hated", "horrible", "worst", "sad", "angry",
    "disappointed", "disappointing", "poor", "broken", "slow", "rude", "dirty", "overpriced",
    "useless", "waste", "wasted", "refund", "scam", "fraud", "defective", "damaged", "late",
    "missing", "wrong", "annoying", "frustrating", "frustrated", "unusable", "crash", "crashes",
    "crashed", "buggy", "fail", "failed", "failure", "garbage", "trash", "mediocre", "misleading",
    "ignored", "unhelpful", "cancelled", "complaint", "regret", "problem", "problems", "issue",
    "issues", "noisy", "leaked", "stained", "cheap", "flimsy", "cold", "stale", "unresponsive",
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "none", "without", "hardly", "barely", "neither", "nor",
];

const INTENSIFIERS: &[&str] = &[
    "very", "really", "extremely", "absolutely", "totally", "super", "incredibly", "highly",
    "truly",
];

/// Local lexicon scorer.
pub struct LexiconScorer {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    negations: HashSet<&'static str>,
    intensifiers: HashSet<&'static str>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }

    /// Lowercased words, keeping apostrophes so contractions like "don't"
    /// survive as one token.
    fn words(text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
            .map(|w| w.trim_matches(|c| c == '\'' || c == '\u{2019}'))
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase().replace('\u{2019}', "'"))
            .collect()
    }
}

impl SentimentScorer for LexiconScorer {
    fn try_score(&self, text: &str) -> Result<f64, ScoreError> {
        let words = Self::words(text);
        if words.is_empty() {
            return Err(ScoreError::EmptyText);
        }

        let mut positive = 0.0f64;
        let mut negative = 0.0f64;

        for (i, word) in words.iter().enumerate() {
            let mut polarity = if self.positive.contains(word.as_str()) {
                1.0
            } else if self.negative.contains(word.as_str()) {
                -1.0
            } else {
                continue;
            };

            let window = &words[i.saturating_sub(MODIFIER_WINDOW)..i];
            let mut weight = 1.0;
            for modifier in window {
                if self.is_negation(modifier) {
                    polarity = -polarity;
                }
                if self.intensifiers.contains(modifier.as_str()) {
                    weight = INTENSIFIER_WEIGHT;
                }
            }

            if polarity > 0.0 {
                positive += weight;
            } else {
                negative += weight;
            }
        }

        let total = positive + negative;
        if total == 0.0 {
            // Words, but none the lexicon knows: balanced, not a failure
            return Ok(0.5);
        }
        Ok(positive / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::traits::{SentimentCategory, Thresholds};

    #[test]
    fn purely_positive_text_scores_one() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.try_score("good good good").unwrap(), 1.0);
    }

    #[test]
    fn purely_negative_text_scores_zero() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.try_score("bad bad bad").unwrap(), 0.0);
    }

    #[test]
    fn signal_free_text_is_neutral() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.try_score("neutral topic text").unwrap(), 0.5);
    }

    #[test]
    fn empty_text_is_a_typed_failure() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.try_score("").unwrap_err(), ScoreError::EmptyText);
        assert_eq!(scorer.try_score("!!! ...").unwrap_err(), ScoreError::EmptyText);
    }

    #[test]
    fn negation_flips_polarity() {
        let scorer = LexiconScorer::new();
        let plain = scorer.try_score("the product is good").unwrap();
        let negated = scorer.try_score("the product is not good").unwrap();
        assert!(plain > 0.5);
        assert!(negated < 0.5, "negated positive should read negative, got {negated}");
    }

    #[test]
    fn contraction_negation_is_recognized() {
        let scorer = LexiconScorer::new();
        let score = scorer.try_score("this doesn't work, wasn't helpful").unwrap();
        assert!(score < 0.5, "got {score}");
    }

    #[test]
    fn intensifier_shifts_a_mixed_score() {
        let scorer = LexiconScorer::new();
        let mixed = scorer.try_score("good but bad").unwrap();
        let intensified = scorer.try_score("really good but bad").unwrap();
        assert!(intensified > mixed, "{intensified} should exceed {mixed}");
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let scorer = LexiconScorer::new();
        for text in [
            "absolutely amazing wonderful perfect",
            "totally broken useless garbage refund",
            "good bad good bad good",
            "not not good",
        ] {
            let score = scorer.try_score(text).unwrap();
            assert!((0.0..=1.0).contains(&score), "{text} scored {score}");
        }
    }

    #[test]
    fn classify_maps_scores_through_thresholds() {
        let scorer = LexiconScorer::new();
        let thresholds = Thresholds::default();
        assert_eq!(
            scorer.classify("good good good", &thresholds).1,
            SentimentCategory::Positive
        );
        assert_eq!(
            scorer.classify("bad bad bad", &thresholds).1,
            SentimentCategory::Negative
        );
        assert_eq!(
            scorer.classify("neutral topic text", &thresholds).1,
            SentimentCategory::Neutral
        );
        assert_eq!(
            scorer.classify("", &thresholds).1,
            SentimentCategory::Unknown
        );
    }
}

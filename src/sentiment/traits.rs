// Sentiment scorer trait and the category/threshold types shared by the
// pipeline and the reports.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned by `classify` when scoring fails.
pub const NEUTRAL_MIDPOINT: f64 = 0.5;

/// Why a text could not be scored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("text contains no scorable tokens")]
    EmptyText,
}

/// Three-way polarity plus the degraded case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentCategory {
    Positive,
    Neutral,
    Negative,
    /// Scoring failed; the document carries the neutral midpoint score.
    Unknown,
}

impl SentimentCategory {
    /// Fixed iteration order for aggregates and exports — never depend on
    /// hash-map ordering for report rows.
    pub const ALL: [SentimentCategory; 4] = [
        SentimentCategory::Positive,
        SentimentCategory::Neutral,
        SentimentCategory::Negative,
        SentimentCategory::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "positive",
            SentimentCategory::Neutral => "neutral",
            SentimentCategory::Negative => "negative",
            SentimentCategory::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Score-to-category cut points.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Scores strictly above this are Positive.
    pub positive: f64,
    /// Scores strictly below this are Negative.
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: 0.7,
            negative: 0.3,
        }
    }
}

impl Thresholds {
    pub fn categorize(&self, score: f64) -> SentimentCategory {
        if score > self.positive {
            SentimentCategory::Positive
        } else if score < self.negative {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }
}

/// Polarity estimation for a single text.
pub trait SentimentScorer {
    /// Score `text` in [0, 1] (1 = most positive), or say why it cannot
    /// be scored.
    fn try_score(&self, text: &str) -> Result<f64, ScoreError>;

    /// Score and categorize, degrading failures to the neutral midpoint
    /// and Unknown. This never fails — callers always receive a value.
    fn classify(&self, text: &str, thresholds: &Thresholds) -> (f64, SentimentCategory) {
        match self.try_score(text) {
            Ok(score) => (score, thresholds.categorize(score)),
            Err(_) => (NEUTRAL_MIDPOINT, SentimentCategory::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundaries_are_exclusive() {
        let t = Thresholds::default();
        assert_eq!(t.categorize(0.7), SentimentCategory::Neutral);
        assert_eq!(t.categorize(0.71), SentimentCategory::Positive);
        assert_eq!(t.categorize(0.3), SentimentCategory::Neutral);
        assert_eq!(t.categorize(0.29), SentimentCategory::Negative);
    }

    #[test]
    fn classify_degrades_failures_to_unknown() {
        struct AlwaysFails;
        impl SentimentScorer for AlwaysFails {
            fn try_score(&self, _text: &str) -> Result<f64, ScoreError> {
                Err(ScoreError::EmptyText)
            }
        }
        let (score, category) = AlwaysFails.classify("anything", &Thresholds::default());
        assert_eq!(score, NEUTRAL_MIDPOINT);
        assert_eq!(category, SentimentCategory::Unknown);
    }
}

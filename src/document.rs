// The central data model: one record per retained input row, enriched by
// each pipeline stage in order. A document is created at ingestion with
// only `id` and `text` set; tokenization, sentiment scoring, and topic
// assignment fill in the rest. Nothing mutates a document after the
// reporting stage reads it.

use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentCategory;
use crate::text::vocabulary::TokenId;

/// A single comment moving through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable id: the document's position in the retained corpus (0-based).
    pub id: usize,
    /// Merged raw text from all resolved text columns.
    pub text: String,
    /// Tokens after stop-word and length filtering.
    pub tokens: Vec<String>,
    /// Sparse bag-of-words over the run's vocabulary, sorted by token id.
    pub bow: Vec<(TokenId, u32)>,
    /// Polarity in [0, 1]; 0.5 is the neutral midpoint.
    pub sentiment_score: f64,
    pub sentiment_category: SentimentCategory,
    /// Dominant topic in [0, K), or None when no topic could be assigned.
    /// Unassigned documents are kept in the per-document export but
    /// excluded from every topic-keyed aggregate.
    pub topic: Option<usize>,
}

impl Document {
    /// A freshly ingested document, before any enrichment.
    pub fn new(id: usize, text: String) -> Self {
        Self {
            id,
            text,
            tokens: Vec::new(),
            bow: Vec::new(),
            sentiment_score: 0.5,
            sentiment_category: SentimentCategory::Unknown,
            topic: None,
        }
    }

    /// Label used for the topic column in exports ("unassigned" sentinel).
    pub fn topic_label(&self) -> String {
        match self.topic {
            Some(t) => t.to_string(),
            None => "unassigned".to_string(),
        }
    }
}

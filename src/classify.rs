// Dominant-topic assignment.
//
// Classification goes back through the same path as training input:
// retokenize the raw text, encode it against the run's vocabulary, and
// infer a distribution from the fitted model. A document whose encoding is
// empty (all tokens filtered or out-of-vocabulary) gets no topic and is
// excluded from topic-keyed aggregates downstream.

use crate::text::{Tokenizer, Vocabulary};
use crate::topics::TopicModel;

/// Index of the highest-probability topic; ties resolve to the first index
/// achieving the maximum, so assignment is deterministic.
pub fn dominant_topic(distribution: &[f64]) -> usize {
    let mut best = 0;
    for (t, &p) in distribution.iter().enumerate() {
        if p > distribution[best] {
            best = t;
        }
    }
    best
}

/// Assign `text` its dominant topic, or None when no topic is inferable.
pub fn assign_topic(
    text: &str,
    tokenizer: &Tokenizer,
    vocab: &Vocabulary,
    model: &TopicModel,
) -> Option<usize> {
    let tokens = tokenizer.tokenize(text);
    let bow = vocab.encode_bow(&tokens);
    model.infer(&bow).map(|dist| dominant_topic(&dist))
}

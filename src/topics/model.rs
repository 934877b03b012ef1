// The fitted topic model.
//
// Immutable after training: K topic-word distributions (φ) and one topic
// distribution per training document (θ). New text is folded in against
// the fixed φ — the model itself is never updated.

use serde::{Deserialize, Serialize};

use crate::text::vocabulary::TokenId;
use crate::text::Vocabulary;

/// Fixed-point inference rounds for new documents.
const INFER_ROUNDS: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicModel {
    /// φ[t][w] — rows are valid probability vectors over the vocabulary.
    phi: Vec<Vec<f64>>,
    /// θ[d][t] — one probability vector per training document.
    theta: Vec<Vec<f64>>,
    alpha: f64,
}

impl TopicModel {
    pub fn new(phi: Vec<Vec<f64>>, theta: Vec<Vec<f64>>, alpha: f64) -> Self {
        Self { phi, theta, alpha }
    }

    pub fn num_topics(&self) -> usize {
        self.phi.len()
    }

    pub fn vocab_size(&self) -> usize {
        self.phi.first().map_or(0, Vec::len)
    }

    pub fn num_docs(&self) -> usize {
        self.theta.len()
    }

    /// Word distribution of one topic.
    pub fn word_distribution(&self, topic: usize) -> &[f64] {
        &self.phi[topic]
    }

    /// Topic distribution of one training document.
    pub fn doc_distribution(&self, doc: usize) -> &[f64] {
        &self.theta[doc]
    }

    pub fn doc_distributions(&self) -> &[Vec<f64>] {
        &self.theta
    }

    /// Top `n` (term, probability) pairs per topic, highest first.
    /// Ties break on the lower token id so the ordering is stable.
    pub fn top_words(&self, vocab: &Vocabulary, n: usize) -> Vec<Vec<(String, f64)>> {
        (0..self.num_topics())
            .map(|t| {
                let mut pairs: Vec<(TokenId, f64)> =
                    self.phi[t].iter().copied().enumerate().collect();
                pairs.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
                pairs
                    .into_iter()
                    .take(n)
                    .filter_map(|(w, p)| vocab.term(w).map(|term| (term.to_string(), p)))
                    .collect()
            })
            .collect()
    }

    /// Infer a topic distribution for a new bag-of-words against the fixed
    /// φ, using a few rounds of multiplicative updates:
    ///   resp(t | w) ∝ γ[t] · φ[t][w]
    ///   γ'[t] = α + Σ_w count(w) · resp(t | w), renormalized
    /// Deterministic — no sampling involved — so repeated classification of
    /// the same text always agrees.
    ///
    /// Returns None when the bag is empty or refers to no in-vocabulary
    /// term; such documents cannot be assigned a topic.
    pub fn infer(&self, bow: &[(TokenId, u32)]) -> Option<Vec<f64>> {
        let k = self.num_topics();
        let v = self.vocab_size();
        let in_vocab: Vec<(TokenId, u32)> = bow
            .iter()
            .copied()
            .filter(|&(w, c)| w < v && c > 0)
            .collect();
        if in_vocab.is_empty() {
            return None;
        }

        let mut gamma = vec![1.0 / k as f64; k];
        let mut next = vec![0.0f64; k];
        let mut resp = vec![0.0f64; k];

        for _ in 0..INFER_ROUNDS {
            for g in next.iter_mut() {
                *g = self.alpha;
            }
            for &(w, count) in &in_vocab {
                let mut norm = 0.0;
                for t in 0..k {
                    resp[t] = gamma[t] * self.phi[t][w];
                    norm += resp[t];
                }
                if norm <= f64::EPSILON {
                    continue;
                }
                for t in 0..k {
                    next[t] += count as f64 * resp[t] / norm;
                }
            }
            let total: f64 = next.iter().sum();
            for t in 0..k {
                gamma[t] = next[t] / total;
            }
        }

        Some(gamma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two topics with sharply opposed word preferences over a 4-term
    /// vocabulary.
    fn two_topic_model() -> TopicModel {
        TopicModel::new(
            vec![
                vec![0.45, 0.45, 0.05, 0.05],
                vec![0.05, 0.05, 0.45, 0.45],
            ],
            vec![vec![0.9, 0.1], vec![0.1, 0.9]],
            0.1,
        )
    }

    #[test]
    fn infer_empty_bow_is_none() {
        let model = two_topic_model();
        assert!(model.infer(&[]).is_none());
    }

    #[test]
    fn infer_out_of_vocabulary_only_is_none() {
        let model = two_topic_model();
        assert!(model.infer(&[(99, 3)]).is_none());
    }

    #[test]
    fn infer_returns_probability_vector() {
        let model = two_topic_model();
        let dist = model.infer(&[(0, 2), (3, 1)]).unwrap();
        assert_eq!(dist.len(), 2);
        let sum: f64 = dist.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sums to {sum}");
        assert!(dist.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn infer_prefers_the_matching_topic() {
        let model = two_topic_model();
        let dist = model.infer(&[(0, 3), (1, 2)]).unwrap();
        assert!(dist[0] > dist[1], "topic 0 words should favor topic 0");

        let dist = model.infer(&[(2, 3), (3, 2)]).unwrap();
        assert!(dist[1] > dist[0], "topic 1 words should favor topic 1");
    }

    #[test]
    fn infer_is_deterministic() {
        let model = two_topic_model();
        let bow = vec![(0, 1), (2, 2)];
        assert_eq!(model.infer(&bow), model.infer(&bow));
    }

    #[test]
    fn top_words_sorted_and_capped() {
        let model = two_topic_model();
        let vocab = Vocabulary::build(&[vec![
            "alpha".to_string(),
            "bravo".to_string(),
            "charlie".to_string(),
            "delta".to_string(),
        ]]);
        let tops = model.top_words(&vocab, 2);
        assert_eq!(tops.len(), 2);
        assert_eq!(tops[0].len(), 2);
        // Equal probabilities tie-break on the lower id
        assert_eq!(tops[0][0].0, "alpha");
        assert_eq!(tops[0][1].0, "bravo");
        assert!(tops[0][0].1 >= tops[0][1].1);
        assert_eq!(tops[1][0].0, "charlie");
    }
}

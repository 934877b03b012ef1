// Model quality metrics — reporting only, never fed back into training.
//
// Coherence: windowed NPMI. For each topic, take its top terms and slide a
// fixed-size window over every tokenized document; a term (or term pair)
// "occurs" once per window containing it. For a pair (wi, wj):
//
//   NPMI = ln(p(wi, wj) / (p(wi) · p(wj))) / -ln(p(wi, wj))
//
// with ε-smoothed probabilities, so a never-co-occurring pair tends to -1
// and a perfectly co-occurring pair to +1. Topic coherence is the mean
// over its term pairs; model coherence the mean over topics. The formula
// is fixed here — scores are comparable across runs of this
// implementation, not across implementations.
//
// Log-perplexity: the held-in per-token log-likelihood of the corpus under
// the mixed distribution p(w | d) = Σ_t θ[d][t] · φ[t][w]. Negative;
// closer to zero is a better fit.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::model::TopicModel;
use crate::text::vocabulary::TokenId;

/// Terms per topic entering the coherence computation.
const COHERENCE_TOP_TERMS: usize = 10;
/// Sliding-window width in tokens.
const COHERENCE_WINDOW: usize = 10;
const EPS: f64 = 1e-12;

/// Global quality metrics for a fitted model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Mean windowed NPMI over topics, in [-1, 1].
    pub coherence: f64,
    /// Mean per-token log-likelihood (negative).
    pub log_perplexity: f64,
}

/// Evaluate `model` against the encoded corpus it was trained on.
pub fn evaluate(model: &TopicModel, docs: &[Vec<TokenId>]) -> EvaluationMetrics {
    EvaluationMetrics {
        coherence: coherence(model, docs),
        log_perplexity: log_perplexity(model, docs),
    }
}

fn coherence(model: &TopicModel, docs: &[Vec<TokenId>]) -> f64 {
    // Top term ids per topic, stable order (probability desc, id asc)
    let topic_terms: Vec<Vec<TokenId>> = (0..model.num_topics())
        .map(|t| {
            let mut pairs: Vec<(TokenId, f64)> = model
                .word_distribution(t)
                .iter()
                .copied()
                .enumerate()
                .collect();
            pairs.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
            pairs
                .into_iter()
                .filter(|&(_, p)| p > 0.0)
                .take(COHERENCE_TOP_TERMS)
                .map(|(w, _)| w)
                .collect()
        })
        .collect();

    let candidates: HashSet<TokenId> = topic_terms.iter().flatten().copied().collect();
    let (single, joint, windows) = window_counts(docs, &candidates);
    if windows == 0 {
        return 0.0;
    }

    let topic_scores: Vec<f64> = topic_terms
        .iter()
        .filter(|terms| terms.len() >= 2)
        .map(|terms| topic_npmi(terms, &single, &joint, windows))
        .collect();

    if topic_scores.is_empty() {
        return 0.0;
    }
    topic_scores.iter().sum::<f64>() / topic_scores.len() as f64
}

/// Count, over all sliding windows, how many windows contain each candidate
/// term and each candidate pair (unordered, keyed low-id-first).
fn window_counts(
    docs: &[Vec<TokenId>],
    candidates: &HashSet<TokenId>,
) -> (
    HashMap<TokenId, usize>,
    HashMap<(TokenId, TokenId), usize>,
    usize,
) {
    let mut single: HashMap<TokenId, usize> = HashMap::new();
    let mut joint: HashMap<(TokenId, TokenId), usize> = HashMap::new();
    let mut windows = 0usize;

    for doc in docs {
        if doc.is_empty() {
            continue;
        }
        let width = COHERENCE_WINDOW.min(doc.len());
        for start in 0..=(doc.len() - width) {
            windows += 1;
            let mut present: Vec<TokenId> = doc[start..start + width]
                .iter()
                .filter(|w| candidates.contains(w))
                .copied()
                .collect();
            present.sort_unstable();
            present.dedup();

            for &w in &present {
                *single.entry(w).or_insert(0) += 1;
            }
            for (i, &wi) in present.iter().enumerate() {
                for &wj in &present[i + 1..] {
                    *joint.entry((wi, wj)).or_insert(0) += 1;
                }
            }
        }
    }

    (single, joint, windows)
}

fn topic_npmi(
    terms: &[TokenId],
    single: &HashMap<TokenId, usize>,
    joint: &HashMap<(TokenId, TokenId), usize>,
    windows: usize,
) -> f64 {
    let w = windows as f64;
    let mut sum = 0.0;
    let mut pairs = 0usize;

    for (i, &wi) in terms.iter().enumerate() {
        for &wj in &terms[i + 1..] {
            let key = if wi < wj { (wi, wj) } else { (wj, wi) };
            let p_i = single.get(&wi).copied().unwrap_or(0) as f64 / w;
            let p_j = single.get(&wj).copied().unwrap_or(0) as f64 / w;
            let p_ij = joint.get(&key).copied().unwrap_or(0) as f64 / w;

            let npmi = ((p_ij + EPS) / ((p_i + EPS) * (p_j + EPS))).ln() / -(p_ij + EPS).ln();
            sum += npmi.clamp(-1.0, 1.0);
            pairs += 1;
        }
    }

    if pairs == 0 {
        0.0
    } else {
        sum / pairs as f64
    }
}

fn log_perplexity(model: &TopicModel, docs: &[Vec<TokenId>]) -> f64 {
    let k = model.num_topics();
    let mut log_likelihood = 0.0;
    let mut tokens = 0usize;

    for (d, doc) in docs.iter().enumerate() {
        let theta = model.doc_distribution(d);
        for &w in doc {
            let p: f64 = (0..k).map(|t| theta[t] * model.word_distribution(t)[w]).sum();
            log_likelihood += (p + EPS).ln();
            tokens += 1;
        }
    }

    if tokens == 0 {
        return 0.0;
    }
    log_likelihood / tokens as f64
}

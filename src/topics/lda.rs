// Latent Dirichlet Allocation via collapsed Gibbs sampling.
//
// The sampler keeps the three count tables the collapsed update needs:
//   ndk[d][t] — tokens in document d assigned to topic t
//   nkw[t][w] — occurrences of word w assigned to topic t
//   nk[t]     — total tokens assigned to topic t
// One `sweep` resamples every token position once. The conditional for a
// position is
//   p(t) ∝ (ndk[d][t] + α) · (nkw[t][w] + β) / (nk[t] + V·β)
// after removing the position's current assignment from the counts.
//
// The numerical method stays behind `train` / `GibbsSampler`; the rest of
// the pipeline only sees the fitted TopicModel.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::model::TopicModel;
use crate::error::PipelineError;
use crate::text::vocabulary::TokenId;

/// Hyper-parameters for one training run. K is fixed by configuration and
/// never adjusted during training.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub num_topics: usize,
    pub passes: usize,
    pub seed: u64,
    /// Dirichlet prior on document-topic distributions.
    pub alpha: f64,
    /// Dirichlet prior on topic-word distributions.
    pub beta: f64,
}

impl TrainConfig {
    pub fn new(num_topics: usize, passes: usize, seed: u64) -> Self {
        Self {
            num_topics,
            passes,
            seed,
            alpha: 0.1,
            beta: 0.01,
        }
    }
}

/// Collapsed Gibbs sampler over an encoded corpus.
///
/// Exposed so the pipeline can drive sweeps itself (for progress
/// reporting); `train` wraps the whole loop for everyone else.
pub struct GibbsSampler {
    cfg: TrainConfig,
    vocab_size: usize,
    docs: Vec<Vec<TokenId>>,
    /// Topic assignment per token position.
    z: Vec<Vec<usize>>,
    ndk: Vec<Vec<usize>>,
    nkw: Vec<Vec<usize>>,
    nk: Vec<usize>,
    rng: StdRng,
}

impl GibbsSampler {
    /// Initialize with random topic assignments.
    ///
    /// Fails with `EmptyCorpus` on zero documents, an empty vocabulary, or
    /// a corpus with no tokens at all — training must never proceed on a
    /// degenerate corpus.
    pub fn new(
        docs: Vec<Vec<TokenId>>,
        vocab_size: usize,
        cfg: TrainConfig,
    ) -> Result<Self, PipelineError> {
        if docs.is_empty() {
            return Err(PipelineError::EmptyCorpus {
                reason: "no documents after filtering".to_string(),
            });
        }
        if vocab_size == 0 {
            return Err(PipelineError::EmptyCorpus {
                reason: "vocabulary has no terms after filtering".to_string(),
            });
        }
        if docs.iter().all(|d| d.is_empty()) {
            return Err(PipelineError::EmptyCorpus {
                reason: "every document is empty after encoding".to_string(),
            });
        }

        let k = cfg.num_topics;
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        let mut ndk = vec![vec![0usize; k]; docs.len()];
        let mut nkw = vec![vec![0usize; vocab_size]; k];
        let mut nk = vec![0usize; k];
        let mut z: Vec<Vec<usize>> = Vec::with_capacity(docs.len());

        for (di, doc) in docs.iter().enumerate() {
            let mut assignments = Vec::with_capacity(doc.len());
            for &w in doc {
                let topic = rng.gen_range(0..k);
                assignments.push(topic);
                ndk[di][topic] += 1;
                nkw[topic][w] += 1;
                nk[topic] += 1;
            }
            z.push(assignments);
        }

        Ok(Self {
            cfg,
            vocab_size,
            docs,
            z,
            ndk,
            nkw,
            nk,
            rng,
        })
    }

    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }

    pub fn passes(&self) -> usize {
        self.cfg.passes
    }

    /// Resample every token position once (one full corpus pass).
    pub fn sweep(&mut self) {
        let k = self.cfg.num_topics;
        let vb = self.vocab_size as f64 * self.cfg.beta;
        let mut weights = vec![0.0f64; k];

        for di in 0..self.docs.len() {
            for pi in 0..self.docs[di].len() {
                let w = self.docs[di][pi];
                let old_t = self.z[di][pi];

                self.ndk[di][old_t] -= 1;
                self.nkw[old_t][w] -= 1;
                self.nk[old_t] -= 1;

                let mut sum = 0.0;
                for (t, weight) in weights.iter_mut().enumerate() {
                    let left = self.ndk[di][t] as f64 + self.cfg.alpha;
                    let right =
                        (self.nkw[t][w] as f64 + self.cfg.beta) / (self.nk[t] as f64 + vb);
                    *weight = left * right;
                    sum += *weight;
                }

                let new_t = if sum <= f64::EPSILON {
                    self.rng.gen_range(0..k)
                } else {
                    // Inverse-CDF draw over the unnormalized weights
                    let mut target = self.rng.gen::<f64>() * sum;
                    let mut chosen = k - 1;
                    for (t, &weight) in weights.iter().enumerate() {
                        target -= weight;
                        if target < 0.0 {
                            chosen = t;
                            break;
                        }
                    }
                    chosen
                };

                self.z[di][pi] = new_t;
                self.ndk[di][new_t] += 1;
                self.nkw[new_t][w] += 1;
                self.nk[new_t] += 1;
            }
        }
    }

    /// Finish training and compute the smoothed distributions.
    ///
    /// φ[t][w] = (nkw[t][w] + β) / (nk[t] + V·β)
    /// θ[d][t] = (ndk[d][t] + α) / (N_d + K·α)
    pub fn into_model(self) -> TopicModel {
        let k = self.cfg.num_topics;
        let v = self.vocab_size;
        let vb = v as f64 * self.cfg.beta;
        let ka = k as f64 * self.cfg.alpha;

        let phi: Vec<Vec<f64>> = (0..k)
            .map(|t| {
                let denom = self.nk[t] as f64 + vb;
                (0..v)
                    .map(|w| (self.nkw[t][w] as f64 + self.cfg.beta) / denom)
                    .collect()
            })
            .collect();

        let theta: Vec<Vec<f64>> = self
            .docs
            .iter()
            .enumerate()
            .map(|(d, doc)| {
                let denom = doc.len() as f64 + ka;
                (0..k)
                    .map(|t| (self.ndk[d][t] as f64 + self.cfg.alpha) / denom)
                    .collect()
            })
            .collect();

        TopicModel::new(phi, theta, self.cfg.alpha)
    }
}

/// Fit a topic model: `cfg.passes` full sweeps from a seeded random
/// initialization. Same corpus, same config — same model.
pub fn train(
    docs: Vec<Vec<TokenId>>,
    vocab_size: usize,
    cfg: TrainConfig,
) -> Result<TopicModel, PipelineError> {
    let mut sampler = GibbsSampler::new(docs, vocab_size, cfg)?;
    for _ in 0..sampler.passes() {
        sampler.sweep();
    }
    Ok(sampler.into_model())
}

use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration for an analysis run.
///
/// Defaults come from environment variables (a .env file is loaded at
/// startup via dotenvy); CLI flags override them. The struct is built once
/// in main and passed by reference — no stage reads the environment on its
/// own.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// Input table (CSV with one or more text columns).
    pub input: PathBuf,
    /// Explicit output directory. When None, a sibling directory named
    /// after the input file stem is used.
    pub output_dir: Option<PathBuf>,
    /// Column-name prefix identifying the text columns to merge.
    pub text_column_prefix: String,
    /// Number of latent topics K — fixed before training, never learned.
    pub num_topics: usize,
    /// Full Gibbs sweeps over the corpus.
    pub passes: usize,
    /// Seed for the training RNG; a seed fully determines a run.
    pub seed: u64,
    /// Scores strictly above this are Positive.
    pub positive_threshold: f64,
    /// Scores strictly below this are Negative.
    pub negative_threshold: f64,
    /// Keywords per topic in summary tables and the terminal display.
    pub top_words: usize,
    /// Extra stop-words, one per line, merged with the built-in list.
    pub stopword_file: Option<PathBuf>,
    /// Drop vocabulary terms appearing in fewer than this many documents
    /// (1 disables pruning).
    pub min_doc_freq: usize,
    /// Drop vocabulary terms appearing in more than this fraction of
    /// documents (1.0 disables pruning).
    pub max_doc_ratio: f64,
}

impl AnalyzeConfig {
    pub const DEFAULT_TOPICS: usize = 6;
    pub const DEFAULT_PASSES: usize = 10;
    pub const DEFAULT_SEED: u64 = 42;
    pub const DEFAULT_TOP_WORDS: usize = 5;
    pub const DEFAULT_POSITIVE_THRESHOLD: f64 = 0.7;
    pub const DEFAULT_NEGATIVE_THRESHOLD: f64 = 0.3;
    pub const DEFAULT_TEXT_PREFIX: &'static str = "content";

    /// Build a config for `input` with every other field at its
    /// environment-backed default.
    pub fn for_input(input: PathBuf) -> Self {
        Self {
            input,
            output_dir: env::var("MURMUR_OUTPUT_DIR").ok().map(PathBuf::from),
            text_column_prefix: env::var("MURMUR_TEXT_PREFIX")
                .unwrap_or_else(|_| Self::DEFAULT_TEXT_PREFIX.to_string()),
            num_topics: env_parse("MURMUR_TOPICS", Self::DEFAULT_TOPICS),
            passes: env_parse("MURMUR_PASSES", Self::DEFAULT_PASSES),
            seed: env_parse("MURMUR_SEED", Self::DEFAULT_SEED),
            positive_threshold: env_parse(
                "MURMUR_POSITIVE_THRESHOLD",
                Self::DEFAULT_POSITIVE_THRESHOLD,
            ),
            negative_threshold: env_parse(
                "MURMUR_NEGATIVE_THRESHOLD",
                Self::DEFAULT_NEGATIVE_THRESHOLD,
            ),
            top_words: env_parse("MURMUR_TOP_WORDS", Self::DEFAULT_TOP_WORDS),
            stopword_file: env::var("MURMUR_STOPWORDS").ok().map(PathBuf::from),
            min_doc_freq: 1,
            max_doc_ratio: 1.0,
        }
    }

    /// Check the configuration is usable before any work starts.
    pub fn validate(&self) -> Result<()> {
        if self.num_topics == 0 {
            anyhow::bail!("--topics must be at least 1");
        }
        if self.passes == 0 {
            anyhow::bail!("--passes must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.positive_threshold)
            || !(0.0..=1.0).contains(&self.negative_threshold)
        {
            anyhow::bail!("sentiment thresholds must lie in [0, 1]");
        }
        if self.negative_threshold >= self.positive_threshold {
            anyhow::bail!(
                "negative threshold ({}) must be below positive threshold ({})",
                self.negative_threshold,
                self.positive_threshold
            );
        }
        if self.top_words == 0 {
            anyhow::bail!("--top-words must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.max_doc_ratio) {
            anyhow::bail!("--max-doc-ratio must lie in [0, 1]");
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

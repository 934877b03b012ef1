// Typed pipeline failures.
//
// Most of the crate uses anyhow at the boundaries, but the failure classes
// callers need to distinguish (abort-before-training vs. unwritable output
// vs. bad input schema) are expressed as a concrete enum.

use std::path::PathBuf;

use thiserror::Error;

/// Failure classes the pipeline can abort with.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No column name in the input table starts with the configured prefix.
    #[error("no column starting with '{prefix}' in input — found columns: {available:?}")]
    NoTextColumns {
        prefix: String,
        available: Vec<String>,
    },

    /// The corpus is degenerate after filtering. Training must never be
    /// attempted on zero documents or an empty vocabulary.
    #[error("empty corpus: {reason}")]
    EmptyCorpus { reason: String },

    /// Neither the resolved output directory nor the fallback could be created.
    #[error(
        "cannot create output directory {} (fallback {} also failed)",
        primary.display(),
        fallback.display()
    )]
    OutputUnwritable { primary: PathBuf, fallback: PathBuf },
}

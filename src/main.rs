use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use murmur::config::AnalyzeConfig;
use murmur::pipeline;

/// Murmur: topic and sentiment analysis for comment corpora.
///
/// Reads a tabular file of free-text comments, fits a fixed-K topic model,
/// scores per-comment sentiment, and writes summary tables, a chart, and
/// an interactive topic browser.
#[derive(Parser)]
#[command(name = "murmur", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full topic + sentiment pipeline on an input table
    Analyze {
        /// Input CSV with one or more text columns
        input: PathBuf,

        /// Output directory (default: sibling directory named after the input)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Prefix identifying the text columns to merge
        #[arg(long)]
        text_column: Option<String>,

        /// Number of topics K
        #[arg(long)]
        topics: Option<usize>,

        /// Training passes over the corpus
        #[arg(long)]
        passes: Option<usize>,

        /// Random seed for reproducible training
        #[arg(long)]
        seed: Option<u64>,

        /// Keywords per topic in summaries
        #[arg(long)]
        top_words: Option<usize>,

        /// Scores above this are Positive
        #[arg(long)]
        positive_threshold: Option<f64>,

        /// Scores below this are Negative
        #[arg(long)]
        negative_threshold: Option<f64>,

        /// Extra stop-words file, one word per line
        #[arg(long)]
        stopwords: Option<PathBuf>,

        /// Drop terms in fewer than this many documents
        #[arg(long, default_value = "1")]
        min_doc_freq: usize,

        /// Drop terms in more than this fraction of documents
        #[arg(long, default_value = "1.0")]
        max_doc_ratio: f64,
    },

    /// Show which text columns would be analyzed, without running
    Columns {
        /// Input CSV to inspect
        input: PathBuf,

        /// Prefix identifying the text columns
        #[arg(long)]
        text_column: Option<String>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("murmur=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output_dir,
            text_column,
            topics,
            passes,
            seed,
            top_words,
            positive_threshold,
            negative_threshold,
            stopwords,
            min_doc_freq,
            max_doc_ratio,
        } => {
            let mut config = AnalyzeConfig::for_input(input);
            if let Some(dir) = output_dir {
                config.output_dir = Some(dir);
            }
            if let Some(prefix) = text_column {
                config.text_column_prefix = prefix;
            }
            if let Some(k) = topics {
                config.num_topics = k;
            }
            if let Some(n) = passes {
                config.passes = n;
            }
            if let Some(s) = seed {
                config.seed = s;
            }
            if let Some(n) = top_words {
                config.top_words = n;
            }
            if let Some(t) = positive_threshold {
                config.positive_threshold = t;
            }
            if let Some(t) = negative_threshold {
                config.negative_threshold = t;
            }
            if let Some(path) = stopwords {
                config.stopword_file = Some(path);
            }
            config.min_doc_freq = min_doc_freq;
            config.max_doc_ratio = max_doc_ratio;
            config.validate()?;

            pipeline::run(&config)?;
        }

        Commands::Columns { input, text_column } => {
            let prefix = text_column
                .unwrap_or_else(|| AnalyzeConfig::DEFAULT_TEXT_PREFIX.to_string());
            pipeline::run::preview_columns(&input, &prefix)?;
        }
    }

    Ok(())
}

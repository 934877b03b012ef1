// End-to-end batch run.
//
// Stages execute strictly in order over the whole corpus — training needs
// every document, so nothing streams:
//
//   read -> tokenize -> vocabulary/encode -> train -> evaluate
//        -> sentiment -> assign topics -> aggregate -> export
//
// Input validation failures (no text columns, empty corpus) abort before
// training and before any output file is created. Per-document sentiment
// failures degrade to the neutral default and are counted; unassigned
// documents are counted and kept out of topic aggregates.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::classify;
use crate::config::AnalyzeConfig;
use crate::error::PipelineError;
use crate::ingest;
use crate::report::{aggregate, chart, tables, terminal, viz};
use crate::sentiment::{
    LexiconScorer, ScoreError, SentimentCategory, SentimentScorer, Thresholds, NEUTRAL_MIDPOINT,
};
use crate::text::{stopwords, Tokenizer, Vocabulary};
use crate::topics::{evaluate, GibbsSampler, TrainConfig};

/// Directory used when the preferred output directory cannot be created.
const FALLBACK_DIR: &str = "murmur-output";

/// What a finished run produced, for the caller and for tests.
#[derive(Debug)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub rows_read: usize,
    pub rows_empty: usize,
    pub documents: usize,
    pub vocabulary_terms: usize,
    pub degraded_scores: usize,
    pub unassigned: usize,
    pub coherence: f64,
    pub log_perplexity: f64,
    pub artifacts: Vec<PathBuf>,
}

fn progress_bar(len: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!("  {label} [{{bar:30}}] {{pos}}/{{len}} ({{eta}})"))
            .expect("static template"),
    );
    pb
}

/// Resolve the output directory: explicit flag, else a sibling directory
/// named after the input file stem. On creation failure fall back once to
/// a process-local directory; if that also fails, abort naming both paths.
pub fn resolve_output_dir(input: &Path, explicit: Option<&Path>) -> Result<PathBuf, PipelineError> {
    let preferred = match explicit {
        Some(dir) => dir.to_path_buf(),
        None => {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "murmur".to_string());
            input.parent().unwrap_or(Path::new(".")).join(stem)
        }
    };

    if fs::create_dir_all(&preferred).is_ok() {
        return Ok(preferred);
    }

    let fallback = PathBuf::from(FALLBACK_DIR);
    warn!(
        preferred = %preferred.display(),
        fallback = %fallback.display(),
        "Preferred output directory not writable, falling back"
    );
    match fs::create_dir_all(&fallback) {
        Ok(()) => Ok(fallback),
        Err(_) => Err(PipelineError::OutputUnwritable {
            primary: preferred,
            fallback,
        }),
    }
}

/// Execute the whole pipeline for `config`.
pub fn run(config: &AnalyzeConfig) -> Result<RunSummary> {
    // Stage 1: ingest
    println!("Reading {}...", config.input.display());
    let ingested = ingest::read_documents(&config.input, &config.text_column_prefix)?;
    println!(
        "  {} rows, {} retained ({} empty)",
        ingested.rows_read,
        ingested.documents.len(),
        ingested.rows_empty
    );
    let mut documents = ingested.documents;
    if documents.is_empty() {
        return Err(PipelineError::EmptyCorpus {
            reason: "every input row had empty text".to_string(),
        }
        .into());
    }

    // Stage 2: tokenize
    let stopword_set = stopwords::load(config.stopword_file.as_deref())?;
    let tokenizer = Tokenizer::new(stopword_set);

    println!("Tokenizing {} documents...", documents.len());
    let pb = progress_bar(documents.len(), "Tokenize");
    for doc in documents.iter_mut() {
        doc.tokens = tokenizer.tokenize(&doc.text);
        pb.inc(1);
    }
    pb.finish_and_clear();

    // Stage 3: vocabulary and encoding
    let token_sequences: Vec<Vec<String>> =
        documents.iter().map(|d| d.tokens.clone()).collect();
    let vocab = Vocabulary::build(&token_sequences)
        .prune(config.min_doc_freq, config.max_doc_ratio);
    println!("  Vocabulary: {} terms", vocab.len());

    for doc in documents.iter_mut() {
        doc.bow = vocab.encode_bow(&doc.tokens);
    }
    let encoded: Vec<Vec<usize>> = documents
        .iter()
        .map(|d| vocab.encode_ids(&d.tokens))
        .collect();

    // Fail fast on a degenerate corpus — the sampler refuses them too, but
    // checking here keeps the message close to the input stage.
    if vocab.is_empty() {
        return Err(PipelineError::EmptyCorpus {
            reason: "vocabulary has no terms after filtering".to_string(),
        }
        .into());
    }

    // Stage 4: train
    println!(
        "Training topic model (K={}, {} passes, seed {})...",
        config.num_topics, config.passes, config.seed
    );
    let train_cfg = TrainConfig::new(config.num_topics, config.passes, config.seed);
    let mut sampler = GibbsSampler::new(encoded.clone(), vocab.len(), train_cfg)?;
    let pb = progress_bar(config.passes, "Train");
    for _ in 0..config.passes {
        sampler.sweep();
        pb.inc(1);
    }
    pb.finish_and_clear();
    let model = sampler.into_model();
    info!(topics = config.num_topics, "Topic model trained");

    // Stage 5: evaluate
    let metrics = evaluate::evaluate(&model, &encoded);
    terminal::display_metrics(&metrics);

    let top_words = model.top_words(&vocab, config.top_words);
    terminal::display_topic_keywords(&top_words);

    // Stage 6: sentiment
    println!("\nScoring sentiment...");
    let scorer = LexiconScorer::new();
    let thresholds = Thresholds {
        positive: config.positive_threshold,
        negative: config.negative_threshold,
    };
    let mut degraded_scores = 0usize;
    let pb = progress_bar(documents.len(), "Sentiment");
    for doc in documents.iter_mut() {
        match scorer.try_score(&doc.text) {
            Ok(score) => {
                doc.sentiment_score = score;
                doc.sentiment_category = thresholds.categorize(score);
            }
            Err(ScoreError::EmptyText) => {
                // Degrade locally, never abort the run for one document
                doc.sentiment_score = NEUTRAL_MIDPOINT;
                doc.sentiment_category = SentimentCategory::Unknown;
                degraded_scores += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    if degraded_scores > 0 {
        warn!(count = degraded_scores, "Sentiment degraded to neutral default");
    }

    // Stage 7: topic assignment
    println!("Assigning topics...");
    let pb = progress_bar(documents.len(), "Assign");
    let mut unassigned = 0usize;
    for doc in documents.iter_mut() {
        doc.topic = classify::assign_topic(&doc.text, &tokenizer, &vocab, &model);
        if doc.topic.is_none() {
            unassigned += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    println!(
        "  {} assigned, {} unassigned",
        documents.len() - unassigned,
        unassigned
    );

    // Stage 8: aggregate
    let corpus_report = aggregate(&documents, top_words);

    // Stage 9: export
    let output_dir = resolve_output_dir(&config.input, config.output_dir.as_deref())?;
    println!("\nWriting reports to {}...", output_dir.display());

    let mut artifacts = Vec::new();
    artifacts.push(tables::export_documents(&output_dir, &documents)?);
    artifacts.push(tables::export_topic_sentiment_summary(&output_dir, &corpus_report)?);
    artifacts.push(tables::export_topic_category_distribution(&output_dir, &corpus_report)?);
    artifacts.push(tables::export_category_distribution(&output_dir, &corpus_report)?);
    artifacts.push(tables::export_topic_summary(&output_dir, &corpus_report)?);
    artifacts.extend(tables::export_documents_by_topic(&output_dir, &documents)?);
    artifacts.push(chart::write_chart(&output_dir, &corpus_report)?);
    artifacts.push(viz::write_viz(
        &output_dir,
        &model,
        &vocab,
        &metrics,
        &corpus_report,
    )?);

    for path in &artifacts {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("  {} {}", "✓".green(), name);
    }

    terminal::display_report(&corpus_report, ingested.rows_empty, degraded_scores);
    println!("\n{}", "Analysis complete.".bold());

    Ok(RunSummary {
        output_dir,
        rows_read: ingested.rows_read,
        rows_empty: ingested.rows_empty,
        documents: documents.len(),
        vocabulary_terms: vocab.len(),
        degraded_scores,
        unassigned,
        coherence: metrics.coherence,
        log_perplexity: metrics.log_perplexity,
        artifacts,
    })
}

/// Schema-resolution preview: report which columns would be analyzed and
/// how many rows survive the empty-text filter, without running anything
/// else.
pub fn preview_columns(input: &Path, text_column_prefix: &str) -> Result<()> {
    let ingested = ingest::read_documents(input, text_column_prefix)
        .with_context(|| format!("cannot preview {}", input.display()))?;

    println!("{}", "=== Resolved text columns ===".bold());
    for column in &ingested.schema.columns {
        println!("  [{}] {}", column.index, column.name);
    }
    println!(
        "\n  {} rows, {} with text, {} empty",
        ingested.rows_read,
        ingested.documents.len(),
        ingested.rows_empty
    );

    if !ingested.documents.is_empty() {
        println!("\n{}", "=== Sample rows ===".bold());
        for doc in ingested.documents.iter().take(3) {
            println!("  {}", crate::report::truncate_chars(&doc.text, 80).dimmed());
        }
    }
    Ok(())
}

// Colored terminal output for run summaries.
//
// All terminal-specific formatting lives here; the pipeline calls these
// between stages and at the end of a run.

use colored::Colorize;

use super::aggregate::CorpusReport;
use crate::topics::EvaluationMetrics;

/// Show each topic's top keywords after training.
pub fn display_topic_keywords(top_words: &[Vec<(String, f64)>]) {
    println!("\n{}", "=== Topic keywords ===".bold());
    for (topic, words) in top_words.iter().enumerate() {
        let rendered = words
            .iter()
            .map(|(word, weight)| format!("{word} ({weight:.3})"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  Topic {topic}: {rendered}");
    }
}

/// Show model quality metrics.
pub fn display_metrics(metrics: &EvaluationMetrics) {
    println!("\n{}", "=== Model quality ===".bold());
    println!("  Coherence (windowed NPMI): {:.4}", metrics.coherence);
    println!("  Log-perplexity:            {:.4}", metrics.log_perplexity);
}

/// Final summary table: per-topic counts and sentiment, overall
/// distribution, and the drop counters that make a run auditable.
pub fn display_report(report: &CorpusReport, rows_empty: usize, degraded_scores: usize) {
    println!("\n{}", "=== Topic / sentiment summary ===".bold());
    println!(
        "  {:>5}  {:>6}  {:>9}  {:>8}  {:>8}  {:>8}  {:>8}",
        "Topic".dimmed(),
        "Docs".dimmed(),
        "MeanSent".dimmed(),
        "Pos".dimmed(),
        "Neu".dimmed(),
        "Neg".dimmed(),
        "Unk".dimmed(),
    );
    println!("  {}", "-".repeat(64).dimmed());

    for topic in report.populated_topics() {
        let mean = topic
            .mean_sentiment
            .map(|m| format!("{m:.3}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>5}  {:>6}  {:>9}  {:>8}  {:>8}  {:>8}  {:>8}",
            topic.topic_id,
            topic.document_count,
            mean,
            topic.categories.positive.to_string().green(),
            topic.categories.neutral,
            topic.categories.negative.to_string().red(),
            topic.categories.unknown,
        );
    }

    println!("\n{}", "=== Overall sentiment ===".bold());
    println!(
        "  {} positive, {} neutral, {} negative, {} unknown",
        report.overall.positive.to_string().green(),
        report.overall.neutral,
        report.overall.negative.to_string().red(),
        report.overall.unknown,
    );

    println!("\n{}", "=== Dropped / degraded ===".bold());
    println!("  Rows with empty text:     {rows_empty}");
    println!("  Documents unassigned:     {}", report.unassigned_count);
    println!("  Scores degraded to 0.5:   {degraded_scores}");
}

// CSV table export.
//
// One file per table, all under the resolved output directory. Row order
// is fixed (document order, ascending topic id, declared category order)
// so re-running on the same input reproduces the files byte for byte.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::Writer;

use super::aggregate::CorpusReport;
use crate::document::Document;
use crate::sentiment::SentimentCategory;

fn open_writer(path: &Path) -> Result<Writer<std::fs::File>> {
    Writer::from_path(path).with_context(|| format!("cannot write report file {}", path.display()))
}

/// Per-document table: every retained document, including unassigned ones
/// (their topic column carries the "unassigned" sentinel).
pub fn export_documents(dir: &Path, documents: &[Document]) -> Result<PathBuf> {
    let path = dir.join("documents.csv");
    let mut writer = open_writer(&path)?;
    writer.write_record(["text", "sentiment_score", "sentiment_category", "topic"])?;
    for doc in documents {
        writer.write_record([
            doc.text.clone(),
            format!("{:.4}", doc.sentiment_score),
            doc.sentiment_category.label().to_string(),
            doc.topic_label(),
        ])?;
    }
    writer.flush()?;
    Ok(path)
}

/// Per-topic mean sentiment and document count (populated topics only).
pub fn export_topic_sentiment_summary(dir: &Path, report: &CorpusReport) -> Result<PathBuf> {
    let path = dir.join("topic_sentiment_summary.csv");
    let mut writer = open_writer(&path)?;
    writer.write_record(["topic", "mean_sentiment", "document_count"])?;
    for topic in report.populated_topics() {
        writer.write_record([
            topic.topic_id.to_string(),
            format!("{:.4}", topic.mean_sentiment.unwrap_or(0.0)),
            topic.document_count.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(path)
}

/// Per-topic category counts and proportions. Every category appears for
/// every populated topic; proportions sum to 1 per topic.
pub fn export_topic_category_distribution(dir: &Path, report: &CorpusReport) -> Result<PathBuf> {
    let path = dir.join("topic_category_distribution.csv");
    let mut writer = open_writer(&path)?;
    writer.write_record(["topic", "category", "count", "proportion"])?;
    for topic in report.populated_topics() {
        for (category, proportion) in topic.categories.proportions() {
            writer.write_record([
                topic.topic_id.to_string(),
                category.label().to_string(),
                topic.categories.get(category).to_string(),
                format!("{proportion:.4}"),
            ])?;
        }
    }
    writer.flush()?;
    Ok(path)
}

/// Corpus-wide category counts over topic-assigned documents.
pub fn export_category_distribution(dir: &Path, report: &CorpusReport) -> Result<PathBuf> {
    let path = dir.join("category_distribution.csv");
    let mut writer = open_writer(&path)?;
    writer.write_record(["category", "count"])?;
    for category in SentimentCategory::ALL {
        writer.write_record([
            category.label().to_string(),
            report.overall.get(category).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(path)
}

/// The topic summary table: keywords, counts per category, mean sentiment.
/// Covers all K topics — an empty topic still shows its keywords.
pub fn export_topic_summary(dir: &Path, report: &CorpusReport) -> Result<PathBuf> {
    let path = dir.join("topic_summary.csv");
    let mut writer = open_writer(&path)?;
    writer.write_record([
        "topic",
        "keywords",
        "document_count",
        "mean_sentiment",
        "positive",
        "neutral",
        "negative",
        "unknown",
    ])?;
    for topic in &report.topics {
        let keywords = topic
            .top_keywords
            .iter()
            .map(|(word, _)| word.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        writer.write_record([
            topic.topic_id.to_string(),
            keywords,
            topic.document_count.to_string(),
            topic
                .mean_sentiment
                .map(|m| format!("{m:.4}"))
                .unwrap_or_default(),
            topic.categories.positive.to_string(),
            topic.categories.neutral.to_string(),
            topic.categories.negative.to_string(),
            topic.categories.unknown.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(path)
}

/// One file per populated topic holding only that topic's documents.
pub fn export_documents_by_topic(dir: &Path, documents: &[Document]) -> Result<Vec<PathBuf>> {
    let mut topics: Vec<usize> = documents.iter().filter_map(|d| d.topic).collect();
    topics.sort_unstable();
    topics.dedup();

    let mut paths = Vec::with_capacity(topics.len());
    for topic in topics {
        let path = dir.join(format!("topic_{topic}_documents.csv"));
        let mut writer = open_writer(&path)?;
        writer.write_record(["text", "sentiment_score", "sentiment_category"])?;
        for doc in documents.iter().filter(|d| d.topic == Some(topic)) {
            writer.write_record([
                doc.text.clone(),
                format!("{:.4}", doc.sentiment_score),
                doc.sentiment_category.label().to_string(),
            ])?;
        }
        writer.flush()?;
        paths.push(path);
    }
    Ok(paths)
}

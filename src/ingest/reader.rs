// CSV ingestion.
//
// Reads the whole input table into memory (the pipeline is a batch run and
// training needs the full corpus anyway), merges the resolved text columns
// per row, and drops rows whose merged text is empty. Drop counts are kept
// so the run summary can report them.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::info;

use super::schema::{resolve_text_columns, TextSchema};
use crate::document::Document;

/// The outcome of ingestion: retained documents plus audit counters.
#[derive(Debug)]
pub struct IngestReport {
    pub documents: Vec<Document>,
    pub schema: TextSchema,
    /// Data rows read from the file (excluding the header).
    pub rows_read: usize,
    /// Rows dropped because their merged text was empty.
    pub rows_empty: usize,
}

/// Read `path` and produce the initial document set.
///
/// Schema resolution happens once, against the header row, before any data
/// row is touched. Document ids are assigned in retained-row order.
pub fn read_documents(path: &Path, text_column_prefix: &str) -> Result<IngestReport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("cannot open input file {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("cannot read header row of {}", path.display()))?
        .clone();
    let schema = resolve_text_columns(&headers, text_column_prefix)?;

    let mut documents = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_empty = 0usize;

    for record in reader.records() {
        let record = record.with_context(|| format!("malformed row in {}", path.display()))?;
        rows_read += 1;

        let text = schema.merge_row(&record);
        if text.is_empty() {
            rows_empty += 1;
            continue;
        }
        documents.push(Document::new(documents.len(), text));
    }

    info!(
        rows = rows_read,
        retained = documents.len(),
        empty = rows_empty,
        "Ingested input table"
    );

    Ok(IngestReport {
        documents,
        schema,
        rows_read,
        rows_empty,
    })
}

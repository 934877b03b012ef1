// One-shot schema resolution.
//
// The input table carries free text in one or more columns identified by a
// name prefix (e.g. "content", "content_2", "Content-EN"). Resolution runs
// once at ingestion and produces a fixed column list; the row loop never
// inspects header names again.

use csv::StringRecord;
use tracing::info;

use crate::error::PipelineError;

/// A text column selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextColumn {
    /// Zero-based position in the input record.
    pub index: usize,
    /// Header name as it appears in the file.
    pub name: String,
}

/// The resolved set of text columns for a run.
#[derive(Debug, Clone)]
pub struct TextSchema {
    pub columns: Vec<TextColumn>,
}

impl TextSchema {
    /// Merge the text cells of one row into a single document body.
    /// Cells are trimmed and empty cells skipped; the result may still be
    /// empty, in which case the row is dropped by the reader.
    pub fn merge_row(&self, record: &StringRecord) -> String {
        let parts: Vec<&str> = self
            .columns
            .iter()
            .filter_map(|col| record.get(col.index))
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect();
        parts.join(" ")
    }
}

/// Select every column whose name starts with `prefix` (case-insensitive).
///
/// Fails with a typed error listing the available columns when nothing
/// matches, so a header typo surfaces before any row is read.
pub fn resolve_text_columns(
    headers: &StringRecord,
    prefix: &str,
) -> Result<TextSchema, PipelineError> {
    let needle = prefix.to_lowercase();
    let columns: Vec<TextColumn> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| name.trim().to_lowercase().starts_with(&needle))
        .map(|(index, name)| TextColumn {
            index,
            name: name.to_string(),
        })
        .collect();

    if columns.is_empty() {
        return Err(PipelineError::NoTextColumns {
            prefix: prefix.to_string(),
            available: headers.iter().map(|h| h.to_string()).collect(),
        });
    }

    info!(
        count = columns.len(),
        columns = ?columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        "Resolved text columns"
    );

    Ok(TextSchema { columns })
}

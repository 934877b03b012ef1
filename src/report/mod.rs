// Report generation — aggregation, table/chart/viz export, terminal display.

pub mod aggregate;
pub mod chart;
pub mod tables;
pub mod terminal;
pub mod viz;

pub use aggregate::{aggregate, CategoryCounts, CorpusReport, TopicSummary};

/// Truncate a string to at most `max_chars` characters, appending "..." if
/// truncated. Character-based so multi-byte text never splits mid-glyph.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

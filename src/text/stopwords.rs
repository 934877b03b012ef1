// Stop-word set construction.
//
// The set is built once at startup and passed into the tokenizer as an
// immutable value — no global state, so tests can run with arbitrary sets.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use stop_words::{get, LANGUAGE};
use tracing::info;

/// The built-in English stop-word list.
pub fn builtin() -> HashSet<String> {
    get(LANGUAGE::English).into_iter().collect()
}

/// Built-in list merged with an optional user-supplied file (one word per
/// line, blank lines and surrounding whitespace ignored).
pub fn load(extra_file: Option<&Path>) -> Result<HashSet<String>> {
    let mut words = builtin();

    if let Some(path) = extra_file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("cannot read stop-word file {}", path.display()))?;
        let before = words.len();
        for line in contents.lines() {
            let word = line.trim();
            if !word.is_empty() {
                words.insert(word.to_lowercase());
            }
        }
        info!(
            file = %path.display(),
            added = words.len() - before,
            total = words.len(),
            "Merged user stop-words"
        );
    }

    Ok(words)
}

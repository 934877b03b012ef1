// Tokenization.
//
// Comments arrive as messy free text: URLs, @mentions, punctuation runs.
// The tokenizer strips URLs and mentions first, then segments on
// non-alphanumeric characters, lowercases, and drops stop-words and
// single-character tokens. It is pure — same input and stop-word set,
// same output — and holds no state beyond the set it was built with.
//
// This is the substitution point for other languages: swap the segmenter,
// keep the contract.

use std::collections::HashSet;

use regex_lite::Regex;

/// Splits raw text into filtered word tokens.
pub struct Tokenizer {
    stopwords: HashSet<String>,
    noise: Regex,
}

impl Tokenizer {
    pub fn new(stopwords: HashSet<String>) -> Self {
        // URLs and @mentions carry no topical signal and pollute the
        // vocabulary with one-off tokens.
        let noise = Regex::new(r"(https?://\S+|www\.\S+|@\w+)").expect("static pattern");
        Self { stopwords, noise }
    }

    /// Tokenize one document.
    ///
    /// Empty input yields an empty sequence, never an error.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = self.noise.replace_all(text, " ");

        cleaned
            .split(|c: char| !c.is_alphanumeric())
            .filter(|raw| !raw.is_empty())
            .map(|raw| raw.to_lowercase())
            .filter(|tok| tok.chars().count() > 1 && !self.stopwords.contains(tok))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer(words: &[&str]) -> Tokenizer {
        Tokenizer::new(words.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn splits_and_lowercases() {
        let t = tokenizer(&[]);
        assert_eq!(
            t.tokenize("Great Product, really great!"),
            vec!["great", "product", "really", "great"]
        );
    }

    #[test]
    fn drops_stopwords_and_single_chars() {
        let t = tokenizer(&["the", "is"]);
        assert_eq!(t.tokenize("the product is a hit"), vec!["product", "hit"]);
    }

    #[test]
    fn strips_urls_and_mentions() {
        let t = tokenizer(&[]);
        let tokens = t.tokenize("see https://example.com/deal and ask @support about shipping");
        assert_eq!(tokens, vec!["see", "and", "ask", "about", "shipping"]);
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        let t = tokenizer(&["the"]);
        assert!(t.tokenize("").is_empty());
        assert!(t.tokenize("   \t\n").is_empty());
        assert!(t.tokenize("the a I").is_empty());
    }

    #[test]
    fn deterministic_for_same_input() {
        let t = tokenizer(&["and"]);
        let text = "fast shipping and friendly support";
        assert_eq!(t.tokenize(text), t.tokenize(text));
    }

    #[test]
    fn keeps_accented_words_whole() {
        let t = tokenizer(&[]);
        assert_eq!(t.tokenize("très élégant"), vec!["très", "élégant"]);
    }
}

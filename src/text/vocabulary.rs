// Vocabulary and bag-of-words encoding.
//
// Ids are assigned in first-seen order over the tokenized corpus and are
// stable for the lifetime of a run. The vocabulary is immutable after
// construction; every bag-of-words in the pipeline refers into it.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

pub type TokenId = usize;

/// Bidirectional token <-> id mapping with per-term document frequencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, TokenId>,
    doc_freq: Vec<usize>,
    num_docs: usize,
}

impl Vocabulary {
    /// Build from the full tokenized corpus.
    pub fn build(token_sequences: &[Vec<String>]) -> Self {
        let mut terms: Vec<String> = Vec::new();
        let mut index: HashMap<String, TokenId> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        for tokens in token_sequences {
            let mut seen_in_doc: HashSet<TokenId> = HashSet::new();
            for token in tokens {
                let id = match index.get(token) {
                    Some(&id) => id,
                    None => {
                        let id = terms.len();
                        terms.push(token.clone());
                        index.insert(token.clone(), id);
                        doc_freq.push(0);
                        id
                    }
                };
                if seen_in_doc.insert(id) {
                    doc_freq[id] += 1;
                }
            }
        }

        Self {
            terms,
            index,
            doc_freq,
            num_docs: token_sequences.len(),
        }
    }

    /// Drop terms outside the document-frequency bounds, reassigning ids
    /// (still in original first-seen order). `min_doc_freq` of 1 and
    /// `max_doc_ratio` of 1.0 leave the vocabulary untouched.
    pub fn prune(self, min_doc_freq: usize, max_doc_ratio: f64) -> Self {
        if min_doc_freq <= 1 && max_doc_ratio >= 1.0 {
            return self;
        }
        let max_df = (max_doc_ratio * self.num_docs as f64).floor() as usize;

        let mut terms = Vec::new();
        let mut index = HashMap::new();
        let mut doc_freq = Vec::new();
        for (term, df) in self.terms.into_iter().zip(self.doc_freq) {
            if df >= min_doc_freq && df <= max_df {
                let id = terms.len();
                index.insert(term.clone(), id);
                terms.push(term);
                doc_freq.push(df);
            }
        }

        Self {
            terms,
            index,
            doc_freq,
            num_docs: self.num_docs,
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn id(&self, term: &str) -> Option<TokenId> {
        self.index.get(term).copied()
    }

    pub fn term(&self, id: TokenId) -> Option<&str> {
        self.terms.get(id).map(String::as_str)
    }

    /// Encode a token sequence as ids, dropping out-of-vocabulary tokens.
    /// For in-pipeline documents every token is in-vocabulary by
    /// construction (unless pruning removed it).
    pub fn encode_ids(&self, tokens: &[String]) -> Vec<TokenId> {
        tokens.iter().filter_map(|t| self.id(t)).collect()
    }

    /// Encode a token sequence as a sparse bag-of-words, sorted by id.
    pub fn encode_bow(&self, tokens: &[String]) -> Vec<(TokenId, u32)> {
        let mut counts: HashMap<TokenId, u32> = HashMap::new();
        for id in self.encode_ids(tokens) {
            *counts.entry(id).or_insert(0) += 1;
        }
        let mut bow: Vec<(TokenId, u32)> = counts.into_iter().collect();
        bow.sort_unstable_by_key(|&(id, _)| id);
        bow
    }
}

// Unit tests for tokenization and vocabulary handling.
//
// Exercises the public text API: stop-word filtering, token length rules,
// first-seen id assignment, encoding idempotence, and document-frequency
// pruning.

use std::collections::HashSet;

use murmur::text::{stopwords, Tokenizer, Vocabulary};

fn tokenizer_with(words: &[&str]) -> Tokenizer {
    Tokenizer::new(words.iter().map(|w| w.to_string()).collect())
}

fn to_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

// ============================================================
// Tokenizer — filtering rules
// ============================================================

#[test]
fn tokenizer_is_pure_and_deterministic() {
    let a = tokenizer_with(&["the"]);
    let b = tokenizer_with(&["the"]);
    let text = "The shipping was faster than the estimate";
    assert_eq!(a.tokenize(text), b.tokenize(text));
    assert_eq!(a.tokenize(text), a.tokenize(text));
}

#[test]
fn tokenizer_drops_configured_stopwords_only() {
    let with_stop = tokenizer_with(&["delivery"]);
    let without = tokenizer_with(&[]);
    let text = "delivery arrived quickly";
    assert_eq!(with_stop.tokenize(text), vec!["arrived", "quickly"]);
    assert_eq!(without.tokenize(text), vec!["delivery", "arrived", "quickly"]);
}

#[test]
fn tokenizer_drops_single_character_tokens() {
    let t = tokenizer_with(&[]);
    assert_eq!(t.tokenize("I bought a TV 4 u"), vec!["bought", "tv"]);
}

#[test]
fn tokenizer_empty_input_is_empty_not_error() {
    let t = tokenizer_with(&[]);
    assert!(t.tokenize("").is_empty());
    assert!(t.tokenize("...!?").is_empty());
}

#[test]
fn builtin_stopword_set_feeds_tokenizer() {
    let t = Tokenizer::new(stopwords::builtin());
    let tokens = t.tokenize("the price and the quality");
    assert_eq!(tokens, vec!["price", "quality"]);
}

#[test]
fn stopword_set_is_an_explicit_value_not_global_state() {
    // Two tokenizers with different sets coexist in one process
    let narrow = Tokenizer::new(HashSet::new());
    let wide = tokenizer_with(&["price", "quality"]);
    let text = "price quality service";
    assert_eq!(narrow.tokenize(text).len(), 3);
    assert_eq!(wide.tokenize(text), vec!["service"]);
}

// ============================================================
// Vocabulary — ids, encoding, pruning
// ============================================================

#[test]
fn vocabulary_assigns_stable_first_seen_ids() {
    let sequences = vec![to_tokens("beta alpha"), to_tokens("alpha gamma")];
    let vocab = Vocabulary::build(&sequences);
    assert_eq!(vocab.len(), 3);
    assert_eq!(vocab.id("beta"), Some(0));
    assert_eq!(vocab.id("alpha"), Some(1));
    assert_eq!(vocab.id("gamma"), Some(2));
    assert_eq!(vocab.term(1), Some("alpha"));
}

#[test]
fn encoding_same_tokens_twice_gives_same_bow() {
    let sequences = vec![to_tokens("red green red blue")];
    let vocab = Vocabulary::build(&sequences);
    let tokens = to_tokens("blue red red green");
    assert_eq!(vocab.encode_bow(&tokens), vocab.encode_bow(&tokens));
    assert_eq!(vocab.encode_bow(&tokens), vec![(0, 2), (1, 1), (2, 1)]);
}

#[test]
fn out_of_sample_tokens_are_dropped_in_encoding() {
    let vocab = Vocabulary::build(&[to_tokens("known tokens only")]);
    let bow = vocab.encode_bow(&to_tokens("known unknown mystery"));
    assert_eq!(bow.len(), 1);
    assert_eq!(bow[0], (vocab.id("known").unwrap(), 1));
}

#[test]
fn every_bow_id_resolves_through_the_vocabulary() {
    let sequences = vec![
        to_tokens("service was helpful"),
        to_tokens("helpful support staff"),
    ];
    let vocab = Vocabulary::build(&sequences);
    for seq in &sequences {
        for (id, _) in vocab.encode_bow(seq) {
            assert!(vocab.term(id).is_some(), "dangling token id {id}");
        }
    }
}

#[test]
fn pruning_respects_both_bounds() {
    let sequences = vec![
        to_tokens("everywhere once"),
        to_tokens("everywhere twice"),
        to_tokens("everywhere twice"),
    ];
    let vocab = Vocabulary::build(&sequences).prune(2, 0.67);
    // "everywhere" df=3/3 exceeds 0.67; "once" df=1 below 2; "twice" df=2 kept
    assert_eq!(vocab.len(), 1);
    assert_eq!(vocab.id("twice"), Some(0));
    assert_eq!(vocab.id("everywhere"), None);
    assert_eq!(vocab.id("once"), None);
}

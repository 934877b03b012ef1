// Unit tests for topic-model training, inference, and evaluation
// invariants: probability-vector validity, seed reproducibility, stable
// tie-breaking, degenerate-corpus rejection, and metric ranges.

use murmur::classify::dominant_topic;
use murmur::text::Vocabulary;
use murmur::topics::{evaluate, train, TrainConfig};

/// Two disjoint word groups so a K=2 model has an obvious solution.
fn separated_docs() -> (Vec<Vec<usize>>, usize) {
    let docs = vec![
        vec![0, 1, 2, 0, 1, 2, 0],
        vec![1, 2, 0, 1, 2],
        vec![0, 2, 1, 0],
        vec![3, 4, 5, 3, 4, 5, 3],
        vec![4, 5, 3, 4, 5],
        vec![3, 5, 4, 3],
    ];
    (docs, 6)
}

// ============================================================
// Training invariants
// ============================================================

#[test]
fn phi_rows_and_theta_vectors_sum_to_one() {
    let (docs, v) = separated_docs();
    let model = train(docs, v, TrainConfig::new(3, 25, 42)).unwrap();

    for t in 0..model.num_topics() {
        let row = model.word_distribution(t);
        let sum: f64 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "phi row {t} sums to {sum}");
        assert!(row.iter().all(|&p| p >= 0.0), "negative probability in row {t}");
    }
    for d in 0..model.num_docs() {
        let dist = model.doc_distribution(d);
        let sum: f64 = dist.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "theta {d} sums to {sum}");
    }
}

#[test]
fn identical_seeds_give_identical_models() {
    let (docs, v) = separated_docs();
    let a = train(docs.clone(), v, TrainConfig::new(2, 15, 99)).unwrap();
    let b = train(docs, v, TrainConfig::new(2, 15, 99)).unwrap();
    for t in 0..2 {
        assert_eq!(a.word_distribution(t), b.word_distribution(t));
    }
}

#[test]
fn topic_count_is_fixed_by_configuration() {
    let (docs, v) = separated_docs();
    for k in [1, 2, 4] {
        let model = train(docs.clone(), v, TrainConfig::new(k, 10, 42)).unwrap();
        assert_eq!(model.num_topics(), k);
        for d in 0..model.num_docs() {
            assert_eq!(model.doc_distribution(d).len(), k);
        }
    }
}

#[test]
fn empty_corpus_fails_before_training() {
    assert!(train(vec![], 5, TrainConfig::new(2, 10, 42)).is_err());
    assert!(train(vec![vec![0]], 0, TrainConfig::new(2, 10, 42)).is_err());
    assert!(train(vec![vec![], vec![]], 5, TrainConfig::new(2, 10, 42)).is_err());
}

// ============================================================
// Dominant-topic selection
// ============================================================

#[test]
fn dominant_topic_is_deterministic_on_ties() {
    assert_eq!(dominant_topic(&[0.5, 0.5]), 0);
    assert_eq!(dominant_topic(&[0.2, 0.4, 0.4]), 1);
    assert_eq!(dominant_topic(&[1.0]), 0);
}

#[test]
fn assigned_topics_are_always_in_range() {
    let (docs, v) = separated_docs();
    let k = 3;
    let model = train(docs.clone(), v, TrainConfig::new(k, 20, 42)).unwrap();
    for doc in &docs {
        let bow: Vec<(usize, u32)> = doc.iter().map(|&w| (w, 1)).collect();
        if let Some(dist) = model.infer(&bow) {
            let topic = dominant_topic(&dist);
            assert!(topic < k, "topic {topic} out of [0, {k})");
        }
    }
}

#[test]
fn inference_on_empty_bow_yields_no_topic() {
    let (docs, v) = separated_docs();
    let model = train(docs, v, TrainConfig::new(2, 10, 42)).unwrap();
    assert!(model.infer(&[]).is_none());
    assert!(model.infer(&[(999, 2)]).is_none(), "out-of-vocabulary only");
}

// ============================================================
// Evaluation metrics
// ============================================================

#[test]
fn metrics_land_in_documented_ranges() {
    let (docs, v) = separated_docs();
    let model = train(docs.clone(), v, TrainConfig::new(2, 25, 42)).unwrap();
    let metrics = evaluate::evaluate(&model, &docs);

    assert!((-1.0..=1.0).contains(&metrics.coherence));
    assert!(metrics.log_perplexity < 0.0);
    assert!(metrics.log_perplexity.is_finite());
}

#[test]
fn better_fitting_model_has_higher_log_likelihood() {
    let (docs, v) = separated_docs();
    let trained = train(docs.clone(), v, TrainConfig::new(2, 40, 42)).unwrap();
    let barely = train(docs.clone(), v, TrainConfig::new(2, 1, 7)).unwrap();

    let fit = evaluate::evaluate(&trained, &docs).log_perplexity;
    let rough = evaluate::evaluate(&barely, &docs).log_perplexity;
    assert!(
        fit >= rough,
        "40-pass fit {fit} should be at least the 1-pass fit {rough}"
    );
}

#[test]
fn top_words_expose_the_learned_structure() {
    let (docs, v) = separated_docs();
    let model = train(docs.clone(), v, TrainConfig::new(2, 50, 42)).unwrap();
    let vocab = Vocabulary::build(&[vec![
        "ship".to_string(),
        "box".to_string(),
        "mail".to_string(),
        "tax".to_string(),
        "fee".to_string(),
        "cost".to_string(),
    ]]);

    let tops = model.top_words(&vocab, 3);
    assert_eq!(tops.len(), 2);
    for words in &tops {
        assert_eq!(words.len(), 3);
        // Probabilities descend
        assert!(words[0].1 >= words[1].1 && words[1].1 >= words[2].1);
    }

    // With disjoint training groups, the two topics' top-3 word sets differ
    let set_a: Vec<&str> = tops[0].iter().map(|(w, _)| w.as_str()).collect();
    let set_b: Vec<&str> = tops[1].iter().map(|(w, _)| w.as_str()).collect();
    assert_ne!(set_a, set_b);
}

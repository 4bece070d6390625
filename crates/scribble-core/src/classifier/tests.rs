//! Tests for the classifier, network, and ranking

use super::*;
use crate::config::TrainingDefaults;
use crate::synth::{PatternGenerator, SampleGenerator};

/// Small, fast, deterministic training setup for tests.
fn test_defaults() -> TrainingDefaults {
    TrainingDefaults {
        samples_per_class: 30,
        epochs: 8,
        batch_size: 32,
        learning_rate: 0.1,
        hidden_units: 32,
        noise_rate: 0.05,
        noise_level: 0.3,
        seed: Some(42),
    }
}

// ========================================================================
// GlyphMode Tests
// ========================================================================

#[test]
fn test_mode_alphabets() {
    assert_eq!(GlyphMode::Digits.class_count(), 10);
    assert_eq!(GlyphMode::Letters.class_count(), 26);

    assert_eq!(GlyphMode::Digits.label(0), '0');
    assert_eq!(GlyphMode::Digits.label(9), '9');
    assert_eq!(GlyphMode::Letters.label(0), 'A');
    assert_eq!(GlyphMode::Letters.label(25), 'Z');
}

// ========================================================================
// Network Tests
// ========================================================================

#[test]
fn test_untrained_network_outputs_distribution() {
    let mut rng = StdRng::seed_from_u64(1);
    let network = Network::new(FEATURE_LEN, 16, 10, &mut rng);

    let probs = network.predict(&vec![0.5; FEATURE_LEN]).unwrap();
    assert_eq!(probs.len(), 10);
    assert!(probs.iter().all(|&p| p >= 0.0), "probabilities must be non-negative");

    let sum: f32 = probs.iter().sum();
    assert!((sum - 1.0).abs() < 1e-4, "probabilities must sum to ~1, got {}", sum);
}

#[test]
fn test_predict_rejects_wrong_feature_length() {
    let mut rng = StdRng::seed_from_u64(1);
    let network = Network::new(FEATURE_LEN, 16, 10, &mut rng);

    assert!(network.predict(&[0.0; 10]).is_err());
    assert!(network.predict(&vec![0.0; FEATURE_LEN + 1]).is_err());
}

#[test]
fn test_training_learns_the_synthetic_patterns() {
    let defaults = test_defaults();
    let classifier = Classifier::train(GlyphMode::Digits, &defaults).unwrap();

    // Evaluate on freshly generated samples from a different seed.
    let generator = PatternGenerator::new(GlyphMode::Digits, 0.05, 0.3);
    let (features, _labels) = build_training_set(&generator, 10, 777).unwrap();

    let mut correct = 0;
    for i in 0..features.nrows() {
        let row: Vec<f32> = features.row(i).to_vec();
        let expected = GlyphMode::Digits.label(i % 10);
        let top = &classifier.predict(&row).unwrap()[0];
        if top.label == expected {
            correct += 1;
        }
    }

    let accuracy = correct as f32 / features.nrows() as f32;
    assert!(
        accuracy > 0.7,
        "classifier should learn the fixed patterns, accuracy = {}",
        accuracy
    );
}

#[test]
fn test_classifier_recognizes_clean_vertical_line_as_one() {
    let classifier = Classifier::train(GlyphMode::Digits, &test_defaults()).unwrap();

    let generator = PatternGenerator::new(GlyphMode::Digits, 0.0, 0.0);
    let mut rng = StdRng::seed_from_u64(5);
    let clean_one = generator.generate(1, &mut rng);

    let ranked = classifier.predict(&clean_one).unwrap();
    assert_eq!(ranked.len(), 10);
    assert_eq!(
        ranked[0].label, '1',
        "clean '1' pattern should rank first, got {:?}",
        &ranked[..3]
    );
}

// ========================================================================
// Ranking Tests
// ========================================================================

#[test]
fn test_ranking_sorts_descending() {
    let probs = [0.1, 0.6, 0.05, 0.25, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let ranked = rank_predictions(&probs, GlyphMode::Digits);

    assert_eq!(ranked[0].label, '1');
    assert_eq!(ranked[1].label, '3');
    assert_eq!(ranked[2].label, '0');
    for pair in ranked.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn test_ranking_breaks_ties_by_alphabet_order() {
    // All equal: the stable sort must leave the labels in alphabet order.
    let probs = [0.1; 10];
    let ranked = rank_predictions(&probs, GlyphMode::Digits);
    let labels: String = ranked.iter().map(|p| p.label).collect();
    assert_eq!(labels, "0123456789");
}

#[test]
fn test_ranking_covers_the_full_alphabet() {
    let probs = vec![1.0 / 26.0; 26];
    let ranked = rank_predictions(&probs, GlyphMode::Letters);
    assert_eq!(ranked.len(), 26);
    assert_eq!(ranked[0].label, 'A');
    assert_eq!(ranked[25].label, 'Z');
}

//! Synthetic training data generation
//!
//! The classifiers never see real handwriting: every training sample is a
//! hand-coded glyph pattern with injected noise. The generator sits behind a
//! trait so it can later be swapped for a real dataset without touching the
//! normalization core or the network.

mod glyphs;


use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;

use crate::classifier::GlyphMode;
use crate::pipeline::FEATURE_LEN;

/// Minimum number of samples before dataset assembly goes parallel.
const PARALLEL_THRESHOLD: usize = 512;

/// Source of labeled training samples.
///
/// Implementations produce one flattened canonical image (784 values in
/// [0, 1]) per call for the requested class index.
pub trait SampleGenerator: Sync {
    /// Number of distinct classes this generator can render.
    fn class_count(&self) -> usize;

    /// Render one sample for `class`.
    fn generate(&self, class: usize, rng: &mut dyn RngCore) -> Vec<f32>;
}

/// Pattern-based generator backed by the hand-coded glyph renderers.
#[derive(Debug, Clone)]
pub struct PatternGenerator {
    mode: GlyphMode,

    /// Probability that any given cell is replaced by noise
    noise_rate: f32,

    /// Injected noise is uniform in [0, noise_level)
    noise_level: f32,
}

impl PatternGenerator {
    pub fn new(mode: GlyphMode, noise_rate: f32, noise_level: f32) -> Self {
        Self {
            mode,
            noise_rate: noise_rate.clamp(0.0, 1.0),
            noise_level: noise_level.clamp(0.0, 1.0),
        }
    }
}

impl SampleGenerator for PatternGenerator {
    fn class_count(&self) -> usize {
        self.mode.class_count()
    }

    fn generate(&self, class: usize, rng: &mut dyn RngCore) -> Vec<f32> {
        let mut image = vec![0.0f32; FEATURE_LEN];
        match self.mode {
            GlyphMode::Digits => glyphs::draw_digit(&mut image, class),
            GlyphMode::Letters => glyphs::draw_letter(&mut image, class),
        }

        // Inject noise so the network never sees two identical samples.
        for value in image.iter_mut() {
            if rng.gen::<f32>() < self.noise_rate {
                *value = rng.gen::<f32>() * self.noise_level;
            }
        }

        image
    }
}

/// Assemble a balanced training set: `samples_per_class` samples for every
/// class, with one-hot labels.
///
/// Returns `(features, labels)` where features is `[n, 784]` and labels is
/// `[n, class_count]`. Each sample derives its RNG from `seed` and its own
/// index, so results are reproducible and independent of how the work is
/// split across threads.
pub fn build_training_set<G: SampleGenerator>(
    generator: &G,
    samples_per_class: usize,
    seed: u64,
) -> Result<(Array2<f32>, Array2<f32>), String> {
    let class_count = generator.class_count();
    let total = samples_per_class
        .checked_mul(class_count)
        .ok_or_else(|| "training set size overflow".to_string())?;
    if total == 0 {
        return Err("training set would be empty".to_string());
    }

    let render = |i: usize| -> Vec<f32> {
        let class = i % class_count;
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
        generator.generate(class, &mut rng)
    };

    let samples: Vec<Vec<f32>> = if total >= PARALLEL_THRESHOLD {
        (0..total).into_par_iter().map(render).collect()
    } else {
        (0..total).map(render).collect()
    };

    let mut features = Array2::<f32>::zeros((total, FEATURE_LEN));
    let mut labels = Array2::<f32>::zeros((total, class_count));

    for (i, sample) in samples.into_iter().enumerate() {
        if sample.len() != FEATURE_LEN {
            return Err(format!(
                "generator produced {} values for class {}, expected {}",
                sample.len(),
                i % class_count,
                FEATURE_LEN
            ));
        }
        for (j, value) in sample.into_iter().enumerate() {
            features[[i, j]] = value;
        }
        labels[[i, i % class_count]] = 1.0;
    }

    Ok((features, labels))
}

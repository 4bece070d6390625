//! Glyph classification
//!
//! A startup-trained classifier per mode: one for digits, one for letters.
//! The mode selects the label alphabet and class count; nothing else about
//! the network changes between the two.

mod network;
mod ranking;

#[cfg(test)]
mod tests;

pub use network::Network;
pub use ranking::{rank_predictions, Prediction};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TrainingDefaults;
use crate::pipeline::FEATURE_LEN;
use crate::synth::{build_training_set, PatternGenerator};
use crate::verbose_println;

/// Which label alphabet a classifier works over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphMode {
    /// Digits "0".."9"
    Digits,
    /// Letters "A".."Z"
    Letters,
}

impl GlyphMode {
    /// Number of classes in this mode's alphabet.
    pub fn class_count(self) -> usize {
        match self {
            Self::Digits => 10,
            Self::Letters => 26,
        }
    }

    /// Display label for a class index.
    pub fn label(self, class: usize) -> char {
        match self {
            Self::Digits => (b'0' + (class as u8 % 10)) as char,
            Self::Letters => (b'A' + (class as u8 % 26)) as char,
        }
    }
}

/// A trained classifier for one glyph mode.
pub struct Classifier {
    mode: GlyphMode,
    network: Network,
}

impl Classifier {
    /// Generate a synthetic training set and train a fresh network on it.
    pub fn train(mode: GlyphMode, defaults: &TrainingDefaults) -> Result<Self, String> {
        let seed = defaults.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);

        let generator = PatternGenerator::new(mode, defaults.noise_rate, defaults.noise_level);
        let (features, labels) = build_training_set(&generator, defaults.samples_per_class, seed)?;

        let mut network =
            Network::new(FEATURE_LEN, defaults.hidden_units, mode.class_count(), &mut rng);
        network.train(&features, &labels, defaults, &mut rng)?;

        verbose_println!(
            "[scribble] trained {:?} classifier: {} samples, training accuracy {:.1}%",
            mode,
            features.nrows(),
            network.accuracy(&features, &labels) * 100.0
        );

        Ok(Self { mode, network })
    }

    pub fn mode(&self) -> GlyphMode {
        self.mode
    }

    /// Raw probability distribution over this mode's alphabet.
    pub fn probabilities(&self, features: &[f32]) -> Result<Vec<f32>, String> {
        self.network.predict(features)
    }

    /// Classify a feature vector into a ranked (label, confidence) list.
    pub fn predict(&self, features: &[f32]) -> Result<Vec<Prediction>, String> {
        let probs = self.network.predict(features)?;
        Ok(rank_predictions(&probs, self.mode))
    }
}

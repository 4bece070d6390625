//! Scribble Core Library
//!
//! Core functionality for the Scribble glyph sketchpad: converting a freehand
//! ink drawing into a canonical 28x28 feature vector and classifying it as a
//! digit (0-9) or letter (A-Z) with a small network trained at startup on
//! synthetic samples. All processing is in-memory and per-session.

pub mod classifier;
pub mod config;
pub mod pipeline;
pub mod raster;
pub mod session;
pub mod synth;

// Re-export commonly used types
pub use classifier::{rank_predictions, Classifier, GlyphMode, Prediction};
pub use pipeline::{
    find_bounding_box, image_to_features, normalize_to_canonical, preprocess, BoundingBox,
    PreprocessedGlyph, CANONICAL_SIZE, FEATURE_LEN,
};
pub use raster::RasterImage;
pub use session::{PredictionTicket, Session};
pub use synth::{build_training_set, PatternGenerator, SampleGenerator};

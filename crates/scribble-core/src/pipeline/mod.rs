//! Glyph normalization pipeline
//!
//! Converts a freehand, arbitrarily-scaled ink drawing into a canonical
//! 28x28 centered grayscale representation and a flattened feature vector.
//!
//! This module is organized into submodules:
//! - `bounding_box`: Tight bounding box of all inked pixels
//! - `normalize`: Crop, center, pad, and rescale into the canonical image
//! - `tensorize`: Grayscale + invert + normalize into a feature vector

mod bounding_box;
mod normalize;
mod tensorize;

#[cfg(test)]
mod tests;

pub use bounding_box::{find_bounding_box, BoundingBox};
pub use normalize::normalize_to_canonical;
pub use tensorize::image_to_features;

use crate::raster::RasterImage;

/// Side length of the canonical image.
pub const CANONICAL_SIZE: u32 = 28;

/// Length of the flattened feature vector (one entry per canonical pixel).
pub const FEATURE_LEN: usize = (CANONICAL_SIZE * CANONICAL_SIZE) as usize;

/// Margin added around the bounding box before rescaling (20%).
pub const PADDING_FACTOR: f32 = 1.2;

/// Result of one full preprocessing pass over the drawing surface.
pub struct PreprocessedGlyph {
    /// Canonical 28x28 image for preview display
    pub canonical: RasterImage,

    /// Flattened feature vector, 784 values in [0, 1]
    pub features: Vec<f32>,

    /// Bounding box the pass was computed from (`None` for a blank canvas)
    pub bounds: Option<BoundingBox>,
}

/// Run the full locate -> normalize -> tensorize pass.
///
/// One pass runs to completion per stroke update; every input, including a
/// fully blank canvas, produces a well-formed canonical image and feature
/// vector rather than an error.
pub fn preprocess(image: &RasterImage) -> PreprocessedGlyph {
    let bounds = find_bounding_box(image);
    let canonical = normalize_to_canonical(image, bounds);
    let features = image_to_features(&canonical);
    PreprocessedGlyph {
        canonical,
        features,
        bounds,
    }
}

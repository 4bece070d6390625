//! Feature extraction
//!
//! Flattens a canonical image into the numeric vector the classifier
//! consumes: one value per pixel, row-major, ink near 1.0 and background
//! at 0.0.

use crate::raster::RasterImage;

/// Flatten an image into per-pixel features.
///
/// Each pixel becomes `(255 - grayscale) / 255` where grayscale is the mean
/// of R, G, and B (alpha ignored). The inverted polarity maps ink (dark) to
/// values near 1.0 and the white background to exactly 0.0, the convention
/// the classifier is trained with. For a canonical 28x28 input the result is
/// always 784 values, each in [0, 1].
pub fn image_to_features(image: &RasterImage) -> Vec<f32> {
    image
        .data
        .chunks_exact(4)
        .map(|px| {
            let grayscale = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
            (255.0 - grayscale) / 255.0
        })
        .collect()
}

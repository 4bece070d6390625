//! Processing bridge to scribble-core
//!
//! This module provides the interface between the web UI and the core
//! pipeline. It converts canvas pixel data to and from `RasterImage` values
//! and runs startup training for both classifiers.

use scribble_core::config::{ScribbleConfig, TrainingDefaults};
use scribble_core::{Classifier, GlyphMode, RasterImage, CANONICAL_SIZE};

/// Wrap raw canvas RGBA bytes as a drawing snapshot.
pub fn raster_from_canvas_bytes(
    width: u32,
    height: u32,
    data: Vec<u8>,
) -> Result<RasterImage, String> {
    RasterImage::from_rgba(width, height, data)
}

/// Upscale the canonical image with nearest-neighbor magnification so each
/// source pixel shows as a crisp block. Returns the scaled side length and
/// RGBA bytes ready for `ImageData`.
pub fn preview_rgba(canonical: &RasterImage, scale: u32) -> (u32, Vec<u8>) {
    let scale = scale.max(1);
    let side = CANONICAL_SIZE * scale;
    let mut rgba = Vec::with_capacity((side * side * 4) as usize);

    for y in 0..side {
        for x in 0..side {
            let px = canonical.pixel(x / scale, y / scale);
            rgba.extend_from_slice(&px);
        }
    }

    (side, rgba)
}

/// Training defaults for in-browser startup training.
///
/// There is no filesystem in the browser, so this skips the YAML candidate
/// search and uses the built-in defaults directly.
fn training_defaults() -> TrainingDefaults {
    ScribbleConfig::default().training
}

/// Train both classifiers on synthetic data.
///
/// Runs once at startup; the UI shows a training indicator until this
/// returns.
pub fn train_classifier_pair() -> Result<(Classifier, Classifier), String> {
    let defaults = training_defaults();
    let digits = Classifier::train(GlyphMode::Digits, &defaults)?;
    let letters = Classifier::train(GlyphMode::Letters, &defaults)?;
    Ok((digits, letters))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_rgba_scales_each_pixel_to_a_block() {
        let mut canonical = RasterImage::blank(CANONICAL_SIZE, CANONICAL_SIZE);
        let idx = canonical.pixel_index(0, 0);
        canonical.data[idx] = 0;
        canonical.data[idx + 1] = 0;
        canonical.data[idx + 2] = 0;

        let (side, rgba) = preview_rgba(&canonical, 5);
        assert_eq!(side, CANONICAL_SIZE * 5);
        assert_eq!(rgba.len(), (side * side * 4) as usize);

        // The top-left 5x5 block is the magnified dark pixel.
        for y in 0..5u32 {
            for x in 0..5u32 {
                let i = ((y * side + x) * 4) as usize;
                assert_eq!(rgba[i], 0, "block pixel ({}, {}) should be dark", x, y);
            }
        }
        // The next block over is background.
        let i = (5 * 4) as usize;
        assert_eq!(rgba[i], 255);
    }

    #[test]
    fn test_raster_from_canvas_bytes_validates_length() {
        assert!(raster_from_canvas_bytes(10, 10, vec![255; 400]).is_ok());
        assert!(raster_from_canvas_bytes(10, 10, vec![255; 399]).is_err());
    }
}

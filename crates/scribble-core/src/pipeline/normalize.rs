//! Canonical image normalization
//!
//! Crops the drawing to its bounding box, adds a 20% margin, and rescales the
//! result isotropically into a white-filled 28x28 canonical image. The square
//! source region is stretched to fill the full destination, never letterboxed.

use super::bounding_box::BoundingBox;
use super::{CANONICAL_SIZE, PADDING_FACTOR};
use crate::raster::RasterImage;

/// Produce the canonical 28x28 image for a drawing and its bounding box.
///
/// An empty box (blank canvas) yields a solid white canonical image.
pub fn normalize_to_canonical(image: &RasterImage, bounds: Option<BoundingBox>) -> RasterImage {
    let Some(bounds) = bounds else {
        return RasterImage::blank(CANONICAL_SIZE, CANONICAL_SIZE);
    };

    let content_width = bounds.width() as f32;
    let content_height = bounds.height() as f32;
    let max_dim = content_width.max(content_height);

    // 20% margin around the content, never exceeding the smaller source
    // dimension so the region cannot start outside the canvas.
    let min_source = image.width.min(image.height) as f32;
    let padded_size = (max_dim * PADDING_FACTOR).min(min_source);

    // Midpoint of the bounding box, not of the canvas.
    let center_x = (bounds.left + bounds.right) as f32 / 2.0;
    let center_y = (bounds.top + bounds.bottom) as f32 / 2.0;

    // Only the origin is clamped at zero; overflow past the right/bottom edge
    // is handled by the min() on the extent. Content hugging the right or
    // bottom edge therefore samples a region that sits slightly off center.
    let source_x = (center_x - padded_size / 2.0).max(0.0);
    let source_y = (center_y - padded_size / 2.0).max(0.0);
    let source_w = padded_size.min(image.width as f32 - source_x);
    let source_h = padded_size.min(image.height as f32 - source_y);

    resample_region(image, source_x, source_y, source_w, source_h)
}

/// Stretch the given source region into a fresh 28x28 image with bilinear
/// sampling. Every destination pixel receives a sample, so the white fill
/// only shows through for degenerate regions.
fn resample_region(
    image: &RasterImage,
    source_x: f32,
    source_y: f32,
    source_w: f32,
    source_h: f32,
) -> RasterImage {
    let mut out = RasterImage::blank(CANONICAL_SIZE, CANONICAL_SIZE);

    let span_x = (source_w - 1.0).max(0.0);
    let span_y = (source_h - 1.0).max(0.0);

    for y in 0..CANONICAL_SIZE {
        for x in 0..CANONICAL_SIZE {
            let src_x = source_x + (x as f32 / CANONICAL_SIZE as f32) * span_x;
            let src_y = source_y + (y as f32 / CANONICAL_SIZE as f32) * span_y;

            let rgba = sample_bilinear(image, src_x, src_y);
            let idx = out.pixel_index(x, y);
            out.data[idx..idx + 4].copy_from_slice(&rgba);
        }
    }

    out
}

/// Bilinear interpolation of all four channels at a fractional coordinate.
fn sample_bilinear(image: &RasterImage, fx: f32, fy: f32) -> [u8; 4] {
    let max_x = image.width - 1;
    let max_y = image.height - 1;

    let x0 = (fx.floor() as u32).min(max_x);
    let y0 = (fy.floor() as u32).min(max_y);
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);

    let tx = fx - x0 as f32;
    let ty = fy - y0 as f32;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut rgba = [0u8; 4];
    for c in 0..4 {
        let value = p00[c] as f32 * (1.0 - tx) * (1.0 - ty)
            + p10[c] as f32 * tx * (1.0 - ty)
            + p01[c] as f32 * (1.0 - tx) * ty
            + p11[c] as f32 * tx * ty;
        rgba[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    rgba
}

//! Tests for the glyph normalization pipeline
//!
//! Covers the blank-canvas path, output shape guarantees, boundary clamping,
//! and the end-to-end stroke scenarios.

use super::*;
use crate::raster::RasterImage;

/// Build an image with the given pixels painted black.
fn image_with_ink(width: u32, height: u32, pixels: &[(u32, u32)]) -> RasterImage {
    let mut img = RasterImage::blank(width, height);
    for &(x, y) in pixels {
        paint_black(&mut img, x, y);
    }
    img
}

/// Paint a filled black rectangle (inclusive bounds).
fn fill_rect(img: &mut RasterImage, left: u32, top: u32, right: u32, bottom: u32) {
    for y in top..=bottom {
        for x in left..=right {
            paint_black(img, x, y);
        }
    }
}

fn paint_black(img: &mut RasterImage, x: u32, y: u32) {
    let idx = img.pixel_index(x, y);
    img.data[idx] = 0;
    img.data[idx + 1] = 0;
    img.data[idx + 2] = 0;
}

fn feature_at(features: &[f32], x: u32, y: u32) -> f32 {
    features[(y * CANONICAL_SIZE + x) as usize]
}

// ========================================================================
// Blank Canvas Tests
// ========================================================================

#[test]
fn test_blank_canvas_has_no_bounding_box() {
    let img = RasterImage::blank(280, 280);
    assert_eq!(find_bounding_box(&img), None);
}

#[test]
fn test_blank_canvas_normalizes_to_white() {
    let img = RasterImage::blank(280, 280);
    let canonical = normalize_to_canonical(&img, find_bounding_box(&img));

    assert_eq!(canonical.width, CANONICAL_SIZE);
    assert_eq!(canonical.height, CANONICAL_SIZE);
    assert!(
        canonical.data.iter().all(|&b| b == 255),
        "blank canvas must yield a solid white canonical image"
    );
}

#[test]
fn test_blank_canvas_tensorizes_to_zero() {
    let glyph = preprocess(&RasterImage::blank(100, 100));
    assert_eq!(glyph.features.len(), FEATURE_LEN);
    assert!(
        glyph.features.iter().all(|&f| f == 0.0),
        "white background must map to exactly 0.0"
    );
}

// ========================================================================
// Bounding Box Tests
// ========================================================================

#[test]
fn test_single_pixel_at_origin_is_not_empty() {
    let img = image_with_ink(50, 50, &[(0, 0)]);
    let bounds = find_bounding_box(&img).expect("one inked pixel is content, not empty");

    assert_eq!(
        bounds,
        BoundingBox {
            left: 0,
            top: 0,
            right: 0,
            bottom: 0
        }
    );
    assert_eq!(bounds.width(), 1);
    assert_eq!(bounds.height(), 1);

    // Output stays well-formed even for this degenerate corner case.
    let canonical = normalize_to_canonical(&img, Some(bounds));
    assert_eq!(canonical.width, CANONICAL_SIZE);
    assert_eq!(canonical.height, CANONICAL_SIZE);
}

#[test]
fn test_bounding_box_is_tight() {
    let mut img = RasterImage::blank(100, 80);
    fill_rect(&mut img, 12, 20, 40, 55);
    let bounds = find_bounding_box(&img).unwrap();

    assert_eq!(bounds.left, 12);
    assert_eq!(bounds.top, 20);
    assert_eq!(bounds.right, 40);
    assert_eq!(bounds.bottom, 55);
}

#[test]
fn test_bounding_box_uses_red_channel_only() {
    // A pixel that is dark in green/blue but pure red=255 is background.
    let mut img = RasterImage::blank(10, 10);
    let idx = img.pixel_index(5, 5);
    img.data[idx + 1] = 0;
    img.data[idx + 2] = 0;
    assert_eq!(find_bounding_box(&img), None);

    // Red one step below 255 is already foreground.
    img.data[idx] = 254;
    assert!(find_bounding_box(&img).is_some());
}

#[test]
fn test_bounding_box_spans_disjoint_strokes() {
    // Two dots of a colon: the box covers both, never one alone.
    let mut img = RasterImage::blank(200, 200);
    fill_rect(&mut img, 95, 60, 104, 69);
    fill_rect(&mut img, 95, 130, 104, 139);

    let bounds = find_bounding_box(&img).unwrap();
    assert_eq!(bounds.top, 60);
    assert_eq!(bounds.bottom, 139);
    assert_eq!(bounds.left, 95);
    assert_eq!(bounds.right, 104);
}

// ========================================================================
// Output Shape Guarantees
// ========================================================================

#[test]
fn test_output_is_always_canonical_size() {
    let cases: &[(u32, u32)] = &[(1, 1), (28, 28), (280, 280), (17, 301), (640, 480)];
    for &(w, h) in cases {
        let mut img = RasterImage::blank(w, h);
        paint_black(&mut img, w / 2, h / 2);

        let glyph = preprocess(&img);
        assert_eq!(glyph.canonical.width, CANONICAL_SIZE, "input {}x{}", w, h);
        assert_eq!(glyph.canonical.height, CANONICAL_SIZE, "input {}x{}", w, h);
        assert_eq!(glyph.features.len(), FEATURE_LEN, "input {}x{}", w, h);
    }
}

#[test]
fn test_features_are_in_unit_range() {
    let mut img = RasterImage::blank(120, 90);
    fill_rect(&mut img, 30, 20, 80, 70);

    let glyph = preprocess(&img);
    for (i, &f) in glyph.features.iter().enumerate() {
        assert!(
            (0.0..=1.0).contains(&f),
            "feature {} out of range: {}",
            i,
            f
        );
    }
}

#[test]
fn test_canonical_blank_is_idempotent() {
    let blank = RasterImage::blank(CANONICAL_SIZE, CANONICAL_SIZE);
    let renormalized = normalize_to_canonical(&blank, find_bounding_box(&blank));
    assert_eq!(renormalized, blank);
}

// ========================================================================
// Tensorization Laws
// ========================================================================

#[test]
fn test_pure_black_tensorizes_to_ones() {
    let mut img = RasterImage::blank(CANONICAL_SIZE, CANONICAL_SIZE);
    fill_rect(&mut img, 0, 0, CANONICAL_SIZE - 1, CANONICAL_SIZE - 1);

    let features = image_to_features(&img);
    assert_eq!(features.len(), FEATURE_LEN);
    assert!(
        features.iter().all(|&f| f == 1.0),
        "pure black must map to exactly 1.0"
    );
}

#[test]
fn test_pure_white_tensorizes_to_zeros() {
    let features = image_to_features(&RasterImage::blank(CANONICAL_SIZE, CANONICAL_SIZE));
    assert!(features.iter().all(|&f| f == 0.0));
}

#[test]
fn test_tensorize_ignores_alpha() {
    let mut img = RasterImage::blank(CANONICAL_SIZE, CANONICAL_SIZE);
    for px in img.data.chunks_exact_mut(4) {
        px[3] = 0; // fully transparent, still white
    }
    let features = image_to_features(&img);
    assert!(features.iter().all(|&f| f == 0.0));
}

// ========================================================================
// End-to-End Scenarios
// ========================================================================

#[test]
fn test_vertical_stroke_is_centered_and_tall() {
    // An 8px-wide vertical stroke from (140, 40) to (140, 240) on the
    // 280x280 drawing surface.
    let mut img = RasterImage::blank(280, 280);
    fill_rect(&mut img, 136, 40, 144, 240);

    let bounds = find_bounding_box(&img).unwrap();
    assert_eq!(bounds.left, 136);
    assert_eq!(bounds.top, 40);
    assert_eq!(bounds.right, 144);
    assert_eq!(bounds.bottom, 240);

    let glyph = preprocess(&img);
    let features = &glyph.features;

    // The bar lands roughly in the middle column and spans most of the
    // canonical height.
    for y in 4..=24 {
        assert!(
            feature_at(features, 14, y) > 0.5,
            "expected ink at (14, {}), got {}",
            y,
            feature_at(features, 14, y)
        );
    }

    // Columns far from the bar stay background.
    for y in 0..CANONICAL_SIZE {
        assert!(
            feature_at(features, 3, y) < 0.1,
            "expected background at (3, {})",
            y
        );
        assert!(
            feature_at(features, 25, y) < 0.1,
            "expected background at (25, {})",
            y
        );
    }

    // Above and below the stroke the column is background again.
    assert!(feature_at(features, 14, 0) < 0.5);
    assert!(feature_at(features, 14, 27) < 0.5);
}

#[test]
fn test_disjoint_strokes_scale_together() {
    // Colon-like drawing: both dots must survive normalization as separate
    // dark regions in the same column.
    let mut img = RasterImage::blank(200, 200);
    fill_rect(&mut img, 95, 60, 104, 69);
    fill_rect(&mut img, 95, 130, 104, 139);

    let glyph = preprocess(&img);
    let features = &glyph.features;

    let column_ink: Vec<f32> = (0..CANONICAL_SIZE)
        .map(|y| {
            (0..CANONICAL_SIZE)
                .map(|x| feature_at(features, x, y))
                .fold(0.0, f32::max)
        })
        .collect();

    let top_dot = column_ink[..14].iter().any(|&v| v > 0.5);
    let bottom_dot = column_ink[14..].iter().any(|&v| v > 0.5);
    let gap = column_ink[12..16].iter().all(|&v| v < 0.3);

    assert!(top_dot, "top dot missing after normalization");
    assert!(bottom_dot, "bottom dot missing after normalization");
    assert!(gap, "dots should stay separated by background");
}

#[test]
fn test_edge_content_is_clamped_not_rejected() {
    // A blob in the bottom-right corner: the padded region would overflow
    // the canvas, so its extent shrinks on that side only.
    let mut img = RasterImage::blank(100, 100);
    fill_rect(&mut img, 90, 90, 99, 99);

    let glyph = preprocess(&img);
    assert_eq!(glyph.canonical.width, CANONICAL_SIZE);
    assert_eq!(glyph.canonical.height, CANONICAL_SIZE);

    let total_ink: f32 = glyph.features.iter().sum();
    assert!(total_ink > 1.0, "blob must survive normalization");

    // The one-sided clamp shifts the content off center toward the
    // bottom-right of the canonical image.
    let mut weighted_x = 0.0;
    let mut weight = 0.0;
    for y in 0..CANONICAL_SIZE {
        for x in 0..CANONICAL_SIZE {
            let f = feature_at(&glyph.features, x, y);
            weighted_x += f * x as f32;
            weight += f;
        }
    }
    let centroid_x = weighted_x / weight;
    assert!(
        centroid_x > 14.0,
        "clamped region should leave the blob right of center, centroid_x = {}",
        centroid_x
    );
}

//! Bounding box location
//!
//! Finds the tight axis-aligned rectangle enclosing all inked pixels of a
//! drawing. Strokes are achromatic (black on white), so only the red channel
//! is inspected: any value below 255 counts as ink. This is a deliberate
//! simplification, not a luminance test.

use crate::raster::{RasterImage, BACKGROUND};

/// Inclusive pixel coordinates of the extremal inked pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    /// Width of the enclosed content in pixels.
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    /// Height of the enclosed content in pixels.
    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

/// True if a red channel value is ink rather than canvas.
#[inline]
fn is_foreground(red: u8) -> bool {
    red < BACKGROUND
}

/// Scan a drawing for the tight bounding box of its ink.
///
/// Returns `None` when no pixel is inked; a blank canvas is the normal
/// resting state of the drawing surface, not an error.
///
/// The four edge scans are independent single passes; fusing them would give
/// an identical result.
pub fn find_bounding_box(image: &RasterImage) -> Option<BoundingBox> {
    let top = (0..image.height).find(|&y| row_has_ink(image, y))?;
    // At least one inked pixel exists, so the remaining scans cannot fail.
    let bottom = (0..image.height).rev().find(|&y| row_has_ink(image, y))?;
    let left = (0..image.width).find(|&x| column_has_ink(image, x))?;
    let right = (0..image.width).rev().find(|&x| column_has_ink(image, x))?;

    Some(BoundingBox {
        left,
        top,
        right,
        bottom,
    })
}

fn row_has_ink(image: &RasterImage, y: u32) -> bool {
    (0..image.width).any(|x| is_foreground(image.red(x, y)))
}

fn column_has_ink(image: &RasterImage, x: u32) -> bool {
    (0..image.height).any(|y| is_foreground(image.red(x, y)))
}

//! Raster image value type
//!
//! The drawing surface hands the pipeline an RGBA bitmap; the normalizer hands
//! back another one. Both are plain owned values, never shared across
//! prediction cycles.

/// Channel value of the white canvas background.
pub const BACKGROUND: u8 = 255;

/// An RGBA raster image (row-major, 4 bytes per pixel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// RGBA pixel data, exactly `width * height * 4` bytes
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Create a solid white (background) image.
    pub fn blank(width: u32, height: u32) -> Self {
        // Every channel of a blank canvas is 255, alpha included.
        let len = (width as usize) * (height as usize) * 4;
        let data = vec![BACKGROUND; len];
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap raw RGBA bytes, validating the buffer-length invariant.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, String> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(format!(
                "RGBA buffer length mismatch: got {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// RGBA quadruple at (x, y). Caller guarantees coordinates are in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.pixel_index(x, y);
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Red channel at (x, y). The foreground test only inspects red.
    #[inline]
    pub fn red(&self, x: u32, y: u32) -> u8 {
        self.data[self.pixel_index(x, y)]
    }
}

//! Square RGB rasters and their PNG encoding
//!
//! A [`Raster`] is the decoded form of a fetched or cached avatar: a square
//! grid of 24-bit pixels, immutable once constructed.

use crate::error::{ChatheadError, ChatheadResult};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

/// A 24-bit RGB color, one channel per byte, no alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// An immutable square pixel grid of dimension `size x size`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    size: u32,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// Build a raster from row-major pixels.
    ///
    /// The pixel count must be exactly `size * size`.
    pub fn from_pixels(size: u32, pixels: Vec<Rgb>) -> ChatheadResult<Self> {
        let expected = size as usize * size as usize;
        if size == 0 || pixels.len() != expected {
            return Err(ChatheadError::Decode(format!(
                "expected {} pixels for a {}x{} raster, got {}",
                expected,
                size,
                size,
                pixels.len()
            )));
        }
        Ok(Self { size, pixels })
    }

    /// Edge length in pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Pixel at `(x, y)`, row-major, origin top-left.
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        assert!(x < self.size && y < self.size, "pixel out of bounds");
        self.pixels[(y * self.size + x) as usize]
    }

    /// Decode PNG bytes into a raster.
    ///
    /// Non-square images are rejected: a cache entry or provider response
    /// that isn't square can't be rendered as a head.
    pub fn decode_png(bytes: &[u8]) -> ChatheadResult<Self> {
        let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|e| ChatheadError::Decode(e.to_string()))?;
        let rgb = img.to_rgb8();

        if rgb.width() != rgb.height() {
            return Err(ChatheadError::Decode(format!(
                "image is {}x{}, expected a square",
                rgb.width(),
                rgb.height()
            )));
        }

        let size = rgb.width();
        let pixels = rgb.pixels().map(|p| Rgb::new(p[0], p[1], p[2])).collect();
        Ok(Self { size, pixels })
    }

    /// Encode the raster as PNG bytes
    pub fn encode_png(&self) -> ChatheadResult<Vec<u8>> {
        let raw: Vec<u8> = self
            .pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b])
            .collect();

        let img = RgbImage::from_raw(self.size, self.size, raw)
            .ok_or_else(|| ChatheadError::Encode("pixel buffer length mismatch".to_string()))?;

        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)
            .map_err(|e| ChatheadError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }
}

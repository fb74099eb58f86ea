use super::Rgba;
use crate::error::{Error, Result};
use crate::util::lerp_color;

// ============================================================================
// Utility Functions
// ============================================================================

/// "Over" composite of a single channel, truncated toward zero
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: f64) -> u8 {
    (f64::from(src) * alpha + f64::from(dst) * (1.0 - alpha)) as u8
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer for software rendering.
///
/// Pixels are stored row-major as `[r, g, b, a]`, which is also the byte
/// layout PNG expects for color type 6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a buffer with every pixel set to `fill`
    pub fn new(width: u32, height: u32, fill: Rgba) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }
        let pixel_count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&fill.to_array());
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Create a transparent black buffer
    pub fn with_size(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, Rgba::TRANSPARENT)
    }

    /// Wrap raw RGBA bytes. The length must be exactly `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            pixels: data,
            width,
            height,
        })
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub(crate) fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Read a pixel. Returns None if out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = self.pixel_index(x as u32, y as u32);
        let p = &self.pixels[idx..idx + 4];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    /// Overwrite a pixel (bounds checked, out of range is a no-op)
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Source-over composite of `color` onto the pixel at (x, y).
    ///
    /// Every channel truncates after blending, so an opaque color replaces the
    /// destination exactly and a fully transparent one leaves it untouched.
    /// Out-of-bounds coordinates are clipped silently.
    #[inline]
    pub fn blend(&mut self, x: i32, y: i32, color: Rgba) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.pixel_index(x as u32, y as u32);
        let alpha = f64::from(color.a) / 255.0;
        let dst = &mut self.pixels[idx..idx + 4];
        dst[0] = blend_channel(color.r, dst[0], alpha);
        dst[1] = blend_channel(color.g, dst[1], alpha);
        dst[2] = blend_channel(color.b, dst[2], alpha);
        dst[3] = (255.0 - (1.0 - alpha) * (255.0 - f64::from(dst[3]))) as u8;
    }

    /// Overwrite every pixel with `color`
    pub fn fill(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Iterate over rows of `width * 4` bytes, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.width as usize * 4)
    }

    // ========================================================================
    // Background & Post-processing
    // ========================================================================

    /// Vertical gradient: row `y` is overwritten with `lerp(top, bottom, y / (h - 1))`.
    /// Meant to lay down the background before any shape is drawn.
    pub fn apply_linear_gradient(&mut self, top: Rgba, bottom: Rgba) {
        let row_bytes = self.width as usize * 4;
        let last_row = f64::from(self.height.saturating_sub(1).max(1));
        for (y, row) in self.pixels.chunks_exact_mut(row_bytes).enumerate() {
            let t = y as f64 / last_row;
            let rgba = lerp_color(top, bottom, t).to_array();
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    /// Lighten RGB toward white around the image center.
    ///
    /// The falloff is linear and reaches zero at `0.45 * min(w, h)`; alpha is
    /// left alone. Distances are measured from each pixel's top-left corner.
    pub fn apply_radial_glow(&mut self, intensity: f64) {
        let cx = f64::from(self.width) / 2.0;
        let cy = f64::from(self.height) / 2.0;
        let radius = f64::from(self.width.min(self.height)) * 0.45;
        let width = self.width as usize;

        for (i, px) in self.pixels.chunks_exact_mut(4).enumerate() {
            let dx = (i % width) as f64 - cx;
            let dy = (i / width) as f64 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let glow = (1.0 - dist / radius).max(0.0);
            if glow <= 0.0 {
                continue;
            }
            let amount = glow * intensity;
            for c in &mut px[..3] {
                *c = (f64::from(*c) * (1.0 - amount) + 255.0 * amount) as u8;
            }
        }
    }
}

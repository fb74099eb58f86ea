//! Coverage-based design: a round badge with a bold "F", defined purely by
//! membership tests and rendered per size by supersampling.

use super::IconDesign;
use crate::error::Result;
use crate::geometry::{in_circle, Point, RoundedRect};
use crate::raster::{supersample, ColorField, PixelBuffer, Rgba};

const CORNER: f64 = 0.025;

pub struct Badge {
    pub background: Rgba,
    pub accent: Rgba,
    pub foreground: Rgba,
    /// Badge radius, normalized to the image size
    pub radius: f64,
    /// Glyph strokes, tested in order
    pub strokes: Vec<RoundedRect>,
}

impl Badge {
    fn in_badge(&self, x: f64, y: f64) -> bool {
        in_circle(x, y, Point::new(0.5, 0.5), self.radius)
    }
}

impl Default for Badge {
    fn default() -> Self {
        Self {
            background: Rgba::opaque(6, 15, 31),
            accent: Rgba::opaque(246, 96, 37),
            foreground: Rgba::WHITE,
            radius: 0.38,
            strokes: vec![
                RoundedRect::new(0.35, 0.28, 0.46, 0.77, CORNER), // stem
                RoundedRect::new(0.35, 0.28, 0.74, 0.38, CORNER), // top bar
                RoundedRect::new(0.35, 0.46, 0.68, 0.56, CORNER), // middle bar
            ],
        }
    }
}

impl ColorField for Badge {
    fn color_at(&self, x: f64, y: f64) -> Rgba {
        if !self.in_badge(x, y) {
            return self.background;
        }
        if self.strokes.iter().any(|s| s.contains(x, y)) {
            self.foreground
        } else {
            self.accent
        }
    }
}

impl IconDesign for Badge {
    fn name(&self) -> &str {
        "badge"
    }

    fn render(&self, size: u32) -> Result<PixelBuffer> {
        supersample(size, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_regions() {
        let badge = Badge::default();
        assert_eq!(badge.color_at(0.02, 0.02), badge.background);
        assert_eq!(badge.color_at(0.6, 0.7), badge.accent);
        assert_eq!(badge.color_at(0.4, 0.6), badge.foreground); // stem
        assert_eq!(badge.color_at(0.7, 0.33), badge.foreground); // top bar
        assert_eq!(badge.color_at(0.6, 0.42), badge.accent); // between bars
    }

    #[test]
    fn test_strokes_clipped_to_badge() {
        let mut badge = Badge::default();
        badge.strokes = vec![RoundedRect::new(0.0, 0.0, 1.0, 1.0, 0.0)];
        assert_eq!(badge.color_at(0.01, 0.5), badge.background);
        assert_eq!(badge.color_at(0.5, 0.5), badge.foreground);
    }

    #[test]
    fn test_render_sizes() {
        let badge = Badge::default();
        for size in [16, 32, 48] {
            let buf = badge.render(size).unwrap();
            assert_eq!(buf.width(), size);
            assert_eq!(buf.get(0, 0), Some(badge.background));
            let mid = size as i32 / 2;
            assert_ne!(buf.get(mid, mid), Some(badge.background));
        }
    }
}

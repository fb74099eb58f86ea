//! Stroke-based designs: shapes drawn once at a master resolution, then
//! resampled to every other size.

use super::IconDesign;
use crate::error::Result;
use crate::geometry::{Point, Shape};
use crate::raster::{resize, PixelBuffer, Rgba};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_SIZE: u32 = 512;

fn default_base_size() -> u32 {
    DEFAULT_BASE_SIZE
}

/// How the canvas is prepared before shapes are drawn
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    #[default]
    Transparent,
    Solid { color: Rgba },
    Gradient { top: Rgba, bottom: Rgba },
}

/// A design described as data. Shape coordinates and lengths are normalized
/// to the unit square and scaled by the render size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDesign {
    pub name: String,
    #[serde(default = "default_base_size")]
    pub base_size: u32,
    #[serde(default)]
    pub background: Background,
    /// Radial glow intensity; 0 disables it
    #[serde(default)]
    pub glow: f64,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl ShapeDesign {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_size: DEFAULT_BASE_SIZE,
            background: Background::Transparent,
            glow: 0.0,
            shapes: Vec::new(),
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// The bicycle icon: two wheels with hubs, a frame, seat and handlebars,
    /// and a small sparkle in the corner, over a blue gradient with a glow.
    pub fn wheels() -> Self {
        const WHEEL_RADIUS: f64 = 0.18;
        const WHEEL_THICKNESS: f64 = 0.035;
        const FRAME_WIDTH: f64 = WHEEL_THICKNESS * 0.9;

        let accent = Rgba::new(255, 255, 255, 240);
        let secondary = Rgba::new(220, 247, 255, 180);
        let p = Point::new;

        let mut shapes = Vec::new();
        for center in [p(0.3, 0.68), p(0.7, 0.68)] {
            shapes.push(Shape::Ring {
                center,
                radius: WHEEL_RADIUS,
                thickness: WHEEL_THICKNESS,
                color: accent,
            });
            shapes.push(Shape::Ring {
                center,
                radius: WHEEL_RADIUS * 0.45,
                thickness: WHEEL_THICKNESS * 0.5,
                color: secondary,
            });
        }

        let frame = [p(0.28, 0.48), p(0.44, 0.68), p(0.64, 0.46), p(0.72, 0.68)];
        let line = |start, end, width, color| Shape::Line {
            start,
            end,
            width,
            color,
        };
        shapes.extend([
            Shape::Polyline {
                points: frame[..3].to_vec(),
                width: FRAME_WIDTH,
                color: accent,
            },
            Shape::Polyline {
                points: frame[1..].to_vec(),
                width: FRAME_WIDTH,
                color: accent,
            },
            // seat post and saddle
            line(frame[1], p(0.46, 0.36), FRAME_WIDTH, accent),
            line(p(0.42, 0.32), p(0.56, 0.32), WHEEL_THICKNESS * 0.6, accent),
            // fork and handlebar
            line(frame[2], p(0.74, 0.28), WHEEL_THICKNESS * 0.8, accent),
            line(p(0.7, 0.24), p(0.84, 0.24), WHEEL_THICKNESS * 0.55, accent),
        ]);

        let sparkle = p(0.2, 0.2);
        shapes.extend([
            Shape::Ring {
                center: sparkle,
                radius: 0.06,
                thickness: 0.02,
                color: secondary,
            },
            line(
                p(sparkle.x, sparkle.y - 0.05),
                p(sparkle.x, sparkle.y + 0.05),
                0.015,
                secondary,
            ),
            line(
                p(sparkle.x - 0.05, sparkle.y),
                p(sparkle.x + 0.05, sparkle.y),
                0.015,
                secondary,
            ),
        ]);

        Self {
            name: "wheels".to_string(),
            base_size: DEFAULT_BASE_SIZE,
            background: Background::Gradient {
                top: Rgba::opaque(11, 52, 100),
                bottom: Rgba::opaque(15, 145, 182),
            },
            glow: 0.18,
            shapes,
        }
    }

    /// Draw directly at `size`, without resampling
    pub fn draw(&self, size: u32) -> Result<PixelBuffer> {
        let mut buffer = PixelBuffer::with_size(size, size)?;
        match self.background {
            Background::Transparent => {},
            Background::Solid { color } => buffer.fill(color),
            Background::Gradient { top, bottom } => buffer.apply_linear_gradient(top, bottom),
        }
        if self.glow > 0.0 {
            buffer.apply_radial_glow(self.glow);
        }

        let scale = f64::from(size);
        for shape in &self.shapes {
            buffer.draw_shape(&shape.scaled(scale));
        }
        Ok(buffer)
    }

    fn from_master(master: &PixelBuffer, size: u32) -> Result<PixelBuffer> {
        if size == master.width() {
            Ok(master.clone())
        } else {
            resize(master, size)
        }
    }
}

impl IconDesign for ShapeDesign {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, size: u32) -> Result<PixelBuffer> {
        let master = self.draw(self.base_size)?;
        Self::from_master(&master, size)
    }

    fn render_all(&self, sizes: &[u32]) -> Result<Vec<PixelBuffer>> {
        let master = self.draw(self.base_size)?;
        sizes
            .iter()
            .map(|&size| Self::from_master(&master, size))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheels_master() {
        let design = ShapeDesign::wheels();
        let master = design.draw(128).unwrap();
        // Top-left corner is pure gradient start, outside glow and shapes
        assert_eq!(master.get(0, 0), Some(Rgba::opaque(11, 52, 100)));
        // Wheel rim at (0.3 + 0.18, 0.68) is near white
        let rim = master.get(61, 87).unwrap();
        assert!(rim.r > 200 && rim.g > 200, "rim pixel {rim:?}");
        // Every pixel is opaque since the background is
        assert!(master.as_bytes().chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_render_all_shares_master() {
        let mut design = ShapeDesign::wheels();
        design.base_size = 64;
        let out = design.render_all(&[64, 32, 16]).unwrap();
        assert_eq!(out[0], design.draw(64).unwrap());
        assert_eq!(out[1].width(), 32);
        assert_eq!(out[2], design.render(16).unwrap());
    }

    #[test]
    fn test_solid_background_and_disc() {
        let design = ShapeDesign {
            base_size: 10,
            background: Background::Solid {
                color: Rgba::BLACK,
            },
            ..ShapeDesign::new("dot")
        }
        .with_shape(Shape::Disc {
            center: Point::new(0.5, 0.5),
            radius: 0.2,
            color: Rgba::WHITE,
        });
        let buf = design.render(10).unwrap();
        assert_eq!(buf.get(5, 5), Some(Rgba::WHITE));
        assert_eq!(buf.get(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_json_design() {
        let json = r#"{
            "name": "ring",
            "background": {"kind": "gradient", "top": [0,0,0,255], "bottom": [0,0,255,255]},
            "shapes": [
                {"kind": "ring", "center": {"x": 0.5, "y": 0.5}, "radius": 0.3,
                 "thickness": 0.05, "color": [255,255,255,255]}
            ]
        }"#;
        let design: ShapeDesign = serde_json::from_str(json).unwrap();
        assert_eq!(design.base_size, 512);
        assert_eq!(design.glow, 0.0);
        assert_eq!(design.shapes.len(), 1);
        assert_eq!(design.render(16).unwrap().width(), 16);
    }

    #[test]
    fn test_far_reaching_line_renders() {
        let json = r#"{
            "name": "long",
            "base_size": 16,
            "shapes": [
                {"kind": "line", "start": {"x": 0.0, "y": 0.5}, "end": {"x": 2.0e8, "y": 0.5},
                 "width": 0.125, "color": [255,255,255,255]}
            ]
        }"#;
        let design: ShapeDesign = serde_json::from_str(json).unwrap();
        let buf = design.render(16).unwrap();
        // Scaled to (0, 8) -> (3.2e9, 8), width 2
        assert_eq!(buf.get(15, 7), Some(Rgba::WHITE));
        assert_eq!(buf.get(15, 0), Some(Rgba::TRANSPARENT));
    }
}

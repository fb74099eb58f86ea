//! Shape descriptors and continuous-domain membership tests

use crate::raster::Rgba;
use serde::{Deserialize, Serialize};

/// A point in 2D space (pixel units unless noted otherwise)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Point on the segment `self -> other` at parameter `t`
    #[inline]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.x * (1.0 - t) + other.x * t,
            self.y * (1.0 - t) + other.y * t,
        )
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A drawable primitive. Coordinates and lengths share one unit so a whole
/// shape can be rescaled with [`Shape::scaled`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Disc {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    Ring {
        center: Point,
        radius: f64,
        thickness: f64,
        color: Rgba,
    },
    Line {
        start: Point,
        end: Point,
        width: f64,
        color: Rgba,
    },
    Polyline {
        points: Vec<Point>,
        width: f64,
        color: Rgba,
    },
}

impl Shape {
    /// Multiply every coordinate and length by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        match self {
            Self::Disc {
                center,
                radius,
                color,
            } => Self::Disc {
                center: center.scaled(factor),
                radius: radius * factor,
                color: *color,
            },
            Self::Ring {
                center,
                radius,
                thickness,
                color,
            } => Self::Ring {
                center: center.scaled(factor),
                radius: radius * factor,
                thickness: thickness * factor,
                color: *color,
            },
            Self::Line {
                start,
                end,
                width,
                color,
            } => Self::Line {
                start: start.scaled(factor),
                end: end.scaled(factor),
                width: width * factor,
                color: *color,
            },
            Self::Polyline {
                points,
                width,
                color,
            } => Self::Polyline {
                points: points.iter().map(|p| p.scaled(factor)).collect(),
                width: width * factor,
                color: *color,
            },
        }
    }
}

// ============================================================================
// Membership tests
// ============================================================================

/// Closed disc membership
#[inline]
pub fn in_circle(x: f64, y: f64, center: Point, radius: f64) -> bool {
    Point::new(x, y).distance_sq(&center) <= radius * radius
}

/// Axis-aligned rectangle with optional rounded corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundedRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    #[serde(default)]
    pub radius: f64,
}

impl RoundedRect {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64, radius: f64) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            radius,
        }
    }

    /// Inclusive containment test. Points in a corner square are kept only if
    /// they fall inside that corner's quarter circle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !(self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1) {
            return false;
        }
        if self.radius <= 0.0 {
            return true;
        }

        let inner_x0 = self.x0 + self.radius;
        let inner_x1 = self.x1 - self.radius;
        let inner_y0 = self.y0 + self.radius;
        let inner_y1 = self.y1 - self.radius;

        if (inner_x0 <= x && x <= inner_x1) || (inner_y0 <= y && y <= inner_y1) {
            return true;
        }

        let cx = if x < inner_x0 { inner_x0 } else { inner_x1 };
        let cy = if y < inner_y0 { inner_y0 } else { inner_y1 };
        in_circle(x, y, Point::new(cx, cy), self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_circle_boundary_inclusive() {
        let c = Point::new(0.5, 0.5);
        assert!(in_circle(0.5, 0.5, c, 0.38));
        assert!(in_circle(0.5, 0.0, c, 0.5));
        assert!(!in_circle(0.0, 0.0, c, 0.5));
    }

    #[test]
    fn test_rounded_rect_corners() {
        let rect = RoundedRect::new(0.0, 0.0, 1.0, 1.0, 0.25);
        assert!(rect.contains(0.5, 0.5));
        assert!(rect.contains(0.0, 0.5)); // edge midpoint
        assert!(!rect.contains(0.01, 0.01)); // cut corner
        assert!(rect.contains(0.1, 0.1)); // inside the corner arc
        assert!(!rect.contains(1.1, 0.5));
    }

    #[test]
    fn test_sharp_rect() {
        let rect = RoundedRect::new(0.2, 0.2, 0.4, 0.4, 0.0);
        assert!(rect.contains(0.2, 0.2));
        assert!(!rect.contains(0.41, 0.3));
    }

    #[test]
    fn test_shape_scaled() {
        let line = Shape::Line {
            start: Point::new(0.25, 0.5),
            end: Point::new(1.0, 0.0),
            width: 0.01,
            color: Rgba::WHITE,
        };
        let Shape::Line {
            start, end, width, ..
        } = line.scaled(512.0)
        else {
            panic!("scaled changed the variant");
        };
        assert_eq!(start, Point::new(128.0, 256.0));
        assert_eq!(end, Point::new(512.0, 0.0));
        assert!((width - 5.12).abs() < 1e-9);
    }

    #[test]
    fn test_shape_json_tagged() {
        let json = r#"{"kind":"disc","center":{"x":1.0,"y":2.0},"radius":3.0,"color":[1,2,3,4]}"#;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert_eq!(
            shape,
            Shape::Disc {
                center: Point::new(1.0, 2.0),
                radius: 3.0,
                color: Rgba::new(1, 2, 3, 4),
            }
        );
    }
}

//! Shape rasterization on top of [`PixelBuffer::blend`].
//!
//! Every primitive tests pixel centers `(x + 0.5, y + 0.5)` against the exact
//! geometry, so shapes have hard edges; smooth edges come from drawing large
//! and resampling down.

use super::{PixelBuffer, Rgba};
use crate::geometry::{Point, Shape};

/// Inclusive pixel range covering `[lo, hi]`, clamped to `[0, limit)`
#[inline]
fn pixel_span(lo: f64, hi: f64, limit: u32) -> (i32, i32) {
    let start = lo.floor().max(0.0);
    let end = hi.ceil().min(f64::from(limit) - 1.0);
    (start as i32, end as i32)
}

impl PixelBuffer {
    /// Visit every in-bounds pixel whose center lies within `reach` of
    /// `center` and for which `test(dist_sq)` holds, blending once each.
    fn blend_radial<F>(&mut self, center: Point, reach: f64, color: Rgba, test: F)
    where
        F: Fn(f64) -> bool,
    {
        let (min_x, max_x) = pixel_span(center.x - reach - 1.0, center.x + reach + 1.0, self.width());
        let (min_y, max_y) =
            pixel_span(center.y - reach - 1.0, center.y + reach + 1.0, self.height());

        for y in min_y..=max_y {
            let dy = f64::from(y) + 0.5 - center.y;
            for x in min_x..=max_x {
                let dx = f64::from(x) + 0.5 - center.x;
                if test(dx * dx + dy * dy) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Filled disc. A negative radius draws nothing; radius 0 touches at most
    /// the pixel whose center coincides with `center`.
    pub fn draw_disc(&mut self, center: Point, radius: f64, color: Rgba) {
        if radius < 0.0 || radius.is_nan() {
            return;
        }
        let radius_sq = radius * radius;
        self.blend_radial(center, radius, color, |d| d <= radius_sq);
    }

    /// Annulus centered on the circle of `radius`, `thickness` wide.
    pub fn draw_ring(&mut self, center: Point, radius: f64, thickness: f64, color: Rgba) {
        let outer = radius + thickness / 2.0;
        if outer < 0.0 || outer.is_nan() {
            return;
        }
        let inner = (radius - thickness / 2.0).max(0.0);
        let (outer_sq, inner_sq) = (outer * outer, inner * inner);
        self.blend_radial(center, outer, color, |d| inner_sq <= d && d <= outer_sq);
    }

    /// Stroke a segment by stamping discs of diameter `width` at most half a
    /// pixel apart, both endpoints included.
    ///
    /// Overlapping stamps composite repeatedly, so translucent lines come out
    /// denser than their nominal alpha.
    ///
    /// Only stamps that can reach the canvas are visited, so a segment running
    /// far outside it costs no more than its visible part.
    pub fn draw_thick_line(&mut self, start: Point, end: Point, width: f64, color: Rgba) {
        let span = (end.x - start.x).abs().max((end.y - start.y).abs());
        if !span.is_finite() {
            log::warn!("skipping line with non-finite endpoints {start:?} -> {end:?}");
            return;
        }
        let radius = width / 2.0;
        if radius < 0.0 || radius.is_nan() {
            return;
        }
        let Some((t0, t1)) = self.visible_range(start, end, radius + 1.0) else {
            return;
        };

        let steps = ((span * 2.0) as u64).saturating_add(1);
        let last = steps as f64;
        let first = (t0 * last).floor() as u64;
        let end_step = ((t1 * last).ceil() as u64).min(steps);
        for i in first..=end_step {
            let t = i as f64 / last;
            self.draw_disc(start.lerp(&end, t), radius, color);
        }
    }

    /// Parameter interval of `start -> end` lying within the canvas grown by
    /// `margin` on every side, or None if the segment misses it entirely.
    fn visible_range(&self, start: Point, end: Point, margin: f64) -> Option<(f64, f64)> {
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        let axes = [
            (start.x, end.x - start.x, f64::from(self.width())),
            (start.y, end.y - start.y, f64::from(self.height())),
        ];
        for (origin, delta, extent) in axes {
            let (lo, hi) = (-margin, extent + margin);
            if delta == 0.0 {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let (a, b) = ((lo - origin) / delta, (hi - origin) / delta);
            t0 = t0.max(a.min(b));
            t1 = t1.min(a.max(b));
        }
        (t0 <= t1).then_some((t0, t1))
    }

    /// Thick line through each consecutive pair of points. Joints get no
    /// special treatment; the round stamps already cover them.
    pub fn draw_polyline(&mut self, points: &[Point], width: f64, color: Rgba) {
        for pair in points.windows(2) {
            self.draw_thick_line(pair[0], pair[1], width, color);
        }
    }

    pub fn draw_shape(&mut self, shape: &Shape) {
        match shape {
            Shape::Disc {
                center,
                radius,
                color,
            } => self.draw_disc(*center, *radius, *color),
            Shape::Ring {
                center,
                radius,
                thickness,
                color,
            } => self.draw_ring(*center, *radius, *thickness, *color),
            Shape::Line {
                start,
                end,
                width,
                color,
            } => self.draw_thick_line(*start, *end, *width, *color),
            Shape::Polyline {
                points,
                width,
                color,
            } => self.draw_polyline(points, *width, *color),
        }
    }
}

//! Shared utilities

use crate::raster::Rgba;

/// Linear interpolation of a single channel, truncated toward zero
#[inline]
pub fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    (a + (f64::from(b) - a) * t) as u8
}

/// Linear interpolation between two colors, all four channels.
/// `t` is clamped to [0, 1].
#[inline]
pub fn lerp_color(c1: Rgba, c2: Rgba, t: f64) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    Rgba::new(
        lerp_channel(c1.r, c2.r, t),
        lerp_channel(c1.g, c2.g, t),
        lerp_channel(c1.b, c2.b, t),
        lerp_channel(c1.a, c2.a, t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgba::new(11, 52, 100, 255);
        let b = Rgba::new(15, 145, 182, 255);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
    }

    #[test]
    fn test_lerp_truncates_descending() {
        // 100 + (0 - 100) * 0.333 = 66.7 -> 66
        assert_eq!(lerp_channel(100, 0, 0.333), 66);
    }
}

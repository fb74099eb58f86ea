//! Resolution changes: bilinear resize of a drawn buffer, and box-filter
//! supersampling of a continuous color function.

use super::{PixelBuffer, Rgba};
use crate::error::Result;

/// A color defined over the normalized square `[0, 1] x [0, 1]`.
///
/// Implemented for any `Fn(f64, f64) -> Rgba`, so plain closures work.
pub trait ColorField {
    fn color_at(&self, x: f64, y: f64) -> Rgba;
}

impl<F> ColorField for F
where
    F: Fn(f64, f64) -> Rgba,
{
    fn color_at(&self, x: f64, y: f64) -> Rgba {
        self(x, y)
    }
}

/// Sub-pixel sample positions used on both axes by [`supersample`]
const SAMPLE_OFFSETS: [f64; 2] = [0.25, 0.75];

/// Bilinear resize to a `size x size` square.
///
/// Destination pixel `d` maps back to source coordinate
/// `(d + 0.5) * scale - 0.5`; neighbors are clamped to the source edges and
/// every channel (alpha included) is interpolated, then truncated.
pub fn resize(source: &PixelBuffer, size: u32) -> Result<PixelBuffer> {
    let mut dst = PixelBuffer::with_size(size, size)?;
    let src_w = source.width() as i32;
    let src_h = source.height() as i32;
    let scale_x = f64::from(src_w) / f64::from(size);
    let scale_y = f64::from(src_h) / f64::from(size);

    let sample = |x: i32, y: i32| source.get(x, y).unwrap_or_default().to_array();

    for y in 0..size as i32 {
        let src_y = (f64::from(y) + 0.5) * scale_y - 0.5;
        let y0 = (src_y.floor() as i32).clamp(0, src_h - 1);
        let y1 = (y0 + 1).clamp(0, src_h - 1);
        let ty = src_y - f64::from(y0);

        for x in 0..size as i32 {
            let src_x = (f64::from(x) + 0.5) * scale_x - 0.5;
            let x0 = (src_x.floor() as i32).clamp(0, src_w - 1);
            let x1 = (x0 + 1).clamp(0, src_w - 1);
            let tx = src_x - f64::from(x0);

            let (c00, c10) = (sample(x0, y0), sample(x1, y0));
            let (c01, c11) = (sample(x0, y1), sample(x1, y1));

            let mut out = [0u8; 4];
            for i in 0..4 {
                let top = f64::from(c00[i]) * (1.0 - tx) + f64::from(c10[i]) * tx;
                let bottom = f64::from(c01[i]) * (1.0 - tx) + f64::from(c11[i]) * tx;
                out[i] = (top * (1.0 - ty) + bottom * ty) as u8;
            }
            dst.set(x, y, out.into());
        }
    }

    Ok(dst)
}

/// Render a `size x size` buffer by averaging a 2x2 grid of samples of
/// `field` per pixel. Averages round half to even.
pub fn supersample<F>(size: u32, field: &F) -> Result<PixelBuffer>
where
    F: ColorField + ?Sized,
{
    let mut dst = PixelBuffer::with_size(size, size)?;
    let scale = f64::from(size);
    let count = (SAMPLE_OFFSETS.len() * SAMPLE_OFFSETS.len()) as f64;

    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let mut accum = [0.0f64; 4];
            for ox in SAMPLE_OFFSETS {
                for oy in SAMPLE_OFFSETS {
                    let fx = (f64::from(x) + ox) / scale;
                    let fy = (f64::from(y) + oy) / scale;
                    let rgba = field.color_at(fx, fy).to_array();
                    for (acc, c) in accum.iter_mut().zip(rgba) {
                        *acc += f64::from(c);
                    }
                }
            }
            let avg = accum.map(|v| (v / count).round_ties_even() as u8);
            dst.set(x, y, avg.into());
        }
    }

    Ok(dst)
}

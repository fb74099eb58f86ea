//! In-memory RGBA canvas, shape rasterization and resampling

mod color;
mod pixel_buffer;
mod primitives;
mod resample;

pub use color::Rgba;
pub use pixel_buffer::PixelBuffer;
pub use resample::{resize, supersample, ColorField};

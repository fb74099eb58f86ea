//! Procedural icon rendering with self-contained PNG and ICO encoders.
//!
//! Draw into a [`PixelBuffer`] with the disc/ring/line primitives (or sample a
//! [`ColorField`]), resample to the sizes you need, then serialize with
//! [`encode_png`] and [`encode_ico`]. The [`plan`] module wires these steps
//! into a full icon set.

pub mod designs;
pub mod encode;
mod error;
pub mod geometry;
pub mod plan;
pub mod raster;
mod util;

pub use designs::IconDesign;
pub use encode::{encode_ico, encode_png, IcoImage, PngEncoder};
pub use error::{Error, Result};
pub use geometry::{Point, Shape};
pub use plan::{DesignSpec, IconPlan, IconSet};
pub use raster::{resize, supersample, ColorField, PixelBuffer, Rgba};
pub use util::lerp_color;

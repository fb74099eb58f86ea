mod badge;
mod shapes;

pub use badge::Badge;
pub use shapes::{Background, ShapeDesign};

use crate::error::Result;
use crate::raster::PixelBuffer;

/// Something that can produce the icon at a requested pixel size
pub trait IconDesign {
    /// Design name for logging/debugging
    fn name(&self) -> &str;

    /// Render a `size x size` image
    fn render(&self, size: u32) -> Result<PixelBuffer>;

    /// Render every requested size, in order.
    /// Designs drawn once and scaled down override this to share the master.
    fn render_all(&self, sizes: &[u32]) -> Result<Vec<PixelBuffer>> {
        sizes.iter().map(|&size| self.render(size)).collect()
    }
}

/// Names of the built-in designs
pub const BUILTIN: [&str; 2] = ["wheels", "badge"];

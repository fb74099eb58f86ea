//! Icon plan (which design, which sizes, where to write) and the in-memory
//! icon set produced from it.

use crate::designs::{self, IconDesign, ShapeDesign};
use crate::encode::{encode_ico, IcoImage, PngEncoder};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const ICO_FILE_NAME: &str = "favicon.ico";

/// Which design to render. Built-ins are referenced by name; custom designs
/// are embedded inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignSpec {
    Wheels,
    Badge,
    Shapes(ShapeDesign),
}

impl DesignSpec {
    /// Built-in design by name, case-insensitive
    pub fn by_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "wheels" => Ok(Self::Wheels),
            "badge" => Ok(Self::Badge),
            _ => Err(Error::UnknownDesign(name.to_string())),
        }
    }

    pub fn build(&self) -> Box<dyn IconDesign> {
        match self {
            Self::Wheels => Box::new(ShapeDesign::wheels()),
            Self::Badge => Box::new(designs::Badge::default()),
            Self::Shapes(design) => Box::new(design.clone()),
        }
    }
}

fn default_png_sizes() -> Vec<u32> {
    vec![512, 192, 180, 128, 64, 32]
}

fn default_ico_sizes() -> Vec<u32> {
    vec![32, 16]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("icons")
}

/// Everything the pipeline needs to produce an icon set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconPlan {
    pub design: DesignSpec,
    #[serde(default = "default_png_sizes")]
    pub png_sizes: Vec<u32>,
    #[serde(default = "default_ico_sizes")]
    pub ico_sizes: Vec<u32>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Deflate level for every PNG, 0..=10
    #[serde(default)]
    pub compression: Option<u8>,
    /// Master size for stroke designs; unset keeps the design's own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_size: Option<u32>,
}

impl IconPlan {
    pub fn new(design: DesignSpec) -> Self {
        Self {
            design,
            png_sizes: default_png_sizes(),
            ico_sizes: default_ico_sizes(),
            output_dir: default_output_dir(),
            compression: None,
            base_size: None,
        }
    }

    /// Defaults matching each built-in: the badge ships a single 256px favicon
    pub fn for_design(design: DesignSpec) -> Self {
        let ico_sizes = match design {
            DesignSpec::Badge => vec![256],
            _ => default_ico_sizes(),
        };
        Self {
            ico_sizes,
            ..Self::new(design)
        }
    }

    /// Every size that has to be rendered, each once, in first-seen order
    pub fn render_sizes(&self) -> Vec<u32> {
        let mut sizes = Vec::new();
        for &size in self.png_sizes.iter().chain(&self.ico_sizes) {
            if !sizes.contains(&size) {
                sizes.push(size);
            }
        }
        sizes
    }

    /// Instantiate the design, applying `base_size` to stroke designs.
    /// The badge is sampled per size and has no master to resize.
    pub fn build_design(&self) -> Box<dyn IconDesign> {
        match (&self.design, self.base_size) {
            (DesignSpec::Wheels, Some(base_size)) => Box::new(ShapeDesign {
                base_size,
                ..ShapeDesign::wheels()
            }),
            (DesignSpec::Shapes(design), Some(base_size)) => Box::new(ShapeDesign {
                base_size,
                ..design.clone()
            }),
            _ => self.design.build(),
        }
    }

    fn encoder(&self) -> PngEncoder {
        self.compression
            .map_or_else(PngEncoder::new, PngEncoder::with_level)
    }

    /// Save plan to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load plan from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl Default for IconPlan {
    fn default() -> Self {
        Self::new(DesignSpec::Wheels)
    }
}

/// All encoded outputs of one plan, held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet {
    /// `(size, png bytes)` in plan order
    pub pngs: Vec<(u32, Vec<u8>)>,
    pub ico: Option<Vec<u8>>,
}

impl IconSet {
    /// Render every size once, encode the PNGs, then assemble the ICO
    pub fn build(design: &dyn IconDesign, plan: &IconPlan) -> Result<Self> {
        let sizes = plan.render_sizes();
        let encoder = plan.encoder();
        let buffers = design.render_all(&sizes)?;
        let encoded: HashMap<u32, Vec<u8>> = sizes
            .iter()
            .zip(&buffers)
            .map(|(&size, buffer)| (size, encoder.encode(buffer)))
            .collect();
        log::debug!("rendered '{}' at {} sizes", design.name(), encoded.len());

        let lookup = |size: u32| {
            encoded
                .get(&size)
                .cloned()
                .ok_or(Error::MissingRender(size))
        };

        let pngs = plan
            .png_sizes
            .iter()
            .map(|&s| lookup(s).map(|png| (s, png)))
            .collect::<Result<Vec<_>>>()?;
        let ico = if plan.ico_sizes.is_empty() {
            None
        } else {
            let images = plan
                .ico_sizes
                .iter()
                .map(|&s| lookup(s).map(|png| IcoImage::new(s, png)))
                .collect::<Result<Vec<_>>>()?;
            Some(encode_ico(&images)?)
        };

        Ok(Self { pngs, ico })
    }

    /// File name of the PNG for `size`
    pub fn png_file_name(size: u32) -> String {
        format!("icon-{size}.png")
    }

    /// Create `dir` if needed and write every file.
    /// Returns `(path, byte length)` for each file written.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<Vec<(PathBuf, usize)>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.pngs.len() + 1);
        for (size, png) in &self.pngs {
            let path = dir.join(Self::png_file_name(*size));
            fs::write(&path, png)?;
            written.push((path, png.len()));
        }
        if let Some(ico) = &self.ico {
            let path = dir.join(ICO_FILE_NAME);
            fs::write(&path, ico)?;
            written.push((path, ico.len()));
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::png;

    fn small_plan() -> IconPlan {
        IconPlan {
            png_sizes: vec![24, 8],
            ico_sizes: vec![8, 4],
            ..IconPlan::new(DesignSpec::Shapes(ShapeDesign {
                base_size: 24,
                ..ShapeDesign::wheels()
            }))
        }
    }

    #[test]
    fn test_design_by_name() {
        for name in designs::BUILTIN {
            let spec = DesignSpec::by_name(name).unwrap();
            assert_eq!(spec.build().name(), name);
        }
        assert_eq!(DesignSpec::by_name(" Badge ").unwrap(), DesignSpec::Badge);
        assert!(matches!(
            DesignSpec::by_name("plasma"),
            Err(Error::UnknownDesign(_))
        ));
    }

    #[test]
    fn test_render_sizes_dedup() {
        assert_eq!(small_plan().render_sizes(), vec![24, 8, 4]);
        assert_eq!(
            IconPlan::default().render_sizes(),
            vec![512, 192, 180, 128, 64, 32, 16]
        );
    }

    #[test]
    fn test_plan_json_defaults() {
        let plan: IconPlan = serde_json::from_str(r#"{"design": "badge"}"#).unwrap();
        assert_eq!(plan.design, DesignSpec::Badge);
        assert_eq!(plan.png_sizes, default_png_sizes());
        assert_eq!(plan.ico_sizes, vec![32, 16]);
        assert_eq!(plan.output_dir, PathBuf::from("icons"));
        assert_eq!(IconPlan::for_design(DesignSpec::Badge).ico_sizes, vec![256]);
    }

    #[test]
    fn test_plan_save_load() {
        let dir = std::env::temp_dir().join(format!("iconforge-plan-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("plan.json");
        let plan = IconPlan {
            png_sizes: vec![48],
            output_dir: PathBuf::from("out/web"),
            compression: Some(6),
            ..IconPlan::for_design(DesignSpec::Badge)
        };
        plan.save(&path).unwrap();
        assert_eq!(IconPlan::load(&path).unwrap(), plan);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_build_set() {
        let plan = small_plan();
        let design = plan.build_design();
        let set = IconSet::build(design.as_ref(), &plan).unwrap();

        let sizes: Vec<_> = set.pngs.iter().map(|(s, _)| *s).collect();
        assert_eq!(sizes, vec![24, 8]);
        for (size, bytes) in &set.pngs {
            assert_eq!(png::read_header(bytes), Some((*size, *size)));
        }

        let ico = set.ico.unwrap();
        assert_eq!(u16::from_le_bytes([ico[4], ico[5]]), 2);
        // first ICO payload is the same 8px PNG listed above
        let png8 = &set.pngs[1].1;
        assert_eq!(&ico[6 + 32..6 + 32 + png8.len()], &png8[..]);
    }

    #[test]
    fn test_plan_base_size_overrides_master() {
        let plan: IconPlan =
            serde_json::from_str(r#"{"design": "wheels", "base_size": 24, "png_sizes": [8]}"#)
                .unwrap();
        assert_eq!(plan.base_size, Some(24));
        let expected = ShapeDesign {
            base_size: 24,
            ..ShapeDesign::wheels()
        };
        assert_eq!(
            plan.build_design().render(8).unwrap(),
            expected.render(8).unwrap()
        );

        let custom = IconPlan {
            base_size: Some(12),
            ..small_plan()
        };
        let master = custom.build_design().render(12).unwrap();
        assert_eq!(master, ShapeDesign::wheels().draw(12).unwrap());

        // Unset base_size is omitted from saved plans
        let json = serde_json::to_string(&IconPlan::default()).unwrap();
        assert!(!json.contains("base_size"));
    }

    #[test]
    fn test_missing_render_is_an_error() {
        struct Truncated;
        impl IconDesign for Truncated {
            fn name(&self) -> &str {
                "truncated"
            }
            fn render(&self, size: u32) -> Result<crate::raster::PixelBuffer> {
                crate::raster::PixelBuffer::with_size(size, size)
            }
            fn render_all(&self, sizes: &[u32]) -> Result<Vec<crate::raster::PixelBuffer>> {
                sizes.iter().take(1).map(|&s| self.render(s)).collect()
            }
        }

        let plan = IconPlan {
            png_sizes: vec![8, 4],
            ico_sizes: Vec::new(),
            ..IconPlan::new(DesignSpec::Badge)
        };
        assert!(matches!(
            IconSet::build(&Truncated, &plan),
            Err(Error::MissingRender(4))
        ));
    }

    #[test]
    fn test_no_ico_sizes() {
        let plan = IconPlan {
            ico_sizes: Vec::new(),
            png_sizes: vec![4],
            ..IconPlan::new(DesignSpec::Badge)
        };
        let set = IconSet::build(&designs::Badge::default(), &plan).unwrap();
        assert!(set.ico.is_none());
        assert_eq!(set.pngs.len(), 1);
    }

    #[test]
    fn test_write_to() {
        let dir = std::env::temp_dir().join(format!("iconforge-set-{}", std::process::id()));
        let plan = small_plan();
        let set = IconSet::build(plan.build_design().as_ref(), &plan).unwrap();
        let written = set.write_to(dir.join("nested")).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["icon-24.png", "icon-8.png", "favicon.ico"]);
        for (path, len) in &written {
            assert_eq!(fs::metadata(path).unwrap().len() as usize, *len);
        }
        fs::remove_dir_all(&dir).unwrap();
    }
}

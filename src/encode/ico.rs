//! Windows ICO container holding PNG-compressed images.
//!
//! Layout: a 6-byte header, one 16-byte directory entry per image, then the
//! PNG payloads in directory order. Readers tell PNG entries apart from BMP
//! ones by the payload signature.

use super::png;
use crate::error::{Error, Result};

const HEADER_LEN: usize = 6;
const DIR_ENTRY_LEN: usize = 16;
const ICO_TYPE_ICON: u16 = 1;

/// One image to embed: its nominal edge length and its PNG bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcoImage {
    pub size: u32,
    pub png: Vec<u8>,
}

impl IcoImage {
    pub const fn new(size: u32, png: Vec<u8>) -> Self {
        Self { size, png }
    }
}

/// A directory record, computed once per embedded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcoDirEntry {
    /// Stored width/height byte; 0 stands for 256
    pub dimension: u8,
    pub bit_depth: u16,
    pub length: u32,
    pub offset: u32,
}

impl IcoDirEntry {
    pub fn to_bytes(&self) -> [u8; DIR_ENTRY_LEN] {
        let mut out = [0u8; DIR_ENTRY_LEN];
        out[0] = self.dimension; // width
        out[1] = self.dimension; // height
        out[2] = 0; // palette size
        out[3] = 0; // reserved
        out[4..6].copy_from_slice(&1u16.to_le_bytes()); // color planes
        out[6..8].copy_from_slice(&self.bit_depth.to_le_bytes());
        out[8..12].copy_from_slice(&self.length.to_le_bytes());
        out[12..16].copy_from_slice(&self.offset.to_le_bytes());
        out
    }
}

/// ICO stores sizes 1..=255 as-is and 256 as 0
fn dimension_byte(size: u32) -> Result<u8> {
    match size {
        256 => Ok(0),
        1..=255 => Ok(size as u8),
        _ => Err(Error::InvalidIconSize(size)),
    }
}

/// Lay out directory entries; offsets start right after the directory.
pub fn directory(images: &[IcoImage]) -> Result<Vec<IcoDirEntry>> {
    if images.is_empty() {
        return Err(Error::EmptyIcon);
    }
    if images.len() > usize::from(u16::MAX) {
        return Err(Error::TooManyImages(images.len()));
    }

    let mut offset = HEADER_LEN + DIR_ENTRY_LEN * images.len();
    let mut entries = Vec::with_capacity(images.len());
    for image in images {
        let dimension = dimension_byte(image.size)?;
        if let Some((w, h)) = png::read_header(&image.png) {
            if w != image.size || h != image.size {
                log::warn!(
                    "ICO entry declared as {0}x{0} holds a {w}x{h} PNG",
                    image.size
                );
            }
        } else {
            log::warn!("ICO entry {} is not a PNG stream", image.size);
        }

        let length = u32::try_from(image.png.len()).map_err(|_| Error::IcoTooLarge)?;
        entries.push(IcoDirEntry {
            dimension,
            bit_depth: 32,
            length,
            offset: u32::try_from(offset).map_err(|_| Error::IcoTooLarge)?,
        });
        offset += image.png.len();
    }
    Ok(entries)
}

/// Assemble the ICO byte stream
pub fn encode_ico(images: &[IcoImage]) -> Result<Vec<u8>> {
    let entries = directory(images)?;
    let payload_len: usize = images.iter().map(|i| i.png.len()).sum();
    let mut out = Vec::with_capacity(HEADER_LEN + DIR_ENTRY_LEN * entries.len() + payload_len);

    out.extend_from_slice(&0u16.to_le_bytes()); // reserved
    out.extend_from_slice(&ICO_TYPE_ICON.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in &entries {
        out.extend_from_slice(&entry.to_bytes());
    }
    for image in images {
        out.extend_from_slice(&image.png);
    }

    log::debug!("encoded ICO with {} images: {} bytes", entries.len(), out.len());
    Ok(out)
}

//! Minimal PNG writer: 8-bit RGBA, no filtering, a single IDAT chunk.
//!
//! * [PNG Specification (Second Edition)](https://www.w3.org/TR/2003/REC-PNG-20031110/)

use crate::raster::PixelBuffer;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Highest level `miniz_oxide` accepts
pub const MAX_COMPRESSION: u8 = 10;

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_NONE: u8 = 0;

/// Serializes pixel buffers as PNG byte streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngEncoder {
    level: u8,
}

impl PngEncoder {
    /// Encoder using maximum compression
    pub const fn new() -> Self {
        Self {
            level: MAX_COMPRESSION,
        }
    }

    /// Any level decodes to the same pixels; lower levels trade size for speed.
    /// Values above [`MAX_COMPRESSION`] are clamped.
    pub fn with_level(level: u8) -> Self {
        Self {
            level: level.min(MAX_COMPRESSION),
        }
    }

    pub const fn level(&self) -> u8 {
        self.level
    }

    pub fn encode(&self, buffer: &PixelBuffer) -> Vec<u8> {
        let mut header = Vec::with_capacity(13);
        header.extend_from_slice(&buffer.width().to_be_bytes());
        header.extend_from_slice(&buffer.height().to_be_bytes());
        // bit depth, color type, compression, filter, interlace
        header.extend_from_slice(&[BIT_DEPTH, COLOR_TYPE_RGBA, 0, 0, 0]);

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&scanlines(buffer), self.level);

        let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + 3 * 12 + header.len() + compressed.len());
        out.extend_from_slice(&PNG_SIGNATURE);
        write_chunk(&mut out, b"IHDR", &header);
        write_chunk(&mut out, b"IDAT", &compressed);
        write_chunk(&mut out, b"IEND", &[]);

        log::debug!(
            "encoded {}x{} PNG: {} bytes (level {})",
            buffer.width(),
            buffer.height(),
            out.len(),
            self.level
        );
        out
    }
}

impl Default for PngEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode with maximum compression
pub fn encode_png(buffer: &PixelBuffer) -> Vec<u8> {
    PngEncoder::new().encode(buffer)
}

/// Raw image data: each row prefixed with filter type 0
fn scanlines(buffer: &PixelBuffer) -> Vec<u8> {
    let row_bytes = buffer.width() as usize * 4;
    let mut raw = Vec::with_capacity((row_bytes + 1) * buffer.height() as usize);
    for row in buffer.rows() {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(row);
    }
    raw
}

/// CRC-32 over the chunk tag followed by its payload
pub fn chunk_crc(tag: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(tag);
    hasher.update(data);
    hasher.finalize()
}

/// Append `length | tag | data | crc`, integers big-endian
fn write_chunk(out: &mut Vec<u8>, tag: &[u8; 4], data: &[u8]) {
    // Payloads of in-memory buffers stay far below the 2^31 chunk limit
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(data);
    out.extend_from_slice(&chunk_crc(tag, data).to_be_bytes());
}

// ============================================================================
// Reading
// ============================================================================

/// One chunk as stored in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'a> {
    pub tag: [u8; 4],
    pub data: &'a [u8],
    pub declared_crc: u32,
}

impl RawChunk<'_> {
    pub fn crc_matches(&self) -> bool {
        chunk_crc(&self.tag, self.data) == self.declared_crc
    }
}

/// Iterator over the chunks following the signature. Stops at the first
/// truncated chunk.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Chunks<'a> {
    type Item = RawChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (len, rest) = self.rest.split_first_chunk::<4>()?;
        let (tag, rest) = rest.split_first_chunk::<4>()?;
        let len = u32::from_be_bytes(*len) as usize;
        if rest.len() < len.checked_add(4)? {
            self.rest = &[];
            return None;
        }
        let (data, rest) = rest.split_at(len);
        let (crc, rest) = rest.split_first_chunk::<4>()?;
        self.rest = rest;
        Some(RawChunk {
            tag: *tag,
            data,
            declared_crc: u32::from_be_bytes(*crc),
        })
    }
}

pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Chunks of a PNG stream, or None if the signature is missing
pub fn chunks(bytes: &[u8]) -> Option<Chunks<'_>> {
    is_png(bytes).then(|| Chunks {
        rest: &bytes[PNG_SIGNATURE.len()..],
    })
}

/// `(width, height)` from the leading IHDR chunk
pub fn read_header(bytes: &[u8]) -> Option<(u32, u32)> {
    let ihdr = chunks(bytes)?.next().filter(|c| &c.tag == b"IHDR")?;
    let (w, rest) = ihdr.data.split_first_chunk::<4>()?;
    let (h, _) = rest.split_first_chunk::<4>()?;
    Some((u32::from_be_bytes(*w), u32::from_be_bytes(*h)))
}

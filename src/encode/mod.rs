//! Byte-format encoders: PNG streams and PNG-backed ICO containers

pub mod ico;
pub mod png;

pub use ico::{encode_ico, IcoDirEntry, IcoImage};
pub use png::{encode_png, PngEncoder};

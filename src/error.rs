//! Error type shared by the rasterizer, the encoders and the icon pipeline

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot create pixel buffer with invalid size {width}*{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("pixel data has {actual} bytes, expected {expected} for the given size")]
    DataLength { expected: usize, actual: usize },

    #[error("icon size {0} is outside the ICO range 1..=256")]
    InvalidIconSize(u32),

    #[error("an ICO file needs at least one image")]
    EmptyIcon,

    #[error("an ICO file holds at most 65535 images, got {0}")]
    TooManyImages(usize),

    #[error("ICO payloads exceed the 4 GiB offset range")]
    IcoTooLarge,

    #[error("design produced no image for size {0}")]
    MissingRender(u32),

    #[error("unknown icon design '{0}'")]
    UnknownDesign(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

// src/utils/error.rs

use thiserror::Error;

use crate::image::color::ColorFormat;

/// Errors raised while constructing an image around caller-supplied memory.
///
/// Drawing and blitting never produce these: bad geometry and unsupported
/// format pairs are silent no-ops reported through `bool` returns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlitError {
    #[error("Buffer too small for {format:?} {width}x{height} image: need {needed} bytes, got {actual}")]
    BufferTooSmall {
        format: ColorFormat,
        width: u32,
        height: u32,
        needed: usize,
        actual: usize,
    },

    #[error("Pitch {pitch} is smaller than one row of {row_bytes} bytes")]
    PitchTooSmall { pitch: usize, row_bytes: usize },

    #[error("Image dimensions overflow: {0}x{1}")]
    DimensionOverflow(u32, u32),
}

/// A specialized `Result` type for image construction.
pub type Result<T> = std::result::Result<T, BlitError>;

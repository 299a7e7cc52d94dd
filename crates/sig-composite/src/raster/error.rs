//! Error types for raster construction and color parsing.

use std::num::ParseIntError;

use thiserror::Error;

/// A raster could not be interpreted as an RGBA8 image.
///
/// Raised by the background classifier and the color remapper before they
/// touch a single pixel, so a failed transform never yields a half-processed
/// buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Width or height is zero.
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },

    /// The pixel buffer does not hold exactly `width * height * 4` bytes.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,

    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

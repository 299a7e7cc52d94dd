use crate::raster::DecodeError;
use thiserror::Error;

/// Reasons an export cannot produce a draw instruction.
///
/// None of these leave anything behind: the compositor either returns a
/// complete instruction or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("page {index} has no rendered surface ({count} available)")]
    MissingPage { index: usize, count: usize },

    #[error("page {index} has a zero-sized surface")]
    InvalidSurface { index: usize },

    #[error("signature raster is unusable: {0}")]
    Signature(#[from] DecodeError),

    #[error("failed to encode stamp image: {0}")]
    Encode(String),
}

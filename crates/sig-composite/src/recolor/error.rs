use thiserror::Error;

use crate::raster::{DecodeError, ParseColorError};

/// Recoloring failed; the previously displayed signature must stay as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecolorError {
    #[error("invalid color {input:?}: {source}")]
    InvalidColor {
        input: String,
        #[source]
        source: ParseColorError,
    },

    #[error("signature raster is unreadable: {0}")]
    Decode(#[from] DecodeError),
}

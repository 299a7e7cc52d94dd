//! Unified error type for the sig-composite public API.

use crate::export::ExportError;
use crate::placement::PlacementError;
use crate::raster::{DecodeError, ParseColorError};
use crate::recolor::RecolorError;
use thiserror::Error;

/// Every error the crate can produce, for convenient `?` propagation.
///
/// # Example
///
/// ```
/// use sig_composite::{CompositeError, Rgb};
///
/// fn parse(input: &str) -> Result<Rgb, CompositeError> {
///     Ok(input.parse::<Rgb>()?)
/// }
///
/// assert!(parse("#0066CC").is_ok());
/// assert!(matches!(parse("nope"), Err(CompositeError::ParseColor(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositeError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),

    #[error("recolor error: {0}")]
    Recolor(#[from] RecolorError),

    #[error("placement error: {0}")]
    Placement(#[from] PlacementError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

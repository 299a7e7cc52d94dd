//! Background removal for scanned or photographed signatures.
//!
//! [`BackgroundClassifier`] marks every pixel as background or ink and
//! returns a copy of the raster with background alpha set to zero and
//! anti-aliased stroke edges given graded transparency. The result is
//! wrapped in a [`MaskedSignature`], the immutable original for recoloring.

mod classifier;
mod options;
mod signature;

pub use classifier::{graded_alpha, is_background, BackgroundClassifier, EDGE_RAMP};
pub use options::MaskOptions;
pub use signature::MaskedSignature;

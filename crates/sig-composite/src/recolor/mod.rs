//! Ink recoloring.
//!
//! Recoloring always starts from the [`MaskedSignature`], never from an
//! earlier recolor result: picking blue and then red yields exactly the
//! same raster as picking red directly. The type signature of
//! [`ColorRemapper::recolor()`] enforces this.

mod cache;
mod error;
mod options;
mod remapper;

pub use cache::RecolorCache;
pub use error::RecolorError;
pub use options::RecolorOptions;
pub use remapper::{is_ink, ColorRemapper};

//! Raster and color primitives shared by every stage of the pipeline.
//!
//! - [`RasterImage`]: straight-alpha RGBA8 buffer, immutable once produced
//! - [`Rgb`]: target ink color, parsed from hex or a named signature color
//! - [`brightness()`] / [`variation()`]: the two per-pixel measures both the
//!   background classifier and the color remapper are defined in terms of

mod color;
mod error;
mod image;

pub use color::{Rgb, SignatureColor, SIGNATURE_COLORS};
pub use error::{DecodeError, ParseColorError};
pub use image::RasterImage;

/// Mean of the three color channels.
///
/// Kept as an exact `f32` (no integer rounding) so that threshold
/// comparisons such as `brightness > 240` behave identically for
/// `(240, 241, 240)` and `(241, 240, 240)`.
#[inline]
pub fn brightness(r: u8, g: u8, b: u8) -> f32 {
    (r as f32 + g as f32 + b as f32) / 3.0
}

/// Largest pairwise channel difference.
///
/// Neutral greys and whites have a variation near zero; colored ink
/// (blue ballpoint, red stamp) has a large one.
#[inline]
pub fn variation(r: u8, g: u8, b: u8) -> u8 {
    r.abs_diff(g).max(g.abs_diff(b)).max(r.abs_diff(b))
}

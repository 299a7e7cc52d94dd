//! sig-composite: turn a scanned signature into a stamp and place it on a page
//!
//! The crate holds the four stages of the signing pipeline. None of them do
//! I/O; decoding images and reading or writing documents is left to the
//! caller.
//!
//! ```text
//! scanned image (RasterImage)
//!     |
//!     v
//! BackgroundClassifier      white-ish neutral pixels -> transparent,
//!     |                     graded alpha on stroke edges
//!     v
//! MaskedSignature           immutable; the origin for every recolor
//!     |
//!     +---> ColorRemapper   ink -> target color (per color choice)
//!     |
//!     v
//! PlacementController       drag / resize / rotate over a page stack
//!     |
//!     v
//! ExportCompositor          raster px (top-left, Y down, clockwise)
//!                           -> points (bottom-left, Y up, counter-clockwise)
//!     |
//!     v
//! DrawInstruction           handed to the document writer
//! ```
//!
//! # Quick Start
//!
//! ```
//! use sig_composite::{PageSurface, Placement, RasterImage, Rgb, SignaturePipeline};
//!
//! let scan = RasterImage::filled(120, 60, [20, 20, 20, 255]);
//! let page = PageSurface::new(900.0, 1200.0, 612.0, 792.0);
//! let placement = Placement {
//!     page_index: 0,
//!     x: 50.0,
//!     y: 50.0,
//!     size_width: 120.0,
//!     rotation: 0.0,
//! };
//!
//! let instruction = SignaturePipeline::new()
//!     .stamp(&scan, Rgb::BLACK, &placement, &[page])
//!     .unwrap();
//!
//! assert!((instruction.width - 81.6).abs() < 1e-9);
//! assert!((instruction.height - 39.6).abs() < 1e-9);
//! assert!((instruction.y - 719.4).abs() < 1e-9);
//! ```
//!
//! # Recoloring
//!
//! [`ColorRemapper::recolor()`] only accepts a [`MaskedSignature`], so a
//! recolored raster can never be fed back in. Switching from blue to red
//! gives exactly the same pixels as choosing red directly.
//! [`RecolorCache`] memoizes the result per color.
//!
//! # Placement
//!
//! [`PlacementController`] owns the one [`Placement`] and at most one
//! gesture. Positions are clamped to the page after every drag update and
//! rotation is kept in `[0, 360)`.

pub mod api;
pub mod export;
pub mod mask;
pub mod placement;
pub mod raster;
pub mod recolor;


pub use api::{CompositeError, MaskOutcome, SignaturePipeline};
pub use export::{DrawInstruction, ExportCompositor, ExportError, PageSurface, StampGeometry};
pub use mask::{BackgroundClassifier, MaskOptions, MaskedSignature};
pub use placement::{
    GestureState, HitTarget, PageLayout, PageSize, Placement, PlacementController,
    PlacementError, Point,
};
pub use raster::{DecodeError, ParseColorError, RasterImage, Rgb, SignatureColor, SIGNATURE_COLORS};
pub use recolor::{ColorRemapper, RecolorCache, RecolorError, RecolorOptions};

//! Mapping an on-screen placement into document space.
//!
//! Placements live in a page's raster pixel space (origin top-left, Y down,
//! rotation clockwise). Documents use points with the origin at the
//! bottom-left, Y up and counter-clockwise rotation. [`ExportCompositor`]
//! bridges the two and produces the single [`DrawInstruction`] handed to the
//! document writer.

mod compositor;
mod error;
mod geometry;
mod surface;

pub use compositor::{DrawInstruction, ExportCompositor};
pub use error::ExportError;
pub use geometry::StampGeometry;
pub use surface::PageSurface;

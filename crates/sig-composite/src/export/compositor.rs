use super::error::ExportError;
use super::geometry::{stamp_matrix, StampGeometry};
use super::surface::PageSurface;
use crate::placement::Placement;
use crate::raster::RasterImage;

/// Everything the document writer needs to stamp one page.
///
/// Coordinates are in points, origin bottom-left. `x`/`y` is where the
/// stamp's own origin lands after rotating about its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawInstruction {
    pub page_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Counter-clockwise degrees.
    pub rotation: f64,
    /// PNG-encoded stamp.
    pub image_bytes: Vec<u8>,
}

impl DrawInstruction {
    /// Rebuild the geometry this instruction was created from.
    pub fn matrix(&self) -> [f64; 6] {
        stamp_matrix(self.width, self.height, self.rotation, (self.x, self.y))
    }
}

/// Turns the final placement into a [`DrawInstruction`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportCompositor;

impl ExportCompositor {
    pub fn new() -> Self {
        Self
    }

    /// Geometry only, without encoding the stamp.
    pub fn geometry(
        &self,
        placement: &Placement,
        signature: &RasterImage,
        pages: &[PageSurface],
    ) -> Result<StampGeometry, ExportError> {
        let page = pages
            .get(placement.page_index)
            .ok_or(ExportError::MissingPage {
                index: placement.page_index,
                count: pages.len(),
            })?;
        if !page.is_usable() {
            return Err(ExportError::InvalidSurface {
                index: placement.page_index,
            });
        }
        signature.check_layout()?;

        Ok(StampGeometry::compute(
            placement,
            signature.aspect_ratio(),
            page,
        ))
    }

    /// Build the draw instruction for `placement`.
    ///
    /// Fails without producing anything when the target page has no surface.
    pub fn compose(
        &self,
        placement: &Placement,
        signature: &RasterImage,
        pages: &[PageSurface],
    ) -> Result<DrawInstruction, ExportError> {
        let geometry = self.geometry(placement, signature, pages)?;
        let image_bytes = signature
            .to_png()
            .map_err(|e| ExportError::Encode(e.to_string()))?;

        tracing::debug!(
            page = placement.page_index,
            x = geometry.anchor.0,
            y = geometry.anchor.1,
            width = geometry.width,
            height = geometry.height,
            rotation = geometry.rotation,
            "Composed draw instruction"
        );

        Ok(DrawInstruction {
            page_index: placement.page_index,
            x: geometry.anchor.0,
            y: geometry.anchor.1,
            width: geometry.width,
            height: geometry.height,
            rotation: geometry.rotation,
            image_bytes,
        })
    }
}

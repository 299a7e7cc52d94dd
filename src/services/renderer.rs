use async_trait::async_trait;
use sig_composite::{PageSurface, RasterImage};
use std::sync::Arc;

use crate::error::DocumentError;
use crate::services::pdf;

/// Upper bound for either side of a page raster.
pub const MAX_RASTER_SIDE: f64 = 4096.0;

/// A page ready for the viewer: its raster and the page box it stands for.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub surface: PageSurface,
    pub raster: Arc<RasterImage>,
}

/// Turns a source document into page rasters
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render every page in order. Either all pages come back or an error
    /// does; there is no partial result.
    async fn render(&self, document: &[u8]) -> Result<Vec<RenderedPage>, DocumentError>;
}

/// Sizes page rasters from each PDF page's MediaBox.
///
/// Page content is not rasterized; every page comes back as blank paper at
/// the configured resolution.
#[derive(Debug, Clone)]
pub struct PdfPageRenderer {
    dpi: f64,
}

impl PdfPageRenderer {
    pub fn new(dpi: f64) -> Self {
        Self { dpi }
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Synchronous render, one page after the other.
    pub fn render_blocking(&self, document: &[u8]) -> Result<Vec<RenderedPage>, DocumentError> {
        let doc = pdf::load(document)?;
        let ids = pdf::page_ids(&doc);
        if ids.is_empty() {
            return Err(DocumentError::NoPages);
        }

        let mut pages = Vec::with_capacity(ids.len());
        for (index, id) in ids.into_iter().enumerate() {
            let (width_pt, height_pt) = pdf::page_size(&doc, id)?;
            let (width_px, height_px) = raster_size(width_pt, height_pt, self.dpi);
            tracing::trace!(index, width_pt, height_pt, width_px, height_px, "Rendered page");
            pages.push(RenderedPage {
                surface: PageSurface::new(width_px as f64, height_px as f64, width_pt, height_pt),
                raster: Arc::new(RasterImage::filled(width_px, height_px, [255, 255, 255, 255])),
            });
        }

        tracing::info!(pages = pages.len(), dpi = self.dpi, "Rendered document");
        Ok(pages)
    }
}

/// Raster pixel size for a page, capped at [`MAX_RASTER_SIDE`] while
/// keeping the aspect ratio.
fn raster_size(width_pt: f64, height_pt: f64, dpi: f64) -> (u32, u32) {
    let mut scale = dpi / 72.0;
    let longest = width_pt.max(height_pt) * scale;
    if longest > MAX_RASTER_SIDE {
        scale *= MAX_RASTER_SIDE / longest;
    }
    let px = |pt: f64| (pt * scale).round().max(1.0) as u32;
    (px(width_pt), px(height_pt))
}

#[async_trait]
impl PageRenderer for PdfPageRenderer {
    /// Runs on a blocking worker so parsing large documents never stalls
    /// the runtime.
    async fn render(&self, document: &[u8]) -> Result<Vec<RenderedPage>, DocumentError> {
        let renderer = self.clone();
        let bytes = document.to_vec();
        tokio::task::spawn_blocking(move || renderer.render_blocking(&bytes))
            .await
            .map_err(|e| DocumentError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pdf::fixtures::pdf_with_pages;

    #[test]
    fn test_raster_size() {
        assert_eq!(raster_size(612.0, 792.0, 72.0), (612, 792));
        assert_eq!(raster_size(612.0, 792.0, 144.0), (1224, 1584));
        let (w, h) = raster_size(10_000.0, 5_000.0, 72.0);
        assert_eq!((w, h), (4096, 2048));
    }

    #[tokio::test]
    async fn test_render_pages_in_order() {
        let renderer = PdfPageRenderer::new(72.0);
        let pages = renderer
            .render(&pdf_with_pages(&[(612, 792), (792, 612)]))
            .await
            .unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].surface, PageSurface::new(612.0, 792.0, 612.0, 792.0));
        assert_eq!(pages[1].surface, PageSurface::new(792.0, 612.0, 792.0, 612.0));
        assert_eq!(pages[1].raster.width(), 792);
        assert_eq!(pages[1].raster.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[tokio::test]
    async fn test_render_invalid_document() {
        let err = PdfPageRenderer::new(72.0)
            .render(b"not a pdf at all")
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidDocument(_)));
    }

    #[tokio::test]
    async fn test_render_document_without_pages() {
        let err = PdfPageRenderer::new(72.0)
            .render(&pdf_with_pages(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::NoPages));
    }
}

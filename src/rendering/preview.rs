use sig_composite::{Placement, RasterImage};
use tiny_skia::{FilterQuality, PixmapPaint, Transform};

use super::codec;
use crate::error::RenderError;
use crate::services::PreviewJob;

/// Draws the signature onto a page raster the way it will be exported.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewRenderer;

impl PreviewRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Composite `stamp` over `page` and encode the result as PNG.
    pub fn render(
        &self,
        page: &RasterImage,
        stamp: Option<(&RasterImage, &Placement)>,
    ) -> Result<Vec<u8>, RenderError> {
        let mut canvas = codec::raster_to_pixmap(page)?;

        if let Some((signature, placement)) = stamp {
            let overlay = codec::raster_to_pixmap(signature)?;
            let transform = stamp_transform(signature, placement);
            let paint = PixmapPaint {
                quality: FilterQuality::Bilinear,
                ..Default::default()
            };
            canvas.draw_pixmap(0, 0, overlay.as_ref(), &paint, transform, None);
            tracing::trace!(
                page = placement.page_index,
                x = placement.x,
                y = placement.y,
                rotation = placement.rotation,
                "Drew stamp onto preview"
            );
        }

        codec::encode_png(&canvas)
    }

    /// Render a detached [`PreviewJob`] on a blocking worker.
    pub async fn render_job(&self, job: PreviewJob) -> Result<Vec<u8>, RenderError> {
        let renderer = *self;
        tokio::task::spawn_blocking(move || {
            let stamp = job.stamp.as_ref().map(|(s, p)| (s.as_ref(), p));
            renderer.render(&job.page.raster, stamp)
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
    }
}

/// Maps signature pixels onto the page: scaled to the placement size, moved
/// to its top-left corner, then turned clockwise about its centre.
fn stamp_transform(signature: &RasterImage, placement: &Placement) -> Transform {
    let aspect = signature.aspect_ratio();
    let width = placement.size_width;
    let height = placement.size_height(aspect);
    let (cx, cy) = placement.center(aspect);

    let sx = (width / signature.width() as f64) as f32;
    let sy = (height / signature.height() as f64) as f32;
    Transform::from_row(sx, 0.0, 0.0, sy, placement.x as f32, placement.y as f32)
        .post_rotate_at(placement.rotation as f32, cx as f32, cy as f32)
}

//! Conversions between straight-alpha rasters and tiny-skia pixmaps.

use sig_composite::RasterImage;
use std::io::Cursor;
use tiny_skia::{ColorU8, IntSize, Pixmap};

use crate::error::RenderError;

/// Premultiply a raster into a pixmap.
pub fn raster_to_pixmap(raster: &RasterImage) -> Result<Pixmap, RenderError> {
    raster.check_layout()?;
    let size = IntSize::from_wh(raster.width(), raster.height()).ok_or(RenderError::PixmapAllocation)?;

    let mut data = Vec::with_capacity(raster.pixels().len());
    for px in raster.pixels().chunks_exact(4) {
        let c = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Pixmap::from_vec(data, size).ok_or(RenderError::PixmapAllocation)
}

/// Demultiply a pixmap back into a raster.
pub fn pixmap_to_raster(pixmap: &Pixmap) -> RasterImage {
    let mut pixels = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        pixels.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RasterImage::from_rgba(pixmap.width(), pixmap.height(), pixels)
}

/// PNG-encode a pixmap as straight-alpha RGBA.
///
/// Previews are regenerated on every request, so compression favours speed.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RenderError> {
    let raster = pixmap_to_raster(pixmap);
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, raster.width(), raster.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(raster.pixels())
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

//! Per-pixel ink recoloring.

use crate::mask::MaskedSignature;
use crate::raster::{brightness, RasterImage, Rgb};

use super::error::RecolorError;
use super::options::RecolorOptions;

/// Replaces the color of ink pixels while leaving transparency alone.
///
/// # Example
///
/// ```
/// use sig_composite::{ColorRemapper, MaskedSignature, RasterImage, RecolorOptions, Rgb};
///
/// let ink = RasterImage::from_rgba(1, 1, vec![10, 10, 10, 200]);
/// let signature = MaskedSignature::masked(ink);
///
/// let blue = ColorRemapper::new(RecolorOptions::default())
///     .recolor(&signature, Rgb::new(0x00, 0x66, 0xCC))
///     .unwrap();
/// assert_eq!(blue.pixel(0, 0), Some([0x00, 0x66, 0xCC, 200]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorRemapper {
    options: RecolorOptions,
}

impl ColorRemapper {
    pub fn new(options: RecolorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RecolorOptions {
        &self.options
    }

    /// Recolor the ink of `signature` to `target`.
    pub fn recolor(
        &self,
        signature: &MaskedSignature,
        target: Rgb,
    ) -> Result<RasterImage, RecolorError> {
        let source = signature.raster();
        source.check_layout()?;

        let cutoff = self.options.ink_cutoff();
        let mut pixels = source.pixels().to_vec();
        let mut recolored = 0usize;

        for px in pixels.chunks_exact_mut(4) {
            if px[3] == 0 || !is_ink(px[0], px[1], px[2], cutoff) {
                continue;
            }
            px[0] = target.r;
            px[1] = target.g;
            px[2] = target.b;
            if !self.options.preserve_alpha {
                px[3] = 255;
            }
            recolored += 1;
        }

        tracing::debug!(color = %target, recolored, "Recolored signature");

        Ok(RasterImage::from_rgba(source.width(), source.height(), pixels))
    }

    /// Recolor using a hex string or built-in color name.
    pub fn recolor_str(
        &self,
        signature: &MaskedSignature,
        input: &str,
    ) -> Result<RasterImage, RecolorError> {
        let target = Rgb::resolve(input).map_err(|source| RecolorError::InvalidColor {
            input: input.to_string(),
            source,
        })?;
        self.recolor(signature, target)
    }
}

/// `true` when a pixel is dark enough to be recolored.
#[inline]
pub fn is_ink(r: u8, g: u8, b: u8, cutoff: f32) -> bool {
    brightness(r, g, b) < cutoff
}

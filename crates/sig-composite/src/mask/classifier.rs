//! Per-pixel background/ink classification.

use crate::raster::{brightness, variation, DecodeError, RasterImage};

use super::options::MaskOptions;

/// Width of the brightness band below the threshold over which ink alpha
/// ramps from fully opaque to fully transparent.
pub const EDGE_RAMP: f32 = 50.0;

/// Classifies pixels as background or ink and masks the background out.
///
/// # Example
///
/// ```
/// use sig_composite::{BackgroundClassifier, MaskOptions, RasterImage};
///
/// // One white paper pixel, one black ink pixel
/// let scan = RasterImage::from_rgba(2, 1, vec![255, 255, 255, 255, 0, 0, 0, 255]);
/// let masked = BackgroundClassifier::new(MaskOptions::default())
///     .classify(&scan)
///     .unwrap();
///
/// assert_eq!(masked.pixel(0, 0).unwrap()[3], 0);
/// assert_eq!(masked.pixel(1, 0).unwrap()[3], 255);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundClassifier {
    options: MaskOptions,
}

impl BackgroundClassifier {
    pub fn new(options: MaskOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MaskOptions {
        &self.options
    }

    /// Produce a masked copy of `image`.
    ///
    /// Fails only when the raster's buffer does not match its dimensions;
    /// the input is never modified.
    pub fn classify(&self, image: &RasterImage) -> Result<RasterImage, DecodeError> {
        image.check_layout()?;

        let MaskOptions {
            threshold,
            tolerance,
            edge_smoothing,
        } = self.options;

        let mut pixels = image.pixels().to_vec();
        let mut cleared = 0usize;

        for px in pixels.chunks_exact_mut(4) {
            let (r, g, b, a) = (px[0], px[1], px[2], px[3]);
            if a == 0 {
                continue;
            }

            if is_background(r, g, b, threshold, tolerance) {
                px[3] = 0;
                cleared += 1;
            } else if edge_smoothing {
                // Smoothing can only take alpha away
                px[3] = a.min(graded_alpha(brightness(r, g, b), threshold));
            }
        }

        tracing::debug!(
            width = image.width(),
            height = image.height(),
            cleared,
            threshold,
            tolerance,
            edge_smoothing,
            "Masked signature background"
        );

        Ok(RasterImage::from_rgba(image.width(), image.height(), pixels))
    }
}

/// `true` when the pixel is bright and neutral enough to be paper.
#[inline]
pub fn is_background(r: u8, g: u8, b: u8, threshold: u8, tolerance: u8) -> bool {
    brightness(r, g, b) > threshold as f32 && variation(r, g, b) < tolerance
}

/// Alpha for an ink pixel of the given brightness.
///
/// ```text
/// brightness < threshold - 50        -> 255
/// brightness > threshold             -> 0
/// otherwise                          -> floor(255 * (threshold - brightness) / 50)
/// ```
#[inline]
pub fn graded_alpha(brightness: f32, threshold: u8) -> u8 {
    let threshold = threshold as f32;
    if brightness < threshold - EDGE_RAMP {
        255
    } else if brightness > threshold {
        0
    } else {
        let ratio = (threshold - brightness) / EDGE_RAMP;
        (255.0 * ratio).floor().clamp(0.0, 255.0) as u8
    }
}

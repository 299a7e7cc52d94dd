/// One rendered page: the raster the user interacts with and the native
/// page box it stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSurface {
    /// Raster width in pixels.
    pub width_px: f64,
    /// Raster height in pixels.
    pub height_px: f64,
    /// Native page width in points.
    pub width_pt: f64,
    /// Native page height in points.
    pub height_pt: f64,
}

impl PageSurface {
    pub fn new(width_px: f64, height_px: f64, width_pt: f64, height_pt: f64) -> Self {
        Self {
            width_px,
            height_px,
            width_pt,
            height_pt,
        }
    }

    /// Points per raster pixel, horizontally.
    #[inline]
    pub fn scale_x(&self) -> f64 {
        self.width_pt / self.width_px
    }

    /// Points per raster pixel, vertically. Not assumed equal to
    /// [`scale_x`](Self::scale_x).
    #[inline]
    pub fn scale_y(&self) -> f64 {
        self.height_pt / self.height_px
    }

    /// Both raster dimensions are positive and finite.
    pub fn is_usable(&self) -> bool {
        [self.width_px, self.height_px, self.width_pt, self.height_pt]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_independent_scales() {
        let s = PageSurface::new(1000.0, 500.0, 500.0, 500.0);
        assert_eq!(s.scale_x(), 0.5);
        assert_eq!(s.scale_y(), 1.0);
    }

    #[test]
    fn test_is_usable() {
        assert!(PageSurface::new(900.0, 1200.0, 612.0, 792.0).is_usable());
        assert!(!PageSurface::new(0.0, 1200.0, 612.0, 792.0).is_usable());
        assert!(!PageSurface::new(900.0, f64::NAN, 612.0, 792.0).is_usable());
    }
}

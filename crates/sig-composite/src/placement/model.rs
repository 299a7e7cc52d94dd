/// Smallest stamp width a resize can produce, in raster pixels.
pub const MIN_STAMP_WIDTH: f64 = 40.0;

/// Where the signature sits: page, top-left corner, width and rotation.
///
/// Coordinates are raster pixels of page `page_index`, origin top-left,
/// y growing downward. The stamp height is not stored; it always follows
/// from the signature's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page_index: usize,
    pub x: f64,
    pub y: f64,
    pub size_width: f64,
    /// Clockwise degrees in `[0, 360)`.
    pub rotation: f64,
}

impl Placement {
    /// Stamp height for a signature with the given `height / width` ratio.
    #[inline]
    pub fn size_height(&self, aspect: f64) -> f64 {
        self.size_width * aspect
    }

    /// Centre of the stamp in page pixel space.
    pub fn center(&self, aspect: f64) -> (f64, f64) {
        (
            self.x + self.size_width / 2.0,
            self.y + self.size_height(aspect) / 2.0,
        )
    }
}

/// Fold any angle in degrees into `[0, 360)`.
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let r = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.0
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(0.0), 0.0);
        assert_eq!(normalize_rotation(360.0), 0.0);
        assert_eq!(normalize_rotation(-90.0), 270.0);
        assert_eq!(normalize_rotation(725.0), 5.0);
        assert_eq!(normalize_rotation(-1e-15), 0.0);
        assert_eq!(normalize_rotation(f64::NAN), 0.0);
    }

    #[test]
    fn test_size_height_follows_aspect() {
        let p = Placement {
            page_index: 0,
            x: 10.0,
            y: 20.0,
            size_width: 120.0,
            rotation: 0.0,
        };
        assert_eq!(p.size_height(0.5), 60.0);
        assert_eq!(p.center(0.5), (70.0, 50.0));
    }
}

use super::surface::PageSurface;
use crate::placement::Placement;

/// Every intermediate value of the placement-to-page transform.
///
/// All coordinates are in points, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampGeometry {
    pub scale_x: f64,
    pub scale_y: f64,
    /// Stamp width in points.
    pub width: f64,
    /// Stamp height in points, derived from the signature aspect ratio.
    pub height: f64,
    /// Bottom-left corner of the unrotated stamp.
    pub origin: (f64, f64),
    /// Centre of the stamp; the pivot for rotation.
    pub center: (f64, f64),
    /// Where the rotated stamp's local origin lands.
    pub anchor: (f64, f64),
    /// Counter-clockwise rotation in degrees.
    pub rotation: f64,
}

impl StampGeometry {
    /// `aspect` is the signature's `height / width`.
    pub fn compute(placement: &Placement, aspect: f64, page: &PageSurface) -> Self {
        let scale_x = page.scale_x();
        let scale_y = page.scale_y();

        let width = placement.size_width * scale_x;
        let height = placement.size_width * aspect * scale_y;

        // Flip Y: the top edge in raster space becomes the bottom edge here
        let origin_x = placement.x * scale_x;
        let origin_y = page.height_pt - placement.y * scale_y - height;

        let center = (origin_x + width / 2.0, origin_y + height / 2.0);

        // Screen rotation is clockwise-positive, document rotation is not
        let rotation = if placement.rotation == 0.0 {
            0.0
        } else {
            -placement.rotation
        };

        let anchor = if rotation == 0.0 {
            (origin_x, origin_y)
        } else {
            let (sin, cos) = rotation.to_radians().sin_cos();
            let (hx, hy) = (-width / 2.0, -height / 2.0);
            (
                center.0 + hx * cos - hy * sin,
                center.1 + hx * sin + hy * cos,
            )
        };

        Self {
            scale_x,
            scale_y,
            width,
            height,
            origin: (origin_x, origin_y),
            center,
            anchor,
            rotation,
        }
    }

    /// The `cm` operands that map the unit square onto the rotated stamp.
    pub fn matrix(&self) -> [f64; 6] {
        stamp_matrix(self.width, self.height, self.rotation, self.anchor)
    }
}

/// Unit square scaled to `width × height`, rotated counter-clockwise by
/// `rotation` degrees and moved to `anchor`.
///
/// Negative zero is folded to zero so written operands never read `-0`.
pub(crate) fn stamp_matrix(width: f64, height: f64, rotation: f64, anchor: (f64, f64)) -> [f64; 6] {
    let (sin, cos) = rotation.to_radians().sin_cos();
    [
        width * cos,
        width * sin,
        -height * sin,
        height * cos,
        anchor.0,
        anchor.1,
    ]
    .map(|v| v + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn placement(rotation: f64) -> Placement {
        Placement {
            page_index: 0,
            x: 50.0,
            y: 50.0,
            size_width: 120.0,
            rotation,
        }
    }

    #[test]
    fn test_letter_page_unrotated() {
        let page = PageSurface::new(900.0, 1200.0, 612.0, 792.0);
        let g = StampGeometry::compute(&placement(0.0), 0.5, &page);
        // 612/900 across, 792/1200 down
        assert!(close(g.scale_x, 0.68));
        assert!(close(g.scale_y, 0.66));
        assert!(close(g.width, 81.6));
        assert!(close(g.height, 39.6));
        assert!(close(g.origin.0, 34.0));
        assert!(close(g.origin.1, 792.0 - 33.0 - 39.6));
        assert_eq!(g.anchor, g.origin);
        assert_eq!(g.rotation, 0.0);
    }

    #[test]
    fn test_unrotated_matrix_has_no_negative_zero() {
        let page = PageSurface::new(900.0, 1200.0, 612.0, 792.0);
        let m = StampGeometry::compute(&placement(0.0), 0.5, &page).matrix();
        for v in m {
            assert!(!(v == 0.0 && v.is_sign_negative()), "{m:?}");
        }
        assert_eq!(format!("{:.4}", m[2]), "0.0000");
    }

    #[test]
    fn test_anchor_keeps_centre_fixed() {
        let page = PageSurface::new(900.0, 1200.0, 612.0, 792.0);
        for deg in [30.0, 90.0, 180.0, 270.0, 333.0] {
            let g = StampGeometry::compute(&placement(deg), 0.5, &page);
            // Centre of the rotated unit square: matrix applied to (0.5, 0.5)
            let [a, b, c, d, e, f] = g.matrix();
            let cx = a * 0.5 + c * 0.5 + e;
            let cy = b * 0.5 + d * 0.5 + f;
            assert!(close(cx, g.center.0), "deg {deg}: {cx} vs {}", g.center.0);
            assert!(close(cy, g.center.1), "deg {deg}: {cy} vs {}", g.center.1);
        }
    }

    #[test]
    fn test_non_uniform_scale() {
        let page = PageSurface::new(1000.0, 1000.0, 500.0, 1000.0);
        let p = Placement {
            page_index: 0,
            x: 100.0,
            y: 0.0,
            size_width: 200.0,
            rotation: 0.0,
        };
        let g = StampGeometry::compute(&p, 0.5, &page);
        assert_eq!(g.width, 100.0);
        assert_eq!(g.height, 100.0);
        assert_eq!(g.origin, (50.0, 900.0));
    }
}

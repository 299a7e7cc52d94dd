//! The vertical page stack pointer coordinates are expressed in.

use crate::export::PageSurface;

/// A point in view or page pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate around `center` by `degrees` (clockwise on a y-down screen).
    pub fn rotated_about(self, center: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }
}

/// Raster size of one page in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Pages stacked top to bottom, left-aligned at `x = 0`, with `gap` pixels
/// between consecutive pages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pages: Vec<PageSize>,
    tops: Vec<f64>,
    gap: f64,
}

impl PageLayout {
    pub fn new(pages: Vec<PageSize>, gap: f64) -> Self {
        let gap = gap.max(0.0);
        let mut tops = Vec::with_capacity(pages.len());
        let mut top = 0.0;
        for page in &pages {
            tops.push(top);
            top += page.height + gap;
        }
        Self { pages, tops, gap }
    }

    /// Layout for rendered pages, using their raster sizes.
    pub fn from_surfaces(surfaces: &[PageSurface], gap: f64) -> Self {
        Self::new(
            surfaces
                .iter()
                .map(|s| PageSize {
                    width: s.width_px,
                    height: s.height_px,
                })
                .collect(),
            gap,
        )
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn page(&self, index: usize) -> Option<PageSize> {
        self.pages.get(index).copied()
    }

    /// View-space y of the top edge of page `index`.
    pub fn page_top(&self, index: usize) -> Option<f64> {
        self.tops.get(index).copied()
    }

    /// Page under view-space height `y`.
    ///
    /// A point inside the gap belongs to the page above it; points above the
    /// first page map to the first page and points below the last page to
    /// the last. Returns `None` only when there are no pages.
    pub fn page_at(&self, y: f64) -> Option<usize> {
        if self.pages.is_empty() {
            return None;
        }
        let index = self
            .tops
            .iter()
            .zip(&self.pages)
            .position(|(top, page)| y < top + page.height + self.gap)
            .unwrap_or(self.pages.len() - 1);
        Some(index)
    }

    /// Convert a view-space point into page `index`'s pixel space.
    pub fn to_page_local(&self, point: Point, index: usize) -> Option<Point> {
        self.page_top(index)
            .map(|top| Point::new(point.x, point.y - top))
    }

    /// Convert a page-local point into view space.
    pub fn to_view(&self, point: Point, index: usize) -> Option<Point> {
        self.page_top(index)
            .map(|top| Point::new(point.x, point.y + top))
    }

    /// Total height of the stack.
    pub fn total_height(&self) -> f64 {
        match (self.tops.last(), self.pages.last()) {
            (Some(top), Some(page)) => top + page.height,
            _ => 0.0,
        }
    }
}

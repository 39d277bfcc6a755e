//! Bounding boxes and center/distance math for mask regions.
//!
//! # Coordinate System
//!
//! - Pixel rows grow downward: `y = 0` is the top row
//! - Points are `(y, x)` tuples of `f64`, matching row-major mask storage
//! - Boxes are inclusive on all four edges: a box covering a single pixel
//!   has `min_y == max_y` and `min_x == max_x`

use serde::{Deserialize, Serialize};

/// An inclusive rectangular pixel region.
///
/// Both endpoints of each axis are part of the region, so a single-pixel
/// box has `width() == height() == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Topmost row of the region.
    pub min_y: u32,
    /// Bottommost row of the region (inclusive).
    pub max_y: u32,
    /// Leftmost column of the region.
    pub min_x: u32,
    /// Rightmost column of the region (inclusive).
    pub max_x: u32,
}

impl BoundingBox {
    /// Create a bounding box from inclusive edge coordinates.
    pub fn new(min_y: u32, max_y: u32, min_x: u32, max_x: u32) -> Self {
        debug_assert!(min_y <= max_y, "Inverted y span");
        debug_assert!(min_x <= max_x, "Inverted x span");
        Self {
            min_y,
            max_y,
            min_x,
            max_x,
        }
    }

    /// Number of columns covered.
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Number of rows covered.
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Geometric center of the region as a `(y, x)` point.
    ///
    /// This is the true midpoint of both spans; for even-length spans it
    /// falls halfway between two pixel rows/columns.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_y as f64 + self.max_y as f64) / 2.0,
            (self.min_x as f64 + self.max_x as f64) / 2.0,
        )
    }

    /// The four corner points in `(y, x)` order.
    ///
    /// Order: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [(f64, f64); 4] {
        let (y0, y1) = (self.min_y as f64, self.max_y as f64);
        let (x0, x1) = (self.min_x as f64, self.max_x as f64);
        [(y0, x0), (y0, x1), (y1, x0), (y1, x1)]
    }

    /// Radius of the smallest circle centered on [`BoundingBox::center`]
    /// that contains every corner of the region.
    ///
    /// For a square region all corners are equidistant; for rectangles the
    /// farthest corner wins.
    pub fn enclosing_radius(&self) -> f64 {
        let center = self.center();
        self.corners()
            .iter()
            .map(|&corner| distance(center, corner))
            .fold(0.0, f64::max)
    }

    /// Check whether a pixel coordinate falls inside the region.
    pub fn contains(&self, y: u32, x: u32) -> bool {
        y >= self.min_y && y <= self.max_y && x >= self.min_x && x <= self.max_x
    }
}

/// Euclidean distance between two `(y, x)` points.
///
/// # Example
///
/// ```
/// use dermalens_core::geometry::distance;
///
/// let d = distance((0.0, 0.0), (3.0, 4.0));
/// assert_eq!(d, 5.0);
/// ```
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dy = a.0 - b.0;
    let dx = a.1 - b.1;
    (dy * dy + dx * dx).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel_box() {
        let bbox = BoundingBox::new(5, 5, 7, 7);
        assert_eq!(bbox.width(), 1);
        assert_eq!(bbox.height(), 1);
        assert_eq!(bbox.center(), (5.0, 7.0));
        assert_eq!(bbox.enclosing_radius(), 0.0);
    }

    #[test]
    fn test_center_of_square_box() {
        let bbox = BoundingBox::new(0, 10, 0, 10);
        assert_eq!(bbox.center(), (5.0, 5.0));
    }

    #[test]
    fn test_center_of_offset_box() {
        // The center must stay inside the box even when it is far from
        // the origin
        let bbox = BoundingBox::new(10, 20, 30, 50);
        let (cy, cx) = bbox.center();
        assert_eq!((cy, cx), (15.0, 40.0));
        assert!(bbox.contains(cy as u32, cx as u32));
    }

    #[test]
    fn test_center_of_even_span() {
        // A 2-row span centers between the rows
        let bbox = BoundingBox::new(0, 1, 0, 1);
        assert_eq!(bbox.center(), (0.5, 0.5));
    }

    #[test]
    fn test_distance_is_euclidean() {
        // Classic 3-4-5 triangle
        assert_eq!(distance((0.0, 0.0), (3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        assert_eq!(distance((2.5, 7.5), (2.5, 7.5)), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = (1.0, 2.0);
        let b = (4.0, 6.0);
        assert_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn test_enclosing_radius_square() {
        // Half-diagonal of an 11x11 region spanning 10 units per axis
        let bbox = BoundingBox::new(0, 10, 0, 10);
        let expected = 50f64.sqrt();
        assert!(
            (bbox.enclosing_radius() - expected).abs() < 1e-9,
            "radius was {}",
            bbox.enclosing_radius()
        );
    }

    #[test]
    fn test_enclosing_radius_rectangle() {
        // Wide box: corner offsets are (5, 10) from the center
        let bbox = BoundingBox::new(0, 10, 0, 20);
        let expected = (25f64 + 100.0).sqrt();
        assert!((bbox.enclosing_radius() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_enclosing_radius_covers_all_corners() {
        let bbox = BoundingBox::new(3, 17, 5, 9);
        let radius = bbox.enclosing_radius();
        let center = bbox.center();
        for corner in bbox.corners() {
            assert!(distance(center, corner) <= radius + 1e-12);
        }
    }

    #[test]
    fn test_corners_order() {
        let bbox = BoundingBox::new(1, 2, 3, 4);
        assert_eq!(
            bbox.corners(),
            [(1.0, 3.0), (1.0, 4.0), (2.0, 3.0), (2.0, 4.0)]
        );
    }

    #[test]
    fn test_contains() {
        let bbox = BoundingBox::new(2, 4, 3, 6);
        assert!(bbox.contains(2, 3));
        assert!(bbox.contains(4, 6));
        assert!(bbox.contains(3, 5));
        assert!(!bbox.contains(1, 3));
        assert!(!bbox.contains(5, 6));
        assert!(!bbox.contains(3, 7));
    }
}

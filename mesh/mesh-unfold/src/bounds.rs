//! Planar axis-aligned bounding box.

use nalgebra::{Point2, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in the plane.
///
/// ```
/// use mesh_unfold::{Bounds2, Point2};
///
/// let points = [Point2::new(0.0, 1.0), Point2::new(3.0, -1.0)];
/// let bounds = Bounds2::from_points(points.iter());
///
/// assert_eq!(bounds.width(), 3.0);
/// assert_eq!(bounds.height(), 2.0);
/// assert_eq!(bounds.size(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds2 {
    /// Minimum corner.
    pub min: Point2<f64>,
    /// Maximum corner.
    pub max: Point2<f64>,
}

impl Bounds2 {
    /// Create an empty box (min > max), ready to be expanded.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Bounding box of a set of points. Empty if there are none.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point2<f64>>) -> Self {
        let mut bounds = Self::empty();
        for point in points {
            bounds.expand_to_include(point);
        }
        bounds
    }

    /// Grow the box to include a point.
    pub fn expand_to_include(&mut self, point: &Point2<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Check whether the box contains no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Extent along X (0 when empty).
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.x - self.min.x }
    }

    /// Extent along Y (0 when empty).
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.y - self.min.y }
    }

    /// Largest of width and height.
    #[inline]
    #[must_use]
    pub fn size(&self) -> f64 {
        self.width().max(self.height())
    }

    /// Width and height as a vector.
    #[inline]
    #[must_use]
    pub fn extent(&self) -> Vector2<f64> {
        Vector2::new(self.width(), self.height())
    }

    /// Center of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point2<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

impl Default for Bounds2 {
    fn default() -> Self {
        Self::empty()
    }
}

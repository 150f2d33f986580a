//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 4.0, 2.0));
/// assert!((aabb.max_extent() - 10.0).abs() < 1e-12);
/// assert_eq!(aabb.center(), Point3::new(5.0, 2.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from two corners, ordering each axis.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// An inverted box that contains nothing; expanding it by any point
    /// yields that point.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_to_include(p);
        }
        aabb
    }

    /// True if the box contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Largest extent over the three axes.
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.size().max()
    }

    /// Length of the main diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.size().norm()
    }

    /// Grow the box to include `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// The eight corners, bottom face first.
    #[must_use]
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
        ]
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_expands_to_point() {
        let mut aabb = Aabb::empty();
        assert!(aabb.is_empty());
        aabb.expand_to_include(&Point3::new(1.0, -2.0, 3.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, aabb.max);
    }

    #[test]
    fn new_orders_corners() {
        let aabb = Aabb::new(Point3::new(1.0, 5.0, 0.0), Point3::new(0.0, 2.0, 3.0));
        assert_eq!(aabb.min, Point3::new(0.0, 2.0, 0.0));
        assert_eq!(aabb.max, Point3::new(1.0, 5.0, 3.0));
    }
}

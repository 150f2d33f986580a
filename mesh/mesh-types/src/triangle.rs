//! Resolved triangles.

use nalgebra::{Point3, Vector3};

/// Three positions looked up from an [`IndexedMesh`](crate::IndexedMesh)
/// face, in face order.
///
/// ```
/// use mesh_types::{Point3, Triangle};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// );
/// assert!((tri.area() - 2.0).abs() < 1e-12);
/// assert!(tri.normal().is_some_and(|n| n.z > 0.99));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Corner `a`.
    pub v0: Point3<f64>,
    /// Corner `b`.
    pub v1: Point3<f64>,
    /// Corner `c`.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// A triangle with corners in winding order.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// `(b - a) x (c - a)`, whose length is twice the area.
    #[inline]
    #[must_use]
    pub fn scaled_normal(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit normal on the counter-clockwise side; `None` when the corners
    /// are collinear.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.scaled_normal().try_normalize(f64::EPSILON)
    }

    /// Area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * self.scaled_normal().norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collinear_corners_have_no_normal() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert!(tri.normal().is_none());
        assert!(tri.area() < 1e-12);
    }
}

//! Mesh vertices.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A surface point, with a shading normal once one has been computed.
///
/// ```
/// use mesh_types::{Point3, Vertex};
///
/// let v = Vertex::from_coords(1.0, 2.0, 3.0);
/// assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
/// assert!(v.normal.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in physical units.
    pub position: Point3<f64>,
    /// Unit normal, area-weighted over the adjacent faces.
    pub normal: Option<Vector3<f64>>,
}

impl Vertex {
    /// A vertex without a normal.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: None,
        }
    }

    /// Shorthand for [`Vertex::new`] from three coordinates.
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Distance to another vertex.
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_conversion() {
        let v: Vertex = [1.0, 2.0, 3.0].into();
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn distance_between_vertices() {
        let a = Vertex::from_coords(0.0, 0.0, 0.0);
        let b = Vertex::from_coords(3.0, 4.0, 0.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }
}

//! # Bounding Volumes
//!
//! Object-space axis-aligned boxes and their world-space corner sets.
//!
//! A [`LocalBounds`] is what the scene reports for a node in its own space;
//! [`OrientedBounds`] is the same box pushed through the node's world matrix,
//! kept as eight corners plus a center so it can be projected onto any
//! direction.

use glam::DMat4;
use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::vec3::Vec3;

// =============================================================================
// LOCAL BOUNDS
// =============================================================================

/// Axis-aligned bounding box in a node's object space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalBounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl LocalBounds {
    /// Creates bounds from two opposite corners in any order.
    ///
    /// # Examples
    /// ```
    /// use instancer_kernel::{LocalBounds, Vec3};
    /// let b = LocalBounds::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 2.0, 3.0));
    /// assert_eq!(b.min, Vec3::new(-1.0, 0.0, 0.0));
    /// assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Unit cube centered on the origin, the shape of a synthesized fill box.
    pub fn unit_cube() -> Self {
        Self::new(Vec3::splat(-0.5), Vec3::splat(0.5))
    }

    /// Size along one local axis.
    ///
    /// # Examples
    /// ```
    /// use instancer_kernel::{Axis, LocalBounds, Vec3};
    /// let b = LocalBounds::new(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0));
    /// assert_eq!(b.extent(Axis::Y), 4.0);
    /// ```
    #[inline]
    pub fn extent(&self, axis: Axis) -> f64 {
        (self.max[axis.index()] - self.min[axis.index()]).abs()
    }

    /// Center in object space.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The eight corners, enumerated with X outermost and Z innermost.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        let mut corners = [Vec3::ZERO; 8];
        let mut i = 0;
        for x in [lo.x, hi.x] {
            for y in [lo.y, hi.y] {
                for z in [lo.z, hi.z] {
                    corners[i] = Vec3::new(x, y, z);
                    i += 1;
                }
            }
        }
        corners
    }

    /// Transforms the box into world space with `world_matrix`.
    ///
    /// # Examples
    /// ```
    /// use glam::DMat4;
    /// use instancer_kernel::{LocalBounds, Vec3};
    /// let world = DMat4::from_translation(Vec3::new(4.0, 0.0, 0.0));
    /// let oriented = LocalBounds::unit_cube().to_world(&world);
    /// assert_eq!(oriented.center, Vec3::new(4.0, 0.0, 0.0));
    /// ```
    pub fn to_world(&self, world_matrix: &DMat4) -> OrientedBounds {
        let corners = self.corners().map(|c| world_matrix.transform_point3(c));
        OrientedBounds {
            corners,
            center: world_matrix.transform_point3(self.center()),
        }
    }
}

// =============================================================================
// ORIENTED BOUNDS
// =============================================================================

/// World-space corners and center of a node's bounding box.
///
/// Computed on demand per placement call and discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBounds {
    /// The eight world-space corners.
    pub corners: [Vec3; 8],
    /// World-space center.
    pub center: Vec3,
}

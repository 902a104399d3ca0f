//! # Orientation Helpers
//!
//! Oriented (right, up, forward) frames, aim rotations, axis rotations and
//! world-space axis measurement.
//!
//! ## Conventions
//!
//! - Rotations are `DMat3` whose columns are the world images of local
//!   X, Y and Z.
//! - An aimed node points its local +Z at the target and keeps its local +Y
//!   as close to world +Y as possible.

use config::constants::{PARALLEL_DOT_THRESHOLD, POSITION_EPSILON};
use glam::{DMat3, DMat4, DQuat, EulerRot};

use crate::axis::Axis;
use crate::vec3::{normalize_or_zero, Vec3};

// =============================================================================
// ORIENTED BASIS
// =============================================================================

/// Orthonormal frame built around a travel direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBasis {
    /// Local X.
    pub right: Vec3,
    /// Local Y.
    pub up: Vec3,
    /// Local Z, the travel direction.
    pub forward: Vec3,
}

impl OrientedBasis {
    /// Builds a frame whose forward axis is `direction`.
    ///
    /// The reference up vector is world +Y, replaced by world +X when the
    /// direction's absolute dot product with +Y exceeds `parallel_dot` so the
    /// cross product never degenerates. Returns `None` for a zero direction.
    ///
    /// # Examples
    /// ```
    /// use instancer_kernel::{OrientedBasis, Vec3};
    /// let basis = OrientedBasis::from_forward(Vec3::X, 0.999).unwrap();
    /// assert_eq!(basis.forward, Vec3::X);
    /// assert!((basis.up - Vec3::Y).length() < 1e-12);
    /// ```
    pub fn from_forward(direction: Vec3, parallel_dot: f64) -> Option<Self> {
        let forward = normalize_or_zero(direction);
        if forward == Vec3::ZERO {
            return None;
        }

        let up_ref = if forward.dot(Vec3::Y).abs() > parallel_dot {
            Vec3::X
        } else {
            Vec3::Y
        };
        let mut right = up_ref.cross(forward);
        if right.length() < POSITION_EPSILON {
            right = Vec3::X;
        }
        let right = normalize_or_zero(right);
        let up = normalize_or_zero(forward.cross(right));
        // Re-derive right so the frame is exactly orthogonal.
        let right = normalize_or_zero(up.cross(forward));

        Some(Self { right, up, forward })
    }

    /// Rotation matrix with columns `(right, up, forward)`.
    #[inline]
    pub fn to_mat3(&self) -> DMat3 {
        DMat3::from_cols(self.right, self.up, self.forward)
    }

    /// World position of a point given in this frame's coordinates relative
    /// to `origin`.
    ///
    /// # Examples
    /// ```
    /// use instancer_kernel::{OrientedBasis, Vec3};
    /// let basis = OrientedBasis::from_forward(Vec3::Z, 0.999).unwrap();
    /// let p = basis.point_at(Vec3::ONE, Vec3::new(0.0, 0.0, 2.0));
    /// assert!((p - Vec3::new(1.0, 1.0, 3.0)).length() < 1e-12);
    /// ```
    pub fn point_at(&self, origin: Vec3, local: Vec3) -> Vec3 {
        origin + self.right * local.x + self.up * local.y + self.forward * local.z
    }
}

/// Rotation that points local +Z along `direction` with world +Y as up.
///
/// Returns `None` when `direction` has zero length.
///
/// # Examples
/// ```
/// use glam::DMat3;
/// use instancer_kernel::{aim_rotation, Vec3};
/// let rot = aim_rotation(Vec3::new(0.0, 0.0, 3.0)).unwrap();
/// assert!(rot.abs_diff_eq(DMat3::IDENTITY, 1e-12));
/// ```
pub fn aim_rotation(direction: Vec3) -> Option<DMat3> {
    OrientedBasis::from_forward(direction, PARALLEL_DOT_THRESHOLD).map(|b| b.to_mat3())
}

/// Rotation of `degrees` about a principal axis.
///
/// # Examples
/// ```
/// use instancer_kernel::{rotation_about, Axis, Vec3};
/// let rot = rotation_about(Axis::Y, 90.0);
/// assert!((rot * Vec3::X - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
/// ```
pub fn rotation_about(axis: Axis, degrees: f64) -> DMat3 {
    DMat3::from_axis_angle(axis.unit(), degrees.to_radians())
}

/// Replaces one channel of `rotation`'s Euler angles with `degrees`,
/// keeping the other two.
///
/// Angles are read in XYZ rotate order (X applied first, so `R = Rz·Ry·Rx`),
/// the way a transform's rotate channels are edited one at a time.
/// `rotation` must be orthonormal.
///
/// # Examples
/// ```
/// use instancer_kernel::{rotation_about, with_euler_channel, Axis};
/// let yawed = rotation_about(Axis::Y, 30.0);
/// let set = with_euler_channel(yawed, Axis::Y, 90.0);
/// assert!(set.abs_diff_eq(rotation_about(Axis::Y, 90.0), 1e-12));
/// ```
pub fn with_euler_channel(rotation: DMat3, axis: Axis, degrees: f64) -> DMat3 {
    let (mut z, mut y, mut x) = DQuat::from_mat3(&rotation).to_euler(EulerRot::ZYX);
    let radians = degrees.to_radians();
    match axis {
        Axis::X => x = radians,
        Axis::Y => y = radians,
        Axis::Z => z = radians,
    }
    DMat3::from_euler(EulerRot::ZYX, z, y, x)
}

// =============================================================================
// WORLD AXIS
// =============================================================================

/// World-space direction and scale of a node's local axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldAxis {
    /// Unit direction of the local axis in world space.
    pub direction: Vec3,
    /// Length of the matrix column, i.e. the world scale along that axis.
    pub scale: f64,
}

/// Reads the column of `world_matrix` for `axis` and splits it into a unit
/// direction and a scale factor.
///
/// Returns `None` when the column is (near) zero, e.g. a zero scale.
///
/// # Examples
/// ```
/// use glam::DMat4;
/// use instancer_kernel::{world_axis_length, Axis, Vec3};
/// let m = DMat4::from_scale(Vec3::new(3.0, 1.0, 1.0));
/// let info = world_axis_length(&m, Axis::X).unwrap();
/// assert_eq!(info.scale, 3.0);
/// assert_eq!(info.direction, Vec3::X);
/// ```
pub fn world_axis_length(world_matrix: &DMat4, axis: Axis) -> Option<WorldAxis> {
    let column = world_matrix.col(axis.index()).truncate();
    let scale = column.length();
    if scale <= POSITION_EPSILON {
        return None;
    }
    Some(WorldAxis {
        direction: column / scale,
        scale,
    })
}

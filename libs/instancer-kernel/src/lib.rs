//! # Instancer Kernel
//!
//! Vector geometry shared by the linear, chain and radial placers.
//!
//! ## Architecture
//!
//! ```text
//! TransformSnapshot (instancer) → instancer-kernel (pure math) → target poses
//! ```
//!
//! Every function here is pure: no scene access, no logging, no failure modes
//! beyond returning `None` (or the zero vector) for degenerate input.
//!
//! ## Example
//!
//! ```rust
//! use instancer_kernel::{farthest_pair, Vec3};
//!
//! let points = [
//!     Vec3::new(0.0, 0.0, 0.0),
//!     Vec3::new(1.0, 0.0, 0.0),
//!     Vec3::new(5.0, 0.0, 0.0),
//! ];
//! assert_eq!(farthest_pair(&points), Some((0, 2)));
//! ```

pub mod axis;
pub mod basis;
pub mod bounds;
pub mod projection;
pub mod vec3;

pub use axis::{Axis, AxisParseError};
pub use basis::{
    aim_rotation, rotation_about, with_euler_channel, world_axis_length, OrientedBasis, WorldAxis,
};
pub use bounds::{LocalBounds, OrientedBounds};
pub use projection::{farthest_pair, project_range};
pub use vec3::{normalize_or_zero, Vec3};

pub use glam::{DMat3 as Mat3, DMat4 as Mat4};

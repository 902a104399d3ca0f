//! Thin wrapper around `glam::DVec3` shared across the placement crates.
//!
//! Arithmetic (add/sub/scale/dot/cross/length) comes straight from `glam`;
//! the helpers here pin down the degenerate-input behaviour the placers rely
//! on.

use config::constants::NORMALIZE_EPSILON;

pub use glam::DVec3 as Vec3;

/// Normalizes `v`, returning the zero vector when its length is below
/// [`NORMALIZE_EPSILON`].
///
/// Callers must check for the zero vector explicitly.
///
/// # Examples
/// ```
/// use instancer_kernel::vec3::{normalize_or_zero, Vec3};
/// assert_eq!(normalize_or_zero(Vec3::new(0.0, 3.0, 0.0)), Vec3::Y);
/// assert_eq!(normalize_or_zero(Vec3::ZERO), Vec3::ZERO);
/// ```
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let length = v.length();
    if length > NORMALIZE_EPSILON {
        v / length
    } else {
        Vec3::ZERO
    }
}

/// Linear interpolation between `start` and `end` at parametric position `t`.
///
/// # Examples
/// ```
/// use instancer_kernel::vec3::{lerp, Vec3};
/// let mid = lerp(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 0.25);
/// assert_eq!(mid, Vec3::new(2.5, 0.0, 0.0));
/// ```
pub fn lerp(start: Vec3, end: Vec3, t: f64) -> Vec3 {
    start + (end - start) * t
}

#[cfg(test)]
mod tests;

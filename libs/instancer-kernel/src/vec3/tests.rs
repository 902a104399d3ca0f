//! Tests for the Vec3 helpers.

use super::*;
use approx::assert_abs_diff_eq;

/// Ensures normalization yields a unit vector for regular input.
#[test]
fn normalize_returns_unit_length() {
    let v = normalize_or_zero(Vec3::new(3.0, 4.0, 0.0));
    assert_abs_diff_eq!(v.length(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(v.x, 0.6, epsilon = 1e-12);
}

/// Zero-length input must not produce NaN.
#[test]
fn normalize_degenerate_is_zero() {
    let v = normalize_or_zero(Vec3::splat(1e-14));
    assert_eq!(v, Vec3::ZERO);
    assert!(!v.is_nan());
}

#[test]
fn lerp_endpoints() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-1.0, 0.0, 7.0);
    assert_eq!(lerp(a, b, 0.0), a);
    assert_eq!(lerp(a, b, 1.0), b);
}

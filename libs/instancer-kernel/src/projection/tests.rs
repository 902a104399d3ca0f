use super::*;
use approx::assert_abs_diff_eq;

#[test]
fn project_range_relative_to_origin() {
    let points = [Vec3::new(5.0, 0.0, 0.0), Vec3::new(7.0, 1.0, 0.0)];
    let (lo, hi) = project_range(&points, Vec3::X, Vec3::new(4.0, 0.0, 0.0));
    assert_eq!((lo, hi), (1.0, 3.0));
}

#[test]
fn project_range_on_diagonal_axis() {
    let axis = Vec3::new(1.0, 1.0, 0.0).normalize();
    let points = [Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0)];
    let (lo, hi) = project_range(&points, axis, Vec3::ZERO);
    assert_abs_diff_eq!(lo, 0.0);
    assert_abs_diff_eq!(hi, 2.0_f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn project_range_empty_is_zero() {
    assert_eq!(project_range(&[], Vec3::Y, Vec3::ONE), (0.0, 0.0));
}

#[test]
fn farthest_pair_collinear_points() {
    // Positions 0, 1, 2, 5 along X, shuffled.
    let points = [
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(5.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
    ];
    assert_eq!(farthest_pair(&points), Some((1, 2)));
}

#[test]
fn farthest_pair_tie_keeps_first_found() {
    // Square corners: both diagonals have equal length.
    let points = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    assert_eq!(farthest_pair(&points), Some((0, 2)));
}

#[test]
fn farthest_pair_two_points() {
    assert_eq!(farthest_pair(&[Vec3::ZERO, Vec3::ZERO]), Some((0, 1)));
}

//! Scalar projections of point sets.
//!
//! Used to measure extents along arbitrary directions and to pick the two
//! endpoints a chain of waypoints is ordered between.

use crate::vec3::Vec3;

/// Returns the `(min, max)` scalar projection of `points` onto `axis`,
/// measured relative to `origin`.
///
/// `axis` is expected to be unit length. An empty point set yields `(0, 0)`.
///
/// # Examples
/// ```
/// use instancer_kernel::{project_range, Vec3};
/// let points = [Vec3::new(1.0, 9.0, 0.0), Vec3::new(3.0, -2.0, 0.0)];
/// assert_eq!(project_range(&points, Vec3::X, Vec3::ZERO), (1.0, 3.0));
/// ```
pub fn project_range(points: &[Vec3], axis: Vec3, origin: Vec3) -> (f64, f64) {
    let mut values = points.iter().map(|p| (*p - origin).dot(axis));
    let Some(first) = values.next() else {
        return (0.0, 0.0);
    };
    values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Exhaustive O(n²) search for the index pair with the largest Euclidean
/// distance.
///
/// Pairs are scanned row-major with `i < j`; ties keep the first pair found.
/// Returns `None` for fewer than two points.
///
/// # Examples
/// ```
/// use instancer_kernel::{farthest_pair, Vec3};
/// let points = [Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0)];
/// assert_eq!(farthest_pair(&points), Some((0, 3)));
/// assert_eq!(farthest_pair(&points[..1]), None);
/// ```
pub fn farthest_pair(points: &[Vec3]) -> Option<(usize, usize)> {
    if points.len() < 2 {
        return None;
    }
    let mut best = -1.0;
    let mut pair = (0, 1);
    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate().skip(i + 1) {
            let d = a.distance(*b);
            if d > best {
                best = d;
                pair = (i, j);
            }
        }
    }
    Some(pair)
}

#[cfg(test)]
mod tests;

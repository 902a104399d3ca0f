//! Oriented boxes that span the gap between two bounding volumes.
//!
//! The frame's forward axis runs from the left box center to the right box
//! center. Both boxes are projected onto that frame; the longitudinal gap
//! between the left box's far face and the right box's near face is split
//! into equal boxes whose cross-section is the larger of the two volumes.

use config::constants::{Tolerances, MIN_FILL_EXTENT};
use instancer_kernel::{project_range, OrientedBasis, OrientedBounds, Vec3};

/// One synthesized box: world frame, world center and size along the
/// frame's (right, up, forward) axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSegment {
    pub basis: OrientedBasis,
    pub center: Vec3,
    /// Always positive; `z` is the longitudinal length.
    pub extents: Vec3,
}

/// Why a pair of volumes produced no fill boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillSkip {
    /// The two centers coincide, so there is no travel direction.
    Coincident,
    /// The volumes touch or overlap along the travel direction.
    NoGap { gap: f64 },
}

/// Splits the gap between `left` and `right` into `divisions` boxes.
///
/// `divisions` of 0 is treated as 1.
pub fn fill_segments(
    left: &OrientedBounds,
    right: &OrientedBounds,
    divisions: u32,
    tolerances: &Tolerances,
) -> Result<Vec<FillSegment>, FillSkip> {
    let anchor = left.center;
    let travel = right.center - anchor;
    if tolerances.is_negligible(travel.length()) {
        return Err(FillSkip::Coincident);
    }
    let basis =
        OrientedBasis::from_forward(travel, tolerances.parallel_dot).ok_or(FillSkip::Coincident)?;

    let (_, left_far) = project_range(&left.corners, basis.forward, anchor);
    let (right_near, _) = project_range(&right.corners, basis.forward, anchor);
    let gap = right_near - left_far;
    if gap <= tolerances.position {
        return Err(FillSkip::NoGap { gap });
    }

    let (size_x, offset_x) = cross_section(left, right, basis.right, anchor);
    let (size_y, offset_y) = cross_section(left, right, basis.up, anchor);

    let divisions = divisions.max(1);
    let length = gap / f64::from(divisions);
    let segments = (0..divisions)
        .map(|d| {
            let mid = left_far + length * (f64::from(d) + 0.5);
            FillSegment {
                basis,
                center: basis.point_at(anchor, Vec3::new(offset_x, offset_y, mid)),
                extents: Vec3::new(size_x, size_y, length),
            }
        })
        .collect();
    Ok(segments)
}

/// Larger of the two sizes along `axis` (floored) and the mean of the two
/// range midpoints.
fn cross_section(left: &OrientedBounds, right: &OrientedBounds, axis: Vec3, anchor: Vec3) -> (f64, f64) {
    let (l_min, l_max) = project_range(&left.corners, axis, anchor);
    let (r_min, r_max) = project_range(&right.corners, axis, anchor);
    let size = (l_max - l_min)
        .abs()
        .max((r_max - r_min).abs())
        .max(MIN_FILL_EXTENT);
    let offset = 0.5 * ((l_min + l_max) * 0.5 + (r_min + r_max) * 0.5);
    (size, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::DMat4;
    use instancer_kernel::LocalBounds;

    fn cube_at(center: Vec3, size: Vec3) -> OrientedBounds {
        LocalBounds::new(-size * 0.5, size * 0.5).to_world(&DMat4::from_translation(center))
    }

    #[test]
    fn unit_cubes_four_apart_split_in_two() {
        let left = cube_at(Vec3::ZERO, Vec3::ONE);
        let right = cube_at(Vec3::new(4.0, 0.0, 0.0), Vec3::ONE);

        let segments = fill_segments(&left, &right, 2, &Tolerances::default()).unwrap();

        assert_eq!(segments.len(), 2);
        for (segment, x) in segments.iter().zip([1.25, 2.75]) {
            assert_abs_diff_eq!(segment.extents.z, 1.5, epsilon = 1e-12);
            assert_abs_diff_eq!((segment.center - Vec3::new(x, 0.0, 0.0)).length(), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(segment.extents.x, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(segment.extents.y, 1.0, epsilon = 1e-12);
        }
        // Contiguous: first box's far face meets second box's near face.
        let first_end = segments[0].center.x + segments[0].extents.z * 0.5;
        let second_start = segments[1].center.x - segments[1].extents.z * 0.5;
        assert_abs_diff_eq!(first_end, second_start, epsilon = 1e-12);
    }

    #[test]
    fn cross_section_takes_larger_volume_and_mean_center() {
        let left = cube_at(Vec3::ZERO, Vec3::new(1.0, 2.0, 1.0));
        let right = cube_at(Vec3::new(5.0, 1.0, 0.0), Vec3::new(1.0, 4.0, 3.0));

        let segments = fill_segments(&left, &right, 1, &Tolerances::default()).unwrap();

        let segment = segments[0];
        // Cross-section axes are not world aligned here; the sizes still
        // come from the larger box.
        assert!(segment.extents.x >= 3.0 - 1e-9);
        assert!(segment.extents.y >= 1.0);
        assert!(segment.extents.z > 0.0);
    }

    #[test]
    fn vertical_travel_uses_fallback_up() {
        let left = cube_at(Vec3::ZERO, Vec3::ONE);
        let right = cube_at(Vec3::new(0.0, 3.0, 0.0), Vec3::ONE);

        let segments = fill_segments(&left, &right, 1, &Tolerances::default()).unwrap();

        let segment = segments[0];
        assert_abs_diff_eq!((segment.basis.forward - Vec3::Y).length(), 0.0, epsilon = 1e-12);
        assert!(!segment.basis.right.is_nan());
        assert_abs_diff_eq!(segment.extents.z, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!((segment.center - Vec3::new(0.0, 1.5, 0.0)).length(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn touching_boxes_are_skipped() {
        let left = cube_at(Vec3::ZERO, Vec3::ONE);
        let right = cube_at(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE);

        let skip = fill_segments(&left, &right, 3, &Tolerances::default()).unwrap_err();

        assert!(matches!(skip, FillSkip::NoGap { gap } if gap.abs() < 1e-9));
    }

    #[test]
    fn coincident_centers_are_skipped() {
        let left = cube_at(Vec3::ZERO, Vec3::ONE);
        let right = cube_at(Vec3::ZERO, Vec3::splat(2.0));

        assert_eq!(
            fill_segments(&left, &right, 1, &Tolerances::default()),
            Err(FillSkip::Coincident)
        );
    }

    #[test]
    fn zero_divisions_act_as_one() {
        let left = cube_at(Vec3::ZERO, Vec3::ONE);
        let right = cube_at(Vec3::new(3.0, 0.0, 0.0), Vec3::ONE);

        let segments = fill_segments(&left, &right, 0, &Tolerances::default()).unwrap();

        assert_eq!(segments.len(), 1);
        assert_abs_diff_eq!(segments[0].extents.z, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn thin_volumes_get_minimum_cross_section() {
        let left = cube_at(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let right = cube_at(Vec3::new(3.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        let segments = fill_segments(&left, &right, 1, &Tolerances::default()).unwrap();

        assert_eq!(segments[0].extents.x, MIN_FILL_EXTENT);
        assert_eq!(segments[0].extents.y, MIN_FILL_EXTENT);
    }
}

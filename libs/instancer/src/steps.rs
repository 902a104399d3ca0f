//! Parametric step generation shared by the linear and chain placers.
//!
//! Both functions return positions in `[0, 1]` along a two-endpoint segment,
//! ascending. Requests for more than [`MAX_PLACEMENT_STEPS`] positions are
//! rejected before anything is allocated.

use config::constants::MAX_PLACEMENT_STEPS;

use crate::error::{PlacementError, PlacementResult};

/// Rejects a step count above [`MAX_PLACEMENT_STEPS`].
pub fn ensure_step_limit(steps: f64) -> PlacementResult<()> {
    if steps > f64::from(MAX_PLACEMENT_STEPS) {
        return Err(PlacementError::invalid_parameter(format!(
            "{steps:.0} instances requested, the limit is {MAX_PLACEMENT_STEPS}"
        )));
    }
    Ok(())
}

/// `n` interior positions at `i/(n+1)`, plus `1.0` when `include_end`.
///
/// # Examples
/// ```
/// use instancer::steps::count_steps;
/// assert_eq!(count_steps(3, false).unwrap(), vec![0.25, 0.5, 0.75]);
/// assert_eq!(count_steps(1, true).unwrap(), vec![0.5, 1.0]);
/// ```
pub fn count_steps(n: u32, include_end: bool) -> PlacementResult<Vec<f64>> {
    ensure_step_limit(f64::from(n))?;
    let divisor = f64::from(n) + 1.0;
    let mut steps: Vec<f64> = (1..=n).map(|i| f64::from(i) / divisor).collect();
    if include_end {
        steps.push(1.0);
    }
    Ok(steps)
}

/// Positions every `spacing` world units along a segment of `length`,
/// stopping strictly before the far end (within `tolerance`), plus `1.0`
/// when `include_end`.
///
/// A segment no longer than `tolerance`, or a spacing that is not a positive
/// finite number, produces no interior positions.
///
/// # Examples
/// ```
/// use instancer::steps::spacing_steps;
/// assert_eq!(spacing_steps(10.0, 2.5, false, 1e-6).unwrap(), vec![0.25, 0.5, 0.75]);
/// assert!(spacing_steps(0.0, 1.0, false, 1e-6).unwrap().is_empty());
/// assert!(spacing_steps(10.0, 1e-9, false, 1e-6).is_err());
/// ```
pub fn spacing_steps(
    length: f64,
    spacing: f64,
    include_end: bool,
    tolerance: f64,
) -> PlacementResult<Vec<f64>> {
    let mut steps = Vec::new();
    if length > tolerance && spacing.is_finite() && spacing > 0.0 {
        ensure_step_limit(length / spacing)?;
        // Multiply instead of accumulating so long runs do not drift.
        let mut k = 1.0;
        loop {
            let distance = k * spacing;
            if distance >= length - tolerance {
                break;
            }
            steps.push(distance / length);
            k += 1.0;
        }
    }
    if include_end {
        steps.push(1.0);
    }
    Ok(steps)
}

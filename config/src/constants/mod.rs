//! Centralized configuration values shared across the placement crates.
//!
//! Each public item documents its purpose and gives a minimal usage example so
//! downstream crates stay declarative and never scatter literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Tolerance for distances, extents and gaps measured in world units.
///
/// Two anchors closer than this are coincident, a bounding-box extent at or
/// below it is empty, and a fill gap at or below it is skipped.
///
/// # Examples
/// ```
/// use config::constants::POSITION_EPSILON;
/// assert_eq!(POSITION_EPSILON, 1.0e-6);
/// ```
pub const POSITION_EPSILON: f64 = 1.0e-6;

/// Length below which a vector is considered zero and normalizes to the zero
/// vector.
///
/// # Examples
/// ```
/// use config::constants::{NORMALIZE_EPSILON, POSITION_EPSILON};
/// assert!(NORMALIZE_EPSILON < POSITION_EPSILON);
/// ```
pub const NORMALIZE_EPSILON: f64 = 1.0e-12;

/// Absolute dot product above which a travel direction counts as parallel to
/// the reference up vector, forcing the secondary reference axis.
///
/// # Examples
/// ```
/// use config::constants::PARALLEL_DOT_THRESHOLD;
/// assert!(PARALLEL_DOT_THRESHOLD < 1.0);
/// ```
pub const PARALLEL_DOT_THRESHOLD: f64 = 0.999;

/// Smallest cross-sectional size given to a synthesized fill box.
///
/// # Examples
/// ```
/// use config::constants::MIN_FILL_EXTENT;
/// let measured: f64 = 0.0;
/// assert_eq!(measured.max(MIN_FILL_EXTENT), 1.0e-3);
/// ```
pub const MIN_FILL_EXTENT: f64 = 1.0e-3;

// =============================================================================
// NAMING DEFAULTS
// =============================================================================

/// Container name used when grouping is requested with an empty name.
///
/// The trailing `#` asks the host to substitute a unique number.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_GROUP_NAME;
/// assert!(DEFAULT_GROUP_NAME.ends_with('#'));
/// ```
pub const DEFAULT_GROUP_NAME: &str = "instanceGroup#";

/// Prefix for the pivot nodes created by radial placement.
///
/// # Examples
/// ```
/// use config::constants::RADIAL_PIVOT_PREFIX;
/// assert_eq!(format!("{RADIAL_PIVOT_PREFIX}_{:02}", 3), "circle_null_03");
/// ```
pub const RADIAL_PIVOT_PREFIX: &str = "circle_null";

// =============================================================================
// TOOL DEFAULTS
// =============================================================================

/// Default number of instances placed between two anchors.
pub const DEFAULT_ARRAY_COUNT: u32 = 5;

/// Default spacing used by distance-driven modes.
pub const DEFAULT_SPACING: f64 = 1.0;

/// Default number of instances per chain segment (1 places the midpoint).
pub const DEFAULT_CHAIN_PER_SEGMENT: u32 = 1;

/// Default number of fill boxes per chain segment.
pub const DEFAULT_FILL_DIVISIONS: u32 = 1;

/// Default number of instances around a radial pivot.
pub const DEFAULT_RADIAL_COUNT: u32 = 8;

/// Upper bound on the instances one placement call may compute.
///
/// A spacing that is tiny compared to the distance it spans would otherwise
/// allocate without limit; such requests are rejected as invalid.
pub const MAX_PLACEMENT_STEPS: u32 = 100_000;

// =============================================================================
// TOLERANCES
// =============================================================================

/// Validated snapshot of the tolerances the placers run with.
///
/// # Examples
/// ```
/// use config::constants::Tolerances;
/// let tolerances = Tolerances::default();
/// assert!(tolerances.position > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Distance/extent/gap tolerance in world units.
    pub position: f64,
    /// Up-vector fallback threshold on the absolute dot product.
    pub parallel_dot: f64,
}

impl Tolerances {
    /// Builds tolerances, rejecting values that would make every comparison
    /// degenerate.
    ///
    /// # Examples
    /// ```
    /// use config::constants::Tolerances;
    /// let cfg = Tolerances::new(1.0e-4, 0.99).expect("valid tolerances");
    /// assert_eq!(cfg.position, 1.0e-4);
    /// assert!(Tolerances::new(0.0, 0.99).is_err());
    /// ```
    pub fn new(position: f64, parallel_dot: f64) -> Result<Self, ConfigError> {
        if position.is_nan() || position <= 0.0 {
            return Err(ConfigError::InvalidPositionTolerance(position));
        }
        if parallel_dot.is_nan() || parallel_dot <= 0.0 || parallel_dot > 1.0 {
            return Err(ConfigError::InvalidParallelThreshold(parallel_dot));
        }
        Ok(Self {
            position,
            parallel_dot,
        })
    }

    /// Returns true when `value` is within the position tolerance of zero.
    #[inline]
    pub fn is_negligible(&self, value: f64) -> bool {
        value.abs() <= self.position
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            position: POSITION_EPSILON,
            parallel_dot: PARALLEL_DOT_THRESHOLD,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the position tolerance is zero, negative or NaN.
    InvalidPositionTolerance(f64),
    /// Raised when the parallel threshold lies outside (0, 1].
    InvalidParallelThreshold(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPositionTolerance(value) => {
                write!(f, "position tolerance must be positive: {value}")
            }
            ConfigError::InvalidParallelThreshold(value) => {
                write!(f, "parallel threshold must lie in (0, 1]: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

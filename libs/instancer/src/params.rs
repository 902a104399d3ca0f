//! # Placement Parameters
//!
//! Closed option sets shared by the placers. String labels coming from a
//! host UI are parsed once here; the placers only see the enums.

use std::fmt;
use std::str::FromStr;

use instancer_kernel::Axis;
use serde::{Deserialize, Serialize};

use crate::error::PlacementError;
use crate::scene::NodeId;

// =============================================================================
// PLACEMENT SPEC
// =============================================================================

/// How many instances to place along a one-dimensional path, and where.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum PlacementSpec {
    /// `n` interior points at `i/(n+1)`.
    FixedCount(u32),
    /// Points every `distance` world units from the start.
    FixedSpacing(f64),
    /// Interpolation whose spacing is the child's world extent along a
    /// local axis.
    BoundingBoxSpacing(Axis),
    /// `n` steps extrapolated outward from the child, each one child extent
    /// long along a local axis.
    BoundingBoxCount(Axis, u32),
}

impl Default for PlacementSpec {
    fn default() -> Self {
        Self::FixedCount(config::constants::DEFAULT_ARRAY_COUNT)
    }
}

// =============================================================================
// ORIENTATION
// =============================================================================

/// What rotation each placed instance receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// Keep the template's own rotation.
    #[default]
    None,
    /// Point local +Z toward the next step along the travel direction.
    AimAtTarget,
    /// Copy the rotation source's world rotation.
    CopySourceRotation,
}

impl OrientationMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::AimAtTarget => "aim",
            Self::CopySourceRotation => "copy",
        }
    }
}

impl fmt::Display for OrientationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrientationMode {
    type Err = PlacementError;

    /// Parses `none`, `aim` or `copy` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "aim" => Ok(Self::AimAtTarget),
            "copy" => Ok(Self::CopySourceRotation),
            other => Err(PlacementError::invalid_parameter(format!(
                "unknown orientation mode '{other}'"
            ))),
        }
    }
}

// =============================================================================
// CHAIN PARENT
// =============================================================================

/// Where chain instances (or their container) are attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainParent {
    /// Leave at world level.
    #[default]
    None,
    /// Parent under the scene parent of each segment's left waypoint.
    SameAsLeft,
    /// Parent under an explicit node.
    Node(NodeId),
}

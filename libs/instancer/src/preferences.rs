//! # Tool Preferences
//!
//! Persistable option sets for the three tools, with the same initial values
//! a fresh tool window shows. Hosts store them as JSON and turn them into
//! placement requests once the target nodes are known.
//!
//! Missing JSON fields take their defaults and unknown fields are ignored, so
//! preference files written by older or newer versions still load.
//!
//! ## Example
//!
//! ```rust
//! use instancer::preferences::Preferences;
//!
//! let prefs = Preferences::from_json(r#"{"radial": {"count": 12}}"#).unwrap();
//! assert_eq!(prefs.radial.count, 12);
//! assert_eq!(prefs.array.count, 5);
//! ```

use config::constants::{
    DEFAULT_ARRAY_COUNT, DEFAULT_CHAIN_PER_SEGMENT, DEFAULT_FILL_DIVISIONS, DEFAULT_GROUP_NAME,
    DEFAULT_RADIAL_COUNT, DEFAULT_SPACING,
};
use instancer_kernel::Axis;
use serde::{Deserialize, Serialize};

use crate::chain::{ChainRequest, FillOptions};
use crate::linear::LinearArrayRequest;
use crate::params::{ChainParent, OrientationMode, PlacementSpec};
use crate::radial::RadialRequest;
use crate::scene::NodeId;

// =============================================================================
// SHARED
// =============================================================================

/// Optional container settings shared by every tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupPreferences {
    pub enabled: bool,
    pub name: String,
}

impl Default for GroupPreferences {
    fn default() -> Self {
        Self {
            enabled: false,
            name: DEFAULT_GROUP_NAME.to_string(),
        }
    }
}

impl GroupPreferences {
    fn group_name(&self) -> Option<String> {
        self.enabled.then(|| self.name.clone())
    }
}

/// How a linear or chain tool decides where instances go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecMode {
    #[default]
    Count,
    Spacing,
}

// =============================================================================
// ARRAY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayPreferences {
    pub mode: SpecMode,
    pub count: u32,
    pub spacing: f64,
    /// Derive spacing from the child's bounding box instead of `spacing`.
    pub use_bounding_box: bool,
    pub bounding_box_axis: Axis,
    /// Extrapolate `count` steps from the child instead of interpolating.
    pub bounding_box_count: bool,
    pub include_end: bool,
    pub orientation: OrientationMode,
    pub parent_to_anchor: bool,
    pub alternate_scale: bool,
    pub alternate_axis: Axis,
    pub group: GroupPreferences,
}

impl Default for ArrayPreferences {
    fn default() -> Self {
        Self {
            mode: SpecMode::Count,
            count: DEFAULT_ARRAY_COUNT,
            spacing: DEFAULT_SPACING,
            use_bounding_box: false,
            bounding_box_axis: Axis::X,
            bounding_box_count: false,
            include_end: false,
            orientation: OrientationMode::None,
            parent_to_anchor: true,
            alternate_scale: false,
            alternate_axis: Axis::X,
            group: GroupPreferences::default(),
        }
    }
}

impl ArrayPreferences {
    pub fn spec(&self) -> PlacementSpec {
        match (self.use_bounding_box, self.bounding_box_count, self.mode) {
            (true, true, _) => PlacementSpec::BoundingBoxCount(self.bounding_box_axis, self.count),
            (true, false, _) => PlacementSpec::BoundingBoxSpacing(self.bounding_box_axis),
            (false, _, SpecMode::Count) => PlacementSpec::FixedCount(self.count),
            (false, _, SpecMode::Spacing) => PlacementSpec::FixedSpacing(self.spacing),
        }
    }

    pub fn to_request(&self, parent: Option<NodeId>, child: NodeId) -> LinearArrayRequest {
        LinearArrayRequest {
            include_end: self.include_end,
            orientation: self.orientation,
            parent_to_anchor: self.parent_to_anchor,
            group_name: self.group.group_name(),
            alternate_scale: self.alternate_scale.then_some(self.alternate_axis),
            ..LinearArrayRequest::new(parent, child, self.spec())
        }
    }
}

// =============================================================================
// CHAIN
// =============================================================================

/// Parent mode as stored; the explicit node is kept as a name so the field
/// survives while the mode is switched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentMode {
    #[default]
    None,
    SameAsLeft,
    Node,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainPreferences {
    pub mode: SpecMode,
    pub per_segment: u32,
    pub spacing: f64,
    pub parent_mode: ParentMode,
    pub parent_node: String,
    pub orientation: OrientationMode,
    pub fill: bool,
    pub fill_divisions: u32,
    pub fill_alternate_scale: bool,
    pub fill_alternate_axis: Axis,
    pub group: GroupPreferences,
}

impl Default for ChainPreferences {
    fn default() -> Self {
        Self {
            mode: SpecMode::Count,
            per_segment: DEFAULT_CHAIN_PER_SEGMENT,
            spacing: DEFAULT_SPACING,
            parent_mode: ParentMode::None,
            parent_node: String::new(),
            orientation: OrientationMode::None,
            fill: false,
            fill_divisions: DEFAULT_FILL_DIVISIONS,
            fill_alternate_scale: false,
            fill_alternate_axis: Axis::X,
            group: GroupPreferences::default(),
        }
    }
}

impl ChainPreferences {
    pub fn parent(&self) -> ChainParent {
        match self.parent_mode {
            ParentMode::None => ChainParent::None,
            ParentMode::SameAsLeft => ChainParent::SameAsLeft,
            ParentMode::Node if self.parent_node.trim().is_empty() => ChainParent::None,
            ParentMode::Node => ChainParent::Node(NodeId::new(self.parent_node.trim())),
        }
    }

    pub fn to_request(&self, template: Option<NodeId>, waypoints: Vec<NodeId>) -> ChainRequest {
        let spec = match self.mode {
            SpecMode::Count => PlacementSpec::FixedCount(self.per_segment),
            SpecMode::Spacing => PlacementSpec::FixedSpacing(self.spacing),
        };
        let fill = self.fill.then(|| FillOptions {
            divisions: self.fill_divisions,
            alternate_axis: self.fill_alternate_scale.then_some(self.fill_alternate_axis),
        });
        ChainRequest {
            template,
            waypoints,
            spec,
            orientation: self.orientation,
            parent: self.parent(),
            group_name: self.group.group_name(),
            fill,
            tolerances: Default::default(),
        }
    }
}

// =============================================================================
// RADIAL
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialPreferences {
    pub count: u32,
    pub axis: Axis,
    pub radius: f64,
    pub group: GroupPreferences,
}

impl Default for RadialPreferences {
    fn default() -> Self {
        Self {
            count: DEFAULT_RADIAL_COUNT,
            axis: Axis::Y,
            radius: 0.0,
            group: GroupPreferences::default(),
        }
    }
}

impl RadialPreferences {
    pub fn to_request(&self, base: NodeId, target: NodeId) -> RadialRequest {
        RadialRequest {
            axis: self.axis,
            radius: self.radius,
            group_name: self.group.group_name(),
            ..RadialRequest::new(base, target, self.count)
        }
    }
}

// =============================================================================
// ALL TOOLS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub array: ArrayPreferences,
    pub chain: ChainPreferences,
    pub radial: RadialPreferences,
}

impl Preferences {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

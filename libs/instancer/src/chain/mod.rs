//! # Chain Placement
//!
//! Orders an unordered set of waypoints into a path and places instances on
//! every segment between consecutive waypoints, or fills the gap between
//! their bounding boxes with synthesized boxes.
//!
//! ## Segment modes
//!
//! - `FixedCount(n)`: `n` instances at `i/(n+1)` on each segment.
//! - `FixedSpacing(d)`: instances every `d` units, strictly before the
//!   right waypoint.
//! - Fill: `divisions` boxes exactly spanning each bounding-box gap. The
//!   first box is a new unit box; every later box instances it.
//!
//! ## Example
//!
//! ```rust
//! use instancer::{place_chain, ChainRequest, MemoryScene, NodeId};
//! use instancer_kernel::Vec3;
//!
//! let mut scene = MemoryScene::new();
//! let template = scene.add_node("bolt", Vec3::ZERO);
//! let waypoints: Vec<NodeId> = [4.0, 0.0, 2.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, x)| scene.add_node(&format!("wp{i}"), Vec3::new(*x, 1.0, 0.0)))
//!     .collect();
//!
//! let outcome = place_chain(&mut scene, &ChainRequest::new(template, waypoints)).unwrap();
//! assert_eq!(outcome.len(), 2);
//! ```

mod fill;
mod order;

pub use fill::{fill_segments, FillSegment, FillSkip};
pub use order::{order_waypoints, Waypoint, WaypointOrder};

use std::collections::HashMap;

use config::constants::{Tolerances, DEFAULT_CHAIN_PER_SEGMENT, DEFAULT_FILL_DIVISIONS};
use instancer_kernel::vec3::lerp;
use instancer_kernel::{aim_rotation, Axis};
use serde::{Deserialize, Serialize};

use crate::apply::{fail, Applier, Grouping, Pose};
use crate::diagnostic::{Diagnostic, PlacementOutcome};
use crate::error::{PlacementError, PlacementResult};
use crate::params::{ChainParent, OrientationMode, PlacementSpec};
use crate::scene::{NodeId, SceneGraph};
use crate::snapshot::TransformSnapshot;
use crate::steps::{count_steps, ensure_step_limit, spacing_steps};

// =============================================================================
// REQUEST
// =============================================================================

/// Fill-box options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOptions {
    /// Boxes per gap; 0 is treated as 1.
    pub divisions: u32,
    /// Negate this box scale axis on every odd box across the whole chain.
    pub alternate_axis: Option<Axis>,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            divisions: DEFAULT_FILL_DIVISIONS,
            alternate_axis: None,
        }
    }
}

/// Fully resolved inputs of one chain placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainRequest {
    /// Instanced on each segment; ignored in fill mode.
    pub template: Option<NodeId>,
    /// Unordered waypoints; missing nodes are dropped.
    pub waypoints: Vec<NodeId>,
    /// `FixedCount` or `FixedSpacing`.
    pub spec: PlacementSpec,
    pub orientation: OrientationMode,
    pub parent: ChainParent,
    pub group_name: Option<String>,
    /// Enables fill-box mode.
    pub fill: Option<FillOptions>,
    pub tolerances: Tolerances,
}

impl ChainRequest {
    /// Places `template` at the midpoint of every segment.
    pub fn new(template: NodeId, waypoints: Vec<NodeId>) -> Self {
        Self {
            template: Some(template),
            waypoints,
            spec: PlacementSpec::FixedCount(DEFAULT_CHAIN_PER_SEGMENT),
            orientation: OrientationMode::None,
            parent: ChainParent::None,
            group_name: None,
            fill: None,
            tolerances: Tolerances::default(),
        }
    }

    /// Fills the gaps between `waypoints` with boxes.
    pub fn fill(waypoints: Vec<NodeId>, options: FillOptions) -> Self {
        Self {
            template: None,
            fill: Some(options),
            ..Self::new(NodeId::new(""), waypoints)
        }
    }
}

// =============================================================================
// PLAN
// =============================================================================

/// What a planned item is an instance of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainSource {
    /// The request's template.
    Template,
    /// A fill box; the first one is created, later ones instance it.
    FillBox,
}

/// One planned instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainItem {
    pub source: ChainSource,
    pub pose: Pose,
    /// Segment index in travel order.
    pub segment: usize,
    /// Parent when not grouped.
    pub parent: Option<NodeId>,
}

/// Ordered waypoints plus every instance to place, in placement order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainPlan {
    pub order: WaypointOrder,
    pub items: Vec<ChainItem>,
    /// Where the container goes when grouping.
    pub group_parent: Option<NodeId>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Computes a chain placement from captured snapshots.
///
/// `template` is required unless the request is in fill mode.
pub fn plan_chain(
    request: &ChainRequest,
    template: Option<&TransformSnapshot>,
    waypoints: &[TransformSnapshot],
) -> PlacementResult<ChainPlan> {
    let by_node: HashMap<&NodeId, &TransformSnapshot> =
        waypoints.iter().map(|s| (&s.node, s)).collect();
    let order = order_waypoints(
        waypoints
            .iter()
            .map(|s| Waypoint::new(s.node.clone(), s.position))
            .collect(),
    )?;
    let ordered: Vec<&TransformSnapshot> = order
        .waypoints
        .iter()
        .filter_map(|w| by_node.get(&w.node).copied())
        .collect();

    let group_parent = match &request.parent {
        ChainParent::None => None,
        ChainParent::SameAsLeft => ordered.first().and_then(|s| s.parent.clone()),
        ChainParent::Node(node) => Some(node.clone()),
    };

    let mut plan = ChainPlan {
        order,
        items: Vec::new(),
        group_parent,
        diagnostics: Vec::new(),
    };

    match request.fill {
        Some(options) => {
            ensure_step_limit(f64::from(options.divisions))?;
            plan_fill(request, &options, &ordered, &mut plan);
        }
        None => {
            let template = template.ok_or_else(|| {
                PlacementError::missing("a template is required outside fill mode")
            })?;
            plan_segments(request, template, &ordered, &mut plan)?;
        }
    }

    if plan.items.is_empty() {
        let message = if request.fill.is_some() {
            "no segment had room for fill boxes"
        } else {
            "no instances fit on any segment"
        };
        plan.diagnostics.push(Diagnostic::warning(message));
    }
    Ok(plan)
}

fn direct_parent(request: &ChainRequest, left: &TransformSnapshot) -> Option<NodeId> {
    match &request.parent {
        ChainParent::None => None,
        ChainParent::SameAsLeft => left.parent.clone(),
        ChainParent::Node(node) => Some(node.clone()),
    }
}

#[derive(Clone, Copy)]
enum Stepping {
    Count(u32),
    Spacing(f64),
}

fn plan_segments(
    request: &ChainRequest,
    template: &TransformSnapshot,
    ordered: &[&TransformSnapshot],
    plan: &mut ChainPlan,
) -> PlacementResult<()> {
    let tolerance = request.tolerances.position;
    let stepping = match request.spec {
        PlacementSpec::FixedCount(n) => Stepping::Count(n),
        PlacementSpec::FixedSpacing(d) if !d.is_finite() => {
            return Err(PlacementError::invalid_parameter(format!(
                "spacing must be a finite number, got {d}"
            )));
        }
        PlacementSpec::FixedSpacing(d) if d <= 0.0 => {
            plan.diagnostics
                .push(Diagnostic::warning("spacing must be positive; nothing placed"));
            return Ok(());
        }
        PlacementSpec::FixedSpacing(d) => Stepping::Spacing(d),
        other => {
            return Err(PlacementError::invalid_parameter(format!(
                "chains place by count or spacing, not {other:?}"
            )));
        }
    };

    for (segment, pair) in ordered.windows(2).enumerate() {
        let (left, right) = (pair[0], pair[1]);
        let steps = match stepping {
            Stepping::Count(n) => count_steps(n, false)?,
            Stepping::Spacing(d) => {
                spacing_steps(left.position.distance(right.position), d, false, tolerance)?
            }
        };
        let parent = direct_parent(request, left);

        for t in steps {
            let position = lerp(left.position, right.position, t);
            let mut pose = Pose::at(position);
            match request.orientation {
                OrientationMode::None => {}
                OrientationMode::CopySourceRotation => {
                    pose = pose.with_rotation(template.rotation);
                }
                OrientationMode::AimAtTarget => {
                    if let Some(rotation) = aim_rotation(right.position - position) {
                        pose = pose.with_rotation(rotation);
                    }
                }
            }
            plan.items.push(ChainItem {
                source: ChainSource::Template,
                pose,
                segment,
                parent: parent.clone(),
            });
        }
    }
    Ok(())
}

fn plan_fill(
    request: &ChainRequest,
    options: &FillOptions,
    ordered: &[&TransformSnapshot],
    plan: &mut ChainPlan,
) {
    let mut global_index = 0usize;
    for (segment, pair) in ordered.windows(2).enumerate() {
        let (left, right) = (pair[0], pair[1]);
        let (Some(left_bounds), Some(right_bounds)) = (left.oriented_bounds(), right.oriented_bounds())
        else {
            plan.diagnostics.push(Diagnostic::warning(format!(
                "segment {} -> {} skipped: bounding box could not be measured",
                left.node, right.node
            )));
            continue;
        };

        let boxes = match fill_segments(&left_bounds, &right_bounds, options.divisions, &request.tolerances) {
            Ok(boxes) => boxes,
            Err(skip) => {
                tracing::debug!(left = %left.node, right = %right.node, ?skip, "fill segment skipped");
                let reason = match skip {
                    FillSkip::Coincident => "centers coincide".to_string(),
                    FillSkip::NoGap { gap } => format!("no gap between boxes ({gap:.6})"),
                };
                plan.diagnostics.push(Diagnostic::warning(format!(
                    "segment {} -> {} skipped: {reason}",
                    left.node, right.node
                )));
                continue;
            }
        };

        let parent = direct_parent(request, left);
        for fill in boxes {
            let mut scale = fill.extents;
            if let Some(axis) = options.alternate_axis {
                if global_index % 2 == 1 {
                    scale = axis.negate_component(scale);
                }
            }
            plan.items.push(ChainItem {
                source: ChainSource::FillBox,
                pose: Pose::at(fill.center)
                    .with_rotation(fill.basis.to_mat3())
                    .with_scale(scale),
                segment,
                parent: parent.clone(),
            });
            global_index += 1;
        }
    }
}

// =============================================================================
// APPLY
// =============================================================================

/// Orders the waypoints and places the chain into `scene`.
pub fn place_chain<S: SceneGraph + ?Sized>(
    scene: &mut S,
    request: &ChainRequest,
) -> PlacementResult<PlacementOutcome> {
    tracing::debug!(
        waypoints = request.waypoints.len(),
        fill = request.fill.is_some(),
        "chain placement"
    );
    match run(scene, request) {
        Ok(outcome) => Ok(outcome),
        Err(err) => Err(fail(scene, err)),
    }
}

fn run<S: SceneGraph + ?Sized>(
    scene: &mut S,
    request: &ChainRequest,
) -> PlacementResult<PlacementOutcome> {
    let template = if request.fill.is_some() {
        None
    } else {
        let node = request
            .template
            .as_ref()
            .ok_or_else(|| PlacementError::missing("a template is required outside fill mode"))?;
        Some(TransformSnapshot::capture(scene, node).ok_or_else(|| {
            PlacementError::missing(format!("template {node} does not exist"))
        })?)
    };

    let waypoints: Vec<TransformSnapshot> = request
        .waypoints
        .iter()
        .filter_map(|node| {
            let snapshot = TransformSnapshot::capture(scene, node);
            if snapshot.is_none() {
                tracing::debug!(node = %node, "dropping missing waypoint");
            }
            snapshot
        })
        .collect();

    let plan = plan_chain(request, template.as_ref(), &waypoints)?;

    let grouping = Grouping::from_request(request.group_name.as_deref(), plan.group_parent.clone());
    let mut applier = Applier::new(scene, grouping);
    let mut box_template: Option<NodeId> = None;
    for item in &plan.items {
        match item.source {
            ChainSource::Template => {
                let template = template.as_ref().ok_or_else(|| {
                    PlacementError::missing("a template is required outside fill mode")
                })?;
                applier.place(&template.node, &item.pose, item.parent.as_ref())?;
            }
            ChainSource::FillBox => match box_template.clone() {
                Some(source) => {
                    applier.place(&source, &item.pose, item.parent.as_ref())?;
                }
                None => {
                    let node = applier.place_with(
                        |scope| scope.create_unit_box(),
                        &item.pose,
                        item.parent.as_ref(),
                    )?;
                    box_template = Some(node);
                }
            },
        }
    }
    let outcome = applier.finish(plan.diagnostics);
    tracing::debug!(placed = outcome.len(), "chain placement finished");
    Ok(outcome)
}

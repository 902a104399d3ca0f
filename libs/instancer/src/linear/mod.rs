//! # Linear Array Placement
//!
//! Places copies of a child template between a parent anchor and the child,
//! or extrapolates outward from the child one bounding-box extent at a time.
//!
//! ## Modes
//!
//! | Spec | Anchors | Steps |
//! |------|---------|-------|
//! | `FixedCount(n)` | parent + child | `i/(n+1)` |
//! | `FixedSpacing(d)` | parent + child | every `d` units, strictly before the child |
//! | `BoundingBoxSpacing(axis)` | parent + child | every child extent along `axis` |
//! | `BoundingBoxCount(axis, n)` | child (parent optional) | `child + dir * extent * k`, `k = 1..=n` |
//!
//! `include_end` adds the final position (the child itself, or step `n+1`).
//!
//! ## Example
//!
//! ```rust
//! use instancer::{place_linear, LinearArrayRequest, MemoryScene, PlacementSpec, SceneGraph};
//! use instancer_kernel::Vec3;
//!
//! let mut scene = MemoryScene::new();
//! let start = scene.add_node("start", Vec3::ZERO);
//! let end = scene.add_node("end", Vec3::new(4.0, 0.0, 0.0));
//!
//! let request = LinearArrayRequest::new(Some(start), end, PlacementSpec::FixedCount(3));
//! let outcome = place_linear(&mut scene, &request).unwrap();
//! assert_eq!(outcome.len(), 3);
//! let xs: Vec<f64> = outcome
//!     .nodes
//!     .iter()
//!     .map(|n| scene.world_position(n).unwrap().x)
//!     .collect();
//! assert_eq!(xs, vec![1.0, 2.0, 3.0]);
//! ```

use config::constants::Tolerances;
use instancer_kernel::vec3::lerp;
use instancer_kernel::{aim_rotation, world_axis_length, Axis, Vec3};

use crate::apply::{fail, Applier, Grouping, Pose};
use crate::diagnostic::{Diagnostic, PlacementOutcome};
use crate::error::{PlacementError, PlacementResult};
use crate::params::{OrientationMode, PlacementSpec};
use crate::scene::{NodeId, SceneGraph};
use crate::snapshot::TransformSnapshot;
use crate::steps::{count_steps, ensure_step_limit, spacing_steps};

// =============================================================================
// REQUEST
// =============================================================================

/// Fully resolved inputs of one linear placement.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearArrayRequest {
    /// Start anchor; optional only for [`PlacementSpec::BoundingBoxCount`].
    pub parent: Option<NodeId>,
    /// Template and end anchor.
    pub child: NodeId,
    pub spec: PlacementSpec,
    pub include_end: bool,
    pub orientation: OrientationMode,
    /// Attach instances (or their container) to the parent anchor.
    pub parent_to_anchor: bool,
    /// Container name; `Some("")` uses the default pattern.
    pub group_name: Option<String>,
    /// Negate this local scale axis on every odd instance.
    pub alternate_scale: Option<Axis>,
    pub tolerances: Tolerances,
}

impl LinearArrayRequest {
    pub fn new(parent: Option<NodeId>, child: NodeId, spec: PlacementSpec) -> Self {
        Self {
            parent,
            child,
            spec,
            include_end: false,
            orientation: OrientationMode::None,
            parent_to_anchor: true,
            group_name: None,
            alternate_scale: None,
            tolerances: Tolerances::default(),
        }
    }
}

// =============================================================================
// PLAN
// =============================================================================

/// Poses computed for a linear placement, in placement order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearPlan {
    pub poses: Vec<Pose>,
    /// Node the instances (or their container) attach to.
    pub attach_to: Option<NodeId>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LinearPlan {
    fn empty(attach_to: Option<NodeId>, diagnostic: Diagnostic) -> Self {
        Self {
            poses: Vec::new(),
            attach_to,
            diagnostics: vec![diagnostic],
        }
    }
}

/// Where each instance goes and what it aims at.
struct Track {
    positions: Vec<Vec3>,
    aim_targets: Vec<Vec3>,
}

/// A track, or the reason nothing can be placed.
type Stepped = Result<Track, Diagnostic>;

/// Computes the poses of a linear placement from captured snapshots.
///
/// `parent` must be present for every mode except
/// [`PlacementSpec::BoundingBoxCount`].
pub fn plan_linear(
    request: &LinearArrayRequest,
    parent: Option<&TransformSnapshot>,
    child: &TransformSnapshot,
) -> PlacementResult<LinearPlan> {
    let attach_to = if !request.parent_to_anchor {
        None
    } else if let Some(p) = parent {
        Some(p.node.clone())
    } else if matches!(request.spec, PlacementSpec::BoundingBoxCount(..)) {
        child.parent.clone()
    } else {
        None
    };

    let stepped = match request.spec {
        PlacementSpec::BoundingBoxCount(axis, n) => {
            ensure_step_limit(f64::from(n))?;
            extrapolate(request, child, axis, n)
        }
        PlacementSpec::FixedCount(n) => {
            let start = require_parent(parent, child)?;
            if n == 0 {
                Err(Diagnostic::warning("count must be at least 1; nothing placed"))
            } else {
                Ok(interpolate(start, child, count_steps(n, request.include_end)?))
            }
        }
        PlacementSpec::FixedSpacing(d) => {
            if !d.is_finite() {
                return Err(PlacementError::invalid_parameter(format!(
                    "spacing must be a finite number, got {d}"
                )));
            }
            let start = require_parent(parent, child)?;
            if d <= 0.0 {
                Err(Diagnostic::warning("spacing must be positive; nothing placed"))
            } else {
                spaced(request, start, child, d)?
            }
        }
        PlacementSpec::BoundingBoxSpacing(axis) => {
            let start = require_parent(parent, child)?;
            match world_extent(child, axis, &request.tolerances) {
                Ok((_, extent)) => spaced(request, start, child, extent)?,
                Err(diagnostic) => Err(diagnostic),
            }
        }
    };

    let track = match stepped {
        Ok(track) => track,
        Err(diagnostic) => {
            tracing::debug!(reason = %diagnostic.message, "linear placement produced no steps");
            return Ok(LinearPlan::empty(attach_to, diagnostic));
        }
    };

    let poses = track
        .positions
        .iter()
        .zip(&track.aim_targets)
        .enumerate()
        .map(|(index, (&position, &target))| {
            let mut pose = Pose::at(position);
            match request.orientation {
                OrientationMode::None => {}
                OrientationMode::CopySourceRotation => pose = pose.with_rotation(child.rotation),
                OrientationMode::AimAtTarget => {
                    if let Some(rotation) = aim_rotation(target - position) {
                        pose = pose.with_rotation(rotation);
                    }
                }
            }
            if let Some(axis) = request.alternate_scale {
                let scale = if index % 2 == 1 {
                    axis.negate_component(child.scale)
                } else {
                    child.scale
                };
                pose = pose.with_scale(scale);
            }
            pose
        })
        .collect();

    Ok(LinearPlan {
        poses,
        attach_to,
        diagnostics: Vec::new(),
    })
}

fn require_parent<'a>(
    parent: Option<&'a TransformSnapshot>,
    child: &TransformSnapshot,
) -> PlacementResult<&'a TransformSnapshot> {
    parent.ok_or_else(|| {
        PlacementError::missing(format!(
            "a parent anchor is required to place {} in this mode",
            child.node
        ))
    })
}

/// Steps outward from the child, one world extent per multiplier.
fn extrapolate(request: &LinearArrayRequest, child: &TransformSnapshot, axis: Axis, n: u32) -> Stepped {
    let (direction, extent) = world_extent(child, axis, &request.tolerances)?;
    let mut multipliers: Vec<f64> = (1..=n).map(f64::from).collect();
    if request.include_end {
        multipliers.push(f64::from(n) + 1.0);
    }
    if multipliers.is_empty() {
        return Err(Diagnostic::warning("count must be at least 1; nothing placed"));
    }
    let positions: Vec<Vec3> = multipliers
        .iter()
        .map(|&k| child.position + direction * extent * k)
        .collect();
    // Aim one unit further along the travel direction.
    let aim_targets = positions.iter().map(|p| *p + direction).collect();
    Ok(Track {
        positions,
        aim_targets,
    })
}

/// Positions at parametric `steps` from `start` to the child, aiming at
/// the child.
fn interpolate(start: &TransformSnapshot, child: &TransformSnapshot, steps: Vec<f64>) -> Track {
    let positions = steps
        .iter()
        .map(|&t| lerp(start.position, child.position, t))
        .collect();
    Track {
        positions,
        aim_targets: vec![child.position; steps.len()],
    }
}

fn spaced(
    request: &LinearArrayRequest,
    start: &TransformSnapshot,
    child: &TransformSnapshot,
    spacing: f64,
) -> PlacementResult<Stepped> {
    let tolerance = request.tolerances.position;
    let length = start.position.distance(child.position);
    if request.tolerances.is_negligible(length) && !request.include_end {
        return Ok(Err(Diagnostic::warning(
            "parent and child share a position; spacing placement has nothing to span",
        )));
    }
    let steps = spacing_steps(length, spacing, request.include_end, tolerance)?;
    if steps.is_empty() {
        return Ok(Err(Diagnostic::warning(
            "no instances fit between the anchors; nothing placed",
        )
        .with_hint("lower the spacing or enable include_end")));
    }
    Ok(Ok(interpolate(start, child, steps)))
}

/// World direction and world-space size of the child's bounds along a
/// local axis.
fn world_extent(
    child: &TransformSnapshot,
    axis: Axis,
    tolerances: &Tolerances,
) -> Result<(Vec3, f64), Diagnostic> {
    let bounds = child.bounds.ok_or_else(|| unmeasurable(child))?;
    let base = bounds.extent(axis);
    if tolerances.is_negligible(base) {
        return Err(zero_extent(axis));
    }
    let world = world_axis_length(&child.matrix, axis).ok_or_else(|| zero_extent(axis))?;
    let extent = base * world.scale;
    if tolerances.is_negligible(extent) {
        return Err(zero_extent(axis));
    }
    Ok((world.direction, extent))
}

fn unmeasurable(child: &TransformSnapshot) -> Diagnostic {
    Diagnostic::warning(format!("bounding box of {} could not be measured", child.node))
        .with_hint("use fixed spacing instead")
}

fn zero_extent(axis: Axis) -> Diagnostic {
    Diagnostic::warning(format!("zero size along local {axis}; nothing placed"))
}

// =============================================================================
// APPLY
// =============================================================================

/// Places a linear array into `scene`.
///
/// Fatal errors are reported through [`SceneGraph::fail`]; nodes created
/// before a rejected command are removed again.
pub fn place_linear<S: SceneGraph + ?Sized>(
    scene: &mut S,
    request: &LinearArrayRequest,
) -> PlacementResult<PlacementOutcome> {
    tracing::debug!(child = %request.child, spec = ?request.spec, "linear placement");
    match run(scene, request) {
        Ok(outcome) => Ok(outcome),
        Err(err) => Err(fail(scene, err)),
    }
}

fn run<S: SceneGraph + ?Sized>(
    scene: &mut S,
    request: &LinearArrayRequest,
) -> PlacementResult<PlacementOutcome> {
    let child = TransformSnapshot::capture(scene, &request.child).ok_or_else(|| {
        PlacementError::missing(format!("child {} does not exist", request.child))
    })?;
    let parent = match &request.parent {
        Some(node) => Some(TransformSnapshot::capture(scene, node).ok_or_else(|| {
            PlacementError::missing(format!("parent {node} does not exist"))
        })?),
        None => None,
    };

    let plan = plan_linear(request, parent.as_ref(), &child)?;

    let grouping = Grouping::from_request(request.group_name.as_deref(), plan.attach_to.clone());
    let mut applier = Applier::new(scene, grouping);
    for pose in &plan.poses {
        applier.place(&child.node, pose, plan.attach_to.as_ref())?;
    }
    let outcome = applier.finish(plan.diagnostics);
    tracing::debug!(placed = outcome.len(), "linear placement finished");
    Ok(outcome)
}

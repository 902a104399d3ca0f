//! # Radial Placement
//!
//! Places `N` instances of a target around a base transform at equal angular
//! steps. Each instance hangs under its own pivot (`circle_null_NN`) that
//! starts at the base's pose, is pushed out along the chosen local axis by
//! the radius, and finally has its rotate channel for that axis set to
//! `i * 360/N` degrees. The other two channels keep the base's values. The
//! pivot's rotation is what carries the instance around the circle.

use config::constants::{DEFAULT_RADIAL_COUNT, RADIAL_PIVOT_PREFIX};
use glam::DMat3;
use instancer_kernel::{with_euler_channel, Axis, Vec3};

use crate::apply::{fail, Applier, Grouping, Pose};
use crate::diagnostic::{Diagnostic, PlacementOutcome};
use crate::error::{PlacementError, PlacementResult};
use crate::scene::{NodeId, SceneGraph};
use crate::snapshot::TransformSnapshot;
use crate::steps::ensure_step_limit;

// =============================================================================
// REQUEST
// =============================================================================

/// Fully resolved inputs of one radial placement.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialRequest {
    /// Rotation pivot.
    pub base: NodeId,
    /// Instanced at every step.
    pub target: NodeId,
    pub count: u32,
    /// Local axis of the base to rotate about.
    pub axis: Axis,
    /// Offset along `axis` applied to each pivot before rotating.
    pub radius: f64,
    /// Container for all pivots; `Some("")` uses the default pattern.
    pub group_name: Option<String>,
}

impl RadialRequest {
    pub fn new(base: NodeId, target: NodeId, count: u32) -> Self {
        Self {
            base,
            target,
            count,
            axis: Axis::Y,
            radius: 0.0,
            group_name: None,
        }
    }

    /// Sets the rotation axis from a label such as `"x"`.
    ///
    /// # Examples
    /// ```
    /// use instancer::{NodeId, PlacementError, RadialRequest};
    ///
    /// let request = RadialRequest::new(NodeId::new("base"), NodeId::new("petal"), 6);
    /// assert!(request.clone().with_axis_label("Z").is_ok());
    /// assert!(matches!(
    ///     request.with_axis_label("w"),
    ///     Err(PlacementError::InvalidAxis(_))
    /// ));
    /// ```
    pub fn with_axis_label(mut self, label: &str) -> PlacementResult<Self> {
        self.axis = label.parse()?;
        Ok(self)
    }
}

impl Default for RadialRequest {
    fn default() -> Self {
        Self::new(NodeId::new(""), NodeId::new(""), DEFAULT_RADIAL_COUNT)
    }
}

// =============================================================================
// PLAN
// =============================================================================

/// One pivot and the pose it gives its instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialStep {
    pub pivot_name: String,
    pub angle_degrees: f64,
    /// Pivot world position after the radial offset.
    pub pivot_position: Vec3,
    /// Pivot world rotation before stepping (the base rotation).
    pub initial_rotation: DMat3,
    /// Pivot world rotation after stepping.
    pub rotation: DMat3,
    /// Resulting world position of the instance.
    pub instance_position: Vec3,
    /// Resulting world rotation of the instance.
    pub instance_rotation: DMat3,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadialPlan {
    pub steps: Vec<RadialStep>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Computes pivot poses for a radial placement.
pub fn plan_radial(
    request: &RadialRequest,
    base: &TransformSnapshot,
    target: &TransformSnapshot,
) -> PlacementResult<RadialPlan> {
    if request.count == 0 {
        return Err(PlacementError::invalid_parameter(
            "radial placement needs at least one instance",
        ));
    }
    ensure_step_limit(f64::from(request.count))?;
    if !request.radius.is_finite() {
        return Err(PlacementError::invalid_parameter(format!(
            "radius must be a finite number, got {}",
            request.radius
        )));
    }

    let angle_step = 360.0 / f64::from(request.count);
    let base_rotation = base.rotation;
    let pivot_position = base.position + base_rotation * request.axis.unit() * request.radius;
    // Target pose expressed in the unrotated pivot's frame.
    let local_offset = base_rotation.transpose() * (target.position - pivot_position);
    let local_rotation = base_rotation.transpose() * target.rotation;

    let steps = (0..request.count)
        .map(|i| {
            let angle_degrees = angle_step * f64::from(i);
            let rotation = with_euler_channel(base_rotation, request.axis, angle_degrees);
            RadialStep {
                pivot_name: format!("{RADIAL_PIVOT_PREFIX}_{i:02}"),
                angle_degrees,
                pivot_position,
                initial_rotation: base_rotation,
                rotation,
                instance_position: pivot_position + rotation * local_offset,
                instance_rotation: rotation * local_rotation,
            }
        })
        .collect();

    Ok(RadialPlan {
        steps,
        diagnostics: Vec::new(),
    })
}

// =============================================================================
// APPLY
// =============================================================================

/// Places the radial array into `scene`.
///
/// Returns the instances in step order; the pivots are their parents.
pub fn place_radial<S: SceneGraph + ?Sized>(
    scene: &mut S,
    request: &RadialRequest,
) -> PlacementResult<PlacementOutcome> {
    tracing::debug!(count = request.count, axis = %request.axis, "radial placement");
    match run(scene, request) {
        Ok(outcome) => Ok(outcome),
        Err(err) => Err(fail(scene, err)),
    }
}

fn run<S: SceneGraph + ?Sized>(
    scene: &mut S,
    request: &RadialRequest,
) -> PlacementResult<PlacementOutcome> {
    let base = TransformSnapshot::capture(scene, &request.base).ok_or_else(|| {
        PlacementError::missing(format!("base {} does not exist", request.base))
    })?;
    let target = TransformSnapshot::capture(scene, &request.target).ok_or_else(|| {
        PlacementError::missing(format!("target {} does not exist", request.target))
    })?;

    let plan = plan_radial(request, &base, &target)?;

    let grouping = Grouping::from_request(request.group_name.as_deref(), None);
    let mut applier = Applier::new(scene, grouping);
    for step in &plan.steps {
        let pivot = applier.scope().create_empty_group(Some(&step.pivot_name))?;
        let pivot = applier.attach(pivot, None)?;
        applier.apply_pose(
            &pivot,
            &Pose::at(step.pivot_position).with_rotation(step.initial_rotation),
        )?;

        let instance = applier.scope().create_instance(&target.node)?;
        let instance = applier.scope().reparent(&instance, &pivot)?;
        // Rotate only after the instance hangs under the pivot.
        applier.scene().set_world_rotation(&pivot, step.rotation)?;
        applier.record(instance);
    }
    let outcome = applier.finish(plan.diagnostics);
    tracing::debug!(placed = outcome.len(), "radial placement finished");
    Ok(outcome)
}

#[cfg(test)]
mod tests;

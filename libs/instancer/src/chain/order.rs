//! Travel-order inference for unordered waypoint sets.
//!
//! The globally farthest pair fixes the direction, oriented so that its
//! dominant world component increases; every waypoint is then sorted by its
//! projection onto that direction. This is a one-dimensional
//! heuristic: approximately collinear or monotonic sets order as expected,
//! loops and zig-zags collapse onto the dominant axis.

use instancer_kernel::{farthest_pair, normalize_or_zero, Vec3};

use crate::error::{PlacementError, PlacementResult};
use crate::scene::NodeId;

/// A waypoint node and its world position.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub node: NodeId,
    pub position: Vec3,
}

impl Waypoint {
    pub fn new(node: NodeId, position: Vec3) -> Self {
        Self { node, position }
    }
}

/// Waypoints in inferred travel order.
///
/// Contains every input waypoint exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointOrder {
    pub waypoints: Vec<Waypoint>,
    /// Unit direction across the farthest pair, with its largest-magnitude
    /// component positive; zero when all waypoints coincide.
    pub direction: Vec3,
}

impl WaypointOrder {
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Orders `waypoints` along the direction of their farthest pair.
///
/// The result does not depend on input order except for ties in
/// projection, which keep input order. Fails with
/// [`PlacementError::InsufficientInput`] for fewer than two waypoints.
///
/// # Examples
/// ```
/// use instancer::chain::{order_waypoints, Waypoint};
/// use instancer::NodeId;
/// use instancer_kernel::Vec3;
///
/// let order = order_waypoints(vec![
///     Waypoint::new(NodeId::new("p2"), Vec3::new(2.0, 0.0, 0.0)),
///     Waypoint::new(NodeId::new("p0"), Vec3::ZERO),
///     Waypoint::new(NodeId::new("p1"), Vec3::new(1.0, 0.0, 0.0)),
/// ])
/// .unwrap();
/// let names: Vec<&str> = order.waypoints.iter().map(|w| w.node.as_str()).collect();
/// assert_eq!(names, ["p0", "p1", "p2"]);
/// ```
pub fn order_waypoints(waypoints: Vec<Waypoint>) -> PlacementResult<WaypointOrder> {
    let points: Vec<Vec3> = waypoints.iter().map(|w| w.position).collect();
    let Some((a, b)) = farthest_pair(&points) else {
        return Err(PlacementError::InsufficientInput {
            operation: "chain ordering",
            required: 2,
            found: waypoints.len(),
        });
    };
    let (a, b) = canonical_pair(&points, a, b);
    let origin = points[a];
    let direction = normalize_or_zero(points[b] - origin);

    let mut keyed: Vec<(f64, Waypoint)> = waypoints
        .into_iter()
        .map(|w| ((w.position - origin).dot(direction), w))
        .collect();
    // Stable, so equal projections keep their input order.
    keyed.sort_by(|l, r| l.0.total_cmp(&r.0));

    tracing::trace!(count = keyed.len(), ?direction, "ordered waypoints");
    Ok(WaypointOrder {
        waypoints: keyed.into_iter().map(|(_, w)| w).collect(),
        direction,
    })
}

/// Orders `(a, b)` so the pair's dominant component increases from `a` to
/// `b`. Ties between components go to the earlier axis.
fn canonical_pair(points: &[Vec3], a: usize, b: usize) -> (usize, usize) {
    let delta = points[b] - points[a];
    let abs = delta.abs();
    let dominant = if abs.x >= abs.y && abs.x >= abs.z {
        delta.x
    } else if abs.y >= abs.z {
        delta.y
    } else {
        delta.z
    };
    if dominant < 0.0 {
        (b, a)
    } else {
        (a, b)
    }
}

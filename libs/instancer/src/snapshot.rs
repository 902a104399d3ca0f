//! # Transform Snapshots
//!
//! Read-only world transform data captured once at the start of a placement
//! call. Plan functions only ever see snapshots, never the live scene.

use glam::{DMat3, DMat4};
use instancer_kernel::{LocalBounds, OrientedBounds, Vec3};

use crate::scene::{NodeId, SceneGraph};

/// World pose of one node plus its object-space bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformSnapshot {
    pub node: NodeId,
    /// World pivot position.
    pub position: Vec3,
    /// World rotation (columns are local axes).
    pub rotation: DMat3,
    /// Local scale, the value an instance inherits from its template.
    pub scale: Vec3,
    /// Object-space bounds, `None` for nodes without measurable geometry.
    pub bounds: Option<LocalBounds>,
    /// Full world matrix.
    pub matrix: DMat4,
    /// Scene parent at capture time.
    pub parent: Option<NodeId>,
}

impl TransformSnapshot {
    /// Reads `node` from the scene. Returns `None` if it does not exist.
    pub fn capture<S: SceneGraph + ?Sized>(scene: &S, node: &NodeId) -> Option<Self> {
        if !scene.exists(node) {
            return None;
        }
        let position = scene.world_position(node)?;
        let rotation = scene.world_rotation(node).unwrap_or(DMat3::IDENTITY);
        let scale = scene.local_scale(node).unwrap_or(Vec3::ONE);
        let matrix = scene
            .world_matrix(node)
            .unwrap_or_else(|| compose(position, rotation, scale));
        Some(Self {
            node: node.clone(),
            position,
            rotation,
            scale,
            bounds: scene.object_bounding_box(node),
            matrix,
            parent: scene.parent_of(node),
        })
    }

    /// Snapshot of a root-level node built from translate/rotate/scale.
    ///
    /// # Examples
    /// ```
    /// use glam::DMat3;
    /// use instancer::{NodeId, TransformSnapshot};
    /// use instancer_kernel::Vec3;
    ///
    /// let snap = TransformSnapshot::from_trs(
    ///     NodeId::new("a"),
    ///     Vec3::new(1.0, 0.0, 0.0),
    ///     DMat3::IDENTITY,
    ///     Vec3::ONE,
    /// );
    /// assert_eq!(snap.matrix.w_axis.truncate(), Vec3::new(1.0, 0.0, 0.0));
    /// ```
    pub fn from_trs(node: NodeId, position: Vec3, rotation: DMat3, scale: Vec3) -> Self {
        Self {
            node,
            position,
            rotation,
            scale,
            bounds: None,
            matrix: compose(position, rotation, scale),
            parent: None,
        }
    }

    pub fn with_bounds(mut self, bounds: LocalBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// World-space corners and center of the bounds, if any.
    pub fn oriented_bounds(&self) -> Option<OrientedBounds> {
        self.bounds.map(|b| b.to_world(&self.matrix))
    }
}

fn compose(position: Vec3, rotation: DMat3, scale: Vec3) -> DMat4 {
    DMat4::from_translation(position) * DMat4::from_mat3(rotation * DMat3::from_diagonal(scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;
    use approx::assert_abs_diff_eq;

    #[test]
    fn capture_reads_world_data() {
        let mut scene = MemoryScene::new();
        let parent = scene.add_node("root", Vec3::new(0.0, 5.0, 0.0));
        let node = scene.add_box("cube", Vec3::new(1.0, 5.0, 0.0), Vec3::splat(2.0));
        scene.parent(&node, &parent).unwrap();

        let snap = TransformSnapshot::capture(&scene, &node).unwrap();
        assert_abs_diff_eq!((snap.position - Vec3::new(1.0, 5.0, 0.0)).length(), 0.0, epsilon = 1e-12);
        assert_eq!(snap.parent, Some(parent));
        let oriented = snap.oriented_bounds().unwrap();
        assert_abs_diff_eq!((oriented.center - snap.position).length(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn capture_of_missing_node_is_none() {
        let scene = MemoryScene::new();
        assert!(TransformSnapshot::capture(&scene, &NodeId::new("nope")).is_none());
    }

    #[test]
    fn oriented_bounds_follow_scale() {
        let snap = TransformSnapshot::from_trs(
            NodeId::new("a"),
            Vec3::ZERO,
            DMat3::IDENTITY,
            Vec3::new(4.0, 1.0, 1.0),
        )
        .with_bounds(LocalBounds::unit_cube());
        let oriented = snap.oriented_bounds().unwrap();
        let max_x = oriented.corners.iter().map(|c| c.x).fold(f64::MIN, f64::max);
        assert_abs_diff_eq!(max_x, 2.0, epsilon = 1e-12);
    }
}

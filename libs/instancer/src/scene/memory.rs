//! # In-Memory Scene
//!
//! A small hierarchical scene graph implementing [`SceneGraph`].
//!
//! Each node stores a local translate/rotate/scale and an optional
//! object-space bounding box; world transforms are composed on demand
//! through the parent chain. Parenting keeps the world pose, instances copy
//! their template's local transform, parent and bounds.
//!
//! Hosts without a real scene graph can use it directly; the crate's tests
//! drive every placer through it.
//!
//! ## Example
//!
//! ```rust
//! use instancer::{MemoryScene, SceneGraph};
//! use instancer_kernel::Vec3;
//!
//! let mut scene = MemoryScene::new();
//! let a = scene.add_node("a", Vec3::new(1.0, 0.0, 0.0));
//! let b = scene.add_node("b", Vec3::new(5.0, 0.0, 0.0));
//! scene.parent(&a, &b).unwrap();
//! assert_eq!(scene.world_position(&a), Some(Vec3::new(1.0, 0.0, 0.0)));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use glam::{DMat3, DMat4};
use instancer_kernel::{LocalBounds, Vec3};

use super::{NodeId, SceneError, SceneGraph};

/// What kind of node this is; informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A plain transform added by the host.
    Transform,
    /// An empty container.
    Group,
    /// A synthesized unit box.
    Box,
    /// An instance of another node's geometry.
    Instance { of: NodeId },
}

#[derive(Debug, Clone)]
struct MemoryNode {
    kind: NodeKind,
    parent: Option<NodeId>,
    translation: Vec3,
    rotation: DMat3,
    scale: Vec3,
    bounds: Option<LocalBounds>,
}

impl MemoryNode {
    fn new(kind: NodeKind, translation: Vec3, bounds: Option<LocalBounds>) -> Self {
        Self {
            kind,
            parent: None,
            translation,
            rotation: DMat3::IDENTITY,
            scale: Vec3::ONE,
            bounds,
        }
    }

    fn local_matrix(&self) -> DMat4 {
        DMat4::from_translation(self.translation)
            * DMat4::from_mat3(self.rotation * DMat3::from_diagonal(self.scale))
    }
}

/// Hierarchical in-memory [`SceneGraph`].
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: BTreeMap<NodeId, MemoryNode>,
    creation_order: Vec<NodeId>,
    selection: Vec<NodeId>,
    counter: u64,
    rejected: BTreeSet<&'static str>,
    warnings: Vec<String>,
    failures: Vec<String>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Fixture construction
    // -------------------------------------------------------------------------

    /// Adds a transform without geometry at `position`.
    pub fn add_node(&mut self, name: &str, position: Vec3) -> NodeId {
        self.insert(name, MemoryNode::new(NodeKind::Transform, position, None))
    }

    /// Adds a transform whose geometry is a box of `size` centered on its
    /// pivot.
    pub fn add_box(&mut self, name: &str, position: Vec3, size: Vec3) -> NodeId {
        let half = size.abs() * 0.5;
        let bounds = LocalBounds::new(-half, half);
        self.insert(name, MemoryNode::new(NodeKind::Transform, position, Some(bounds)))
    }

    /// Overrides a node's object-space bounding box.
    pub fn set_bounds(&mut self, node: &NodeId, bounds: Option<LocalBounds>) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.bounds = bounds;
        }
    }

    pub fn set_selection(&mut self, selection: Vec<NodeId>) {
        self.selection = selection;
    }

    /// Makes every later call of `operation` fail with [`SceneError::Rejected`].
    ///
    /// Operation names match the trait methods, e.g. `"create_instance"`.
    pub fn reject(&mut self, operation: &'static str) {
        self.rejected.insert(operation);
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, node: &NodeId) -> Option<&NodeKind> {
        self.nodes.get(node).map(|n| &n.kind)
    }

    /// Direct children of `node` in creation order.
    pub fn children_of(&self, node: &NodeId) -> Vec<NodeId> {
        self.creation_order
            .iter()
            .filter(|id| {
                self.nodes
                    .get(*id)
                    .is_some_and(|n| n.parent.as_ref() == Some(node))
            })
            .cloned()
            .collect()
    }

    /// Messages received through [`SceneGraph::warn`].
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Messages received through [`SceneGraph::fail`].
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn insert(&mut self, name: &str, node: MemoryNode) -> NodeId {
        let id = self.unique_name(name);
        self.nodes.insert(id.clone(), node);
        self.creation_order.push(id.clone());
        id
    }

    fn unique_name(&mut self, base: &str) -> NodeId {
        if base.contains('#') {
            loop {
                self.counter += 1;
                let candidate = NodeId::new(base.replace('#', &self.counter.to_string()));
                if !self.nodes.contains_key(&candidate) {
                    return candidate;
                }
            }
        }
        let candidate = NodeId::new(base);
        if !self.nodes.contains_key(&candidate) {
            return candidate;
        }
        loop {
            self.counter += 1;
            let candidate = NodeId::new(format!("{base}{}", self.counter));
            if !self.nodes.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn check(&self, operation: &'static str, node: &NodeId) -> Result<(), SceneError> {
        if self.rejected.contains(operation) {
            return Err(SceneError::Rejected {
                operation,
                node: node.clone(),
                message: "rejected by scene".to_string(),
            });
        }
        Ok(())
    }

    fn node(&self, node: &NodeId) -> Result<&MemoryNode, SceneError> {
        self.nodes
            .get(node)
            .ok_or_else(|| SceneError::NodeNotFound(node.clone()))
    }

    fn node_mut(&mut self, node: &NodeId) -> Result<&mut MemoryNode, SceneError> {
        self.nodes
            .get_mut(node)
            .ok_or_else(|| SceneError::NodeNotFound(node.clone()))
    }

    fn parent_world_matrix(&self, node: &MemoryNode) -> DMat4 {
        node.parent
            .as_ref()
            .and_then(|p| self.world_matrix(p))
            .unwrap_or(DMat4::IDENTITY)
    }

    fn parent_world_rotation(&self, node: &MemoryNode) -> DMat3 {
        node.parent
            .as_ref()
            .and_then(|p| self.world_rotation(p))
            .unwrap_or(DMat3::IDENTITY)
    }

    /// Per-axis product of the scales from the root down to `node`.
    fn world_scale(&self, node: &NodeId) -> Option<Vec3> {
        let n = self.nodes.get(node)?;
        let inherited = n
            .parent
            .as_ref()
            .and_then(|p| self.world_scale(p))
            .unwrap_or(Vec3::ONE);
        Some(inherited * n.scale)
    }

    fn is_descendant(&self, node: &NodeId, ancestor: &NodeId) -> bool {
        let mut current = Some(node.clone());
        while let Some(id) = current {
            if &id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent.clone());
        }
        false
    }
}

impl SceneGraph for MemoryScene {
    fn exists(&self, node: &NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    fn world_position(&self, node: &NodeId) -> Option<Vec3> {
        self.world_matrix(node).map(|m| m.w_axis.truncate())
    }

    fn world_rotation(&self, node: &NodeId) -> Option<DMat3> {
        let n = self.nodes.get(node)?;
        Some(self.parent_world_rotation(n) * n.rotation)
    }

    fn local_scale(&self, node: &NodeId) -> Option<Vec3> {
        self.nodes.get(node).map(|n| n.scale)
    }

    fn object_bounding_box(&self, node: &NodeId) -> Option<LocalBounds> {
        self.nodes.get(node)?.bounds
    }

    fn world_matrix(&self, node: &NodeId) -> Option<DMat4> {
        let n = self.nodes.get(node)?;
        Some(self.parent_world_matrix(n) * n.local_matrix())
    }

    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent.clone()
    }

    fn selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn set_world_position(&mut self, node: &NodeId, position: Vec3) -> Result<(), SceneError> {
        self.check("set_world_position", node)?;
        let parent_world = self.parent_world_matrix(self.node(node)?);
        let local = parent_world.inverse().transform_point3(position);
        self.node_mut(node)?.translation = local;
        Ok(())
    }

    fn set_world_rotation(&mut self, node: &NodeId, rotation: DMat3) -> Result<(), SceneError> {
        self.check("set_world_rotation", node)?;
        let parent_rotation = self.parent_world_rotation(self.node(node)?);
        self.node_mut(node)?.rotation = parent_rotation.transpose() * rotation;
        Ok(())
    }

    fn set_local_scale(&mut self, node: &NodeId, scale: Vec3) -> Result<(), SceneError> {
        self.check("set_local_scale", node)?;
        self.node_mut(node)?.scale = scale;
        Ok(())
    }

    fn create_instance(&mut self, template: &NodeId) -> Result<NodeId, SceneError> {
        self.check("create_instance", template)?;
        let source = self.node(template)?.clone();
        let node = MemoryNode {
            kind: NodeKind::Instance {
                of: template.clone(),
            },
            ..source
        };
        let base = format!("{template}_inst#");
        Ok(self.insert(&base, node))
    }

    fn create_empty_group(&mut self, name: Option<&str>) -> Result<NodeId, SceneError> {
        let name = name.unwrap_or("group#");
        self.check("create_empty_group", &NodeId::new(name))?;
        Ok(self.insert(name, MemoryNode::new(NodeKind::Group, Vec3::ZERO, None)))
    }

    fn create_unit_box(&mut self) -> Result<NodeId, SceneError> {
        self.check("create_unit_box", &NodeId::new("box"))?;
        let node = MemoryNode::new(NodeKind::Box, Vec3::ZERO, Some(LocalBounds::unit_cube()));
        Ok(self.insert("fillBox#", node))
    }

    fn parent(&mut self, node: &NodeId, new_parent: &NodeId) -> Result<NodeId, SceneError> {
        self.check("parent", node)?;
        self.node(new_parent)?;
        if self.is_descendant(new_parent, node) {
            return Err(SceneError::Rejected {
                operation: "parent",
                node: node.clone(),
                message: format!("{new_parent} is a descendant"),
            });
        }
        let position = self.world_position(node).ok_or_else(|| SceneError::NodeNotFound(node.clone()))?;
        let rotation = self.world_rotation(node).ok_or_else(|| SceneError::NodeNotFound(node.clone()))?;
        let scale = self.world_scale(node).ok_or_else(|| SceneError::NodeNotFound(node.clone()))?;
        let parent_scale = self.world_scale(new_parent).unwrap_or(Vec3::ONE);

        self.node_mut(node)?.parent = Some(new_parent.clone());
        self.set_world_position(node, position)?;
        self.set_world_rotation(node, rotation)?;
        // A zero parent scale cannot be compensated; keep the old local value.
        let local = self.node_mut(node)?;
        local.scale = Vec3::select(parent_scale.cmpeq(Vec3::ZERO), local.scale, scale / parent_scale);
        Ok(node.clone())
    }

    fn delete(&mut self, node: &NodeId) -> Result<(), SceneError> {
        self.check("delete", node)?;
        self.node(node)?;
        let doomed: Vec<NodeId> = self
            .creation_order
            .iter()
            .filter(|id| self.is_descendant(id, node))
            .cloned()
            .collect();
        for id in &doomed {
            self.nodes.remove(id);
        }
        self.creation_order.retain(|id| !doomed.contains(id));
        self.selection.retain(|id| !doomed.contains(id));
        Ok(())
    }

    fn warn(&mut self, message: &str) {
        tracing::warn!("{}", message);
        self.warnings.push(message.to_string());
    }

    fn fail(&mut self, message: &str) {
        tracing::error!("{}", message);
        self.failures.push(message.to_string());
    }
}

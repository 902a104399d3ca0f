//! # Scene Graph Collaborator
//!
//! The narrow surface the placers consume from a host scene graph.
//!
//! Queries return `Option` (absent means the node is missing or cannot be
//! measured); mutations return `Result` so a host can reject a command.
//! Everything about node creation, parenting and naming stays on the host's
//! side of this trait.

pub mod memory;
pub mod scope;

use std::fmt;

use glam::{DMat3, DMat4};
use instancer_kernel::{LocalBounds, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemoryScene;
pub use scope::NodeScope;

// =============================================================================
// NODE IDENTITY
// =============================================================================

/// Host-side identifier of a scene node (typically its path or name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// A scene-graph command that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The addressed node does not exist.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// The host refused the command.
    #[error("{operation} rejected for {node}: {message}")]
    Rejected {
        operation: &'static str,
        node: NodeId,
        message: String,
    },
}

// =============================================================================
// COLLABORATOR TRAIT
// =============================================================================

/// Host scene graph as seen by the placers.
///
/// Calls are blocking and strictly ordered; a placer never runs concurrently
/// with another placer against the same implementation.
pub trait SceneGraph {
    /// Returns true if `node` exists.
    fn exists(&self, node: &NodeId) -> bool;

    /// World-space pivot position.
    fn world_position(&self, node: &NodeId) -> Option<Vec3>;

    /// World-space rotation as an orthonormal basis (columns are local axes).
    fn world_rotation(&self, node: &NodeId) -> Option<DMat3>;

    /// Scale relative to the node's parent.
    fn local_scale(&self, node: &NodeId) -> Option<Vec3>;

    /// Axis-aligned bounding box in the node's object space.
    fn object_bounding_box(&self, node: &NodeId) -> Option<LocalBounds>;

    /// Full world matrix (translation, rotation and scale).
    fn world_matrix(&self, node: &NodeId) -> Option<DMat4>;

    /// Current scene parent, `None` at world level.
    fn parent_of(&self, node: &NodeId) -> Option<NodeId>;

    /// Ordered current selection; only consulted by [`crate::selection`].
    fn selection(&self) -> Vec<NodeId>;

    fn set_world_position(&mut self, node: &NodeId, position: Vec3) -> Result<(), SceneError>;

    fn set_world_rotation(&mut self, node: &NodeId, rotation: DMat3) -> Result<(), SceneError>;

    fn set_local_scale(&mut self, node: &NodeId, scale: Vec3) -> Result<(), SceneError>;

    /// Creates an instance sharing `template`'s geometry, with the
    /// template's transform.
    fn create_instance(&mut self, template: &NodeId) -> Result<NodeId, SceneError>;

    /// Creates an empty transform at the world origin. A `#` in `name` is a
    /// request for a unique number.
    fn create_empty_group(&mut self, name: Option<&str>) -> Result<NodeId, SceneError>;

    /// Creates a 1×1×1 box centered on its pivot.
    fn create_unit_box(&mut self) -> Result<NodeId, SceneError>;

    /// Parents `node` under `new_parent`, preserving its world position,
    /// rotation and scale.
    ///
    /// Returns the node's identifier afterwards, which hosts with path-based
    /// names may change.
    fn parent(&mut self, node: &NodeId, new_parent: &NodeId) -> Result<NodeId, SceneError>;

    /// Deletes `node` and everything below it.
    fn delete(&mut self, node: &NodeId) -> Result<(), SceneError>;

    /// Non-fatal diagnostic sink.
    fn warn(&mut self, message: &str) {
        tracing::warn!("{}", message);
    }

    /// Fatal diagnostic sink, invoked right before a placer returns `Err`.
    fn fail(&mut self, message: &str) {
        tracing::error!("{}", message);
    }
}

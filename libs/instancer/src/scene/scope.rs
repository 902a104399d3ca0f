//! Scoped ownership of nodes created during one placement call.
//!
//! Every node a placer creates goes through a [`NodeScope`]. If the call
//! returns early with an error the scope is dropped uncommitted and deletes
//! what it created, newest first, so a failed call leaves no stray groups,
//! pivots or half-placed instances behind.

use super::{NodeId, SceneError, SceneGraph};

/// Tracks nodes created through it and deletes them on drop unless
/// [`NodeScope::commit`] was called.
pub struct NodeScope<'s, S: SceneGraph + ?Sized> {
    scene: &'s mut S,
    created: Vec<NodeId>,
    committed: bool,
}

impl<'s, S: SceneGraph + ?Sized> NodeScope<'s, S> {
    pub fn new(scene: &'s mut S) -> Self {
        Self {
            scene,
            created: Vec::new(),
            committed: false,
        }
    }

    /// Direct access for queries and transform edits.
    #[inline]
    pub fn scene(&mut self) -> &mut S {
        self.scene
    }

    /// Nodes created so far, oldest first.
    pub fn created(&self) -> &[NodeId] {
        &self.created
    }

    pub fn create_instance(&mut self, template: &NodeId) -> Result<NodeId, SceneError> {
        let node = self.scene.create_instance(template)?;
        self.created.push(node.clone());
        Ok(node)
    }

    pub fn create_empty_group(&mut self, name: Option<&str>) -> Result<NodeId, SceneError> {
        let node = self.scene.create_empty_group(name)?;
        self.created.push(node.clone());
        Ok(node)
    }

    pub fn create_unit_box(&mut self) -> Result<NodeId, SceneError> {
        let node = self.scene.create_unit_box()?;
        self.created.push(node.clone());
        Ok(node)
    }

    /// Parents `node` and follows a host-side rename in the tracked list.
    pub fn reparent(&mut self, node: &NodeId, new_parent: &NodeId) -> Result<NodeId, SceneError> {
        let renamed = self.scene.parent(node, new_parent)?;
        if let Some(slot) = self.created.iter_mut().find(|n| *n == node) {
            *slot = renamed.clone();
        }
        Ok(renamed)
    }

    /// Keeps everything created so far.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl<S: SceneGraph + ?Sized> Drop for NodeScope<'_, S> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for node in self.created.iter().rev() {
            if self.scene.exists(node) {
                if let Err(err) = self.scene.delete(node) {
                    tracing::warn!("could not remove {} after failed placement: {}", node, err);
                }
            }
        }
        if !self.created.is_empty() {
            tracing::debug!(count = self.created.len(), "rolled back uncommitted nodes");
        }
    }
}

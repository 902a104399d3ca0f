//! # Apply Phase
//!
//! Turns planned poses into scene commands. All three placers go through
//! [`Applier`], which owns the lazily created container, tracks created
//! nodes in a [`NodeScope`] and reports diagnostics to the scene sinks.

use glam::DMat3;
use instancer_kernel::Vec3;

use crate::diagnostic::{Diagnostic, PlacementOutcome, Severity};
use crate::error::{PlacementError, PlacementResult};
use crate::scene::{NodeId, NodeScope, SceneGraph};

/// Target world pose of one instance.
///
/// `None` fields leave whatever the instance inherited from its template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Option<DMat3>,
    pub scale: Option<Vec3>,
}

impl Pose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: None,
            scale: None,
        }
    }

    pub fn with_rotation(mut self, rotation: DMat3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// Optional container that groups every instance of one call.
#[derive(Debug, Clone, Default)]
pub(crate) struct Grouping {
    /// Name handed to the scene; `None` disables grouping.
    pub name: Option<String>,
    /// Where the container itself is attached.
    pub parent: Option<NodeId>,
}

impl Grouping {
    /// Grouping from a user-supplied name; blank names fall back to the
    /// default pattern.
    pub fn from_request(name: Option<&str>, parent: Option<NodeId>) -> Self {
        let name = name.map(|n| {
            let trimmed = n.trim();
            if trimmed.is_empty() {
                config::constants::DEFAULT_GROUP_NAME.to_string()
            } else {
                trimmed.to_string()
            }
        });
        Self { name, parent }
    }
}

/// Issues create/parent/transform commands for one placement call.
pub(crate) struct Applier<'s, S: SceneGraph + ?Sized> {
    scope: NodeScope<'s, S>,
    grouping: Grouping,
    group: Option<NodeId>,
    placed: Vec<NodeId>,
}

impl<'s, S: SceneGraph + ?Sized> Applier<'s, S> {
    pub fn new(scene: &'s mut S, grouping: Grouping) -> Self {
        Self {
            scope: NodeScope::new(scene),
            grouping,
            group: None,
            placed: Vec::new(),
        }
    }

    pub fn scene(&mut self) -> &mut S {
        self.scope.scene()
    }

    /// The container, created on first use.
    fn group(&mut self) -> PlacementResult<Option<NodeId>> {
        if self.group.is_some() {
            return Ok(self.group.clone());
        }
        let Some(name) = self.grouping.name.clone() else {
            return Ok(None);
        };
        let mut group = self.scope.create_empty_group(Some(&name))?;
        if let Some(parent) = self.grouping.parent.clone() {
            if self.scope.scene().exists(&parent) {
                group = self.scope.reparent(&group, &parent)?;
            }
        }
        tracing::debug!(group = %group, "created instance container");
        self.group = Some(group.clone());
        Ok(Some(group))
    }

    /// Attaches `node` to the container if grouping, else to `direct_parent`.
    pub fn attach(&mut self, node: NodeId, direct_parent: Option<&NodeId>) -> PlacementResult<NodeId> {
        if let Some(group) = self.group()? {
            return Ok(self.scope.reparent(&node, &group)?);
        }
        match direct_parent {
            Some(parent) if self.scope.scene().exists(parent) => {
                Ok(self.scope.reparent(&node, parent)?)
            }
            _ => Ok(node),
        }
    }

    /// Writes a pose: world position, then world rotation, then local scale.
    pub fn apply_pose(&mut self, node: &NodeId, pose: &Pose) -> PlacementResult<()> {
        let scene = self.scope.scene();
        scene.set_world_position(node, pose.position)?;
        if let Some(rotation) = pose.rotation {
            scene.set_world_rotation(node, rotation)?;
        }
        if let Some(scale) = pose.scale {
            scene.set_local_scale(node, scale)?;
        }
        Ok(())
    }

    /// Instances `template`, attaches it and applies `pose`.
    pub fn place(
        &mut self,
        template: &NodeId,
        pose: &Pose,
        direct_parent: Option<&NodeId>,
    ) -> PlacementResult<NodeId> {
        let node = self.scope.create_instance(template)?;
        let node = self.attach(node, direct_parent)?;
        self.apply_pose(&node, pose)?;
        self.placed.push(node.clone());
        Ok(node)
    }

    /// Creates a node through `create` and records it as placed output.
    pub fn place_with(
        &mut self,
        create: impl FnOnce(&mut NodeScope<'s, S>) -> Result<NodeId, crate::scene::SceneError>,
        pose: &Pose,
        direct_parent: Option<&NodeId>,
    ) -> PlacementResult<NodeId> {
        let node = create(&mut self.scope)?;
        let node = self.attach(node, direct_parent)?;
        self.apply_pose(&node, pose)?;
        self.placed.push(node.clone());
        Ok(node)
    }

    /// Helper-node access for placers that build intermediate transforms.
    pub fn scope(&mut self) -> &mut NodeScope<'s, S> {
        &mut self.scope
    }

    /// Records a node created outside [`Applier::place`] as output.
    pub fn record(&mut self, node: NodeId) {
        self.placed.push(node);
    }

    /// Keeps everything and reports diagnostics.
    pub fn finish(mut self, diagnostics: Vec<Diagnostic>) -> PlacementOutcome {
        report(self.scope.scene(), &diagnostics);
        let nodes = std::mem::take(&mut self.placed);
        self.scope.commit();
        PlacementOutcome { nodes, diagnostics }
    }
}

/// Forwards each diagnostic to the scene sink matching its severity.
pub(crate) fn report<S: SceneGraph + ?Sized>(scene: &mut S, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.severity {
            Severity::Warning => scene.warn(&diagnostic.message),
            Severity::Error => scene.fail(&diagnostic.message),
        }
    }
}

/// Reports a fatal error to the scene and hands it back.
pub(crate) fn fail<S: SceneGraph + ?Sized>(scene: &mut S, err: PlacementError) -> PlacementError {
    report(scene, &[Diagnostic::error(err.to_string())]);
    err
}

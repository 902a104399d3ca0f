//! # Selection Adapters
//!
//! Resolve the host's ordered selection into explicit node lists before a
//! placer is called. The placers themselves never look at the selection.

use crate::error::{PlacementError, PlacementResult};
use crate::scene::{NodeId, SceneGraph};

/// Linear anchors: `(parent, child)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSelection {
    pub parent: Option<NodeId>,
    pub child: NodeId,
}

/// Chain inputs: optional template and the waypoint set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSelection {
    pub template: Option<NodeId>,
    pub waypoints: Vec<NodeId>,
}

/// Radial inputs: `(base, target)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadialSelection {
    pub base: NodeId,
    pub target: NodeId,
}

/// Parent first, child second. A single selected node is the child.
pub fn resolve_linear<S: SceneGraph + ?Sized>(scene: &S) -> PlacementResult<LinearSelection> {
    let selection = scene.selection();
    match selection.as_slice() {
        [] => Err(PlacementError::missing(
            "select a parent then a child, or only a child for count-from-size mode",
        )),
        [child] => Ok(LinearSelection {
            parent: None,
            child: child.clone(),
        }),
        [parent, child, ..] => Ok(LinearSelection {
            parent: (parent != child).then(|| parent.clone()),
            child: child.clone(),
        }),
    }
}

/// Template first, then at least two waypoints. In fill mode the whole
/// selection is waypoints.
pub fn resolve_chain<S: SceneGraph + ?Sized>(scene: &S, fill: bool) -> PlacementResult<ChainSelection> {
    let selection = scene.selection();
    if fill {
        if selection.len() < 2 {
            return Err(PlacementError::InsufficientInput {
                operation: "chain fill selection",
                required: 2,
                found: selection.len(),
            });
        }
        return Ok(ChainSelection {
            template: None,
            waypoints: selection,
        });
    }
    match selection.split_first() {
        Some((template, waypoints)) if waypoints.len() >= 2 => Ok(ChainSelection {
            template: Some(template.clone()),
            waypoints: waypoints.to_vec(),
        }),
        _ => Err(PlacementError::InsufficientInput {
            operation: "chain selection",
            required: 3,
            found: selection.len(),
        }),
    }
}

/// Base first, target second.
pub fn resolve_radial<S: SceneGraph + ?Sized>(scene: &S) -> PlacementResult<RadialSelection> {
    match scene.selection().as_slice() {
        [base, target, ..] => Ok(RadialSelection {
            base: base.clone(),
            target: target.clone(),
        }),
        other => Err(PlacementError::missing(format!(
            "select a base then a target ({} selected)",
            other.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;
    use instancer_kernel::Vec3;

    fn scene_with_selection(names: &[&str]) -> MemoryScene {
        let mut scene = MemoryScene::new();
        let ids = names
            .iter()
            .map(|n| scene.add_node(n, Vec3::ZERO))
            .collect();
        scene.set_selection(ids);
        scene
    }

    #[test]
    fn linear_takes_parent_then_child() {
        let scene = scene_with_selection(&["start", "end"]);
        let sel = resolve_linear(&scene).unwrap();
        assert_eq!(sel.parent, Some(NodeId::new("start")));
        assert_eq!(sel.child, NodeId::new("end"));
    }

    #[test]
    fn linear_single_selection_is_child() {
        let scene = scene_with_selection(&["end"]);
        let sel = resolve_linear(&scene).unwrap();
        assert_eq!(sel.parent, None);
        assert_eq!(sel.child, NodeId::new("end"));

        let empty = MemoryScene::new();
        assert!(matches!(resolve_linear(&empty), Err(PlacementError::MissingInput(_))));
    }

    #[test]
    fn chain_splits_template_from_waypoints() {
        let scene = scene_with_selection(&["tpl", "a", "b", "c"]);

        let sel = resolve_chain(&scene, false).unwrap();
        assert_eq!(sel.template, Some(NodeId::new("tpl")));
        assert_eq!(sel.waypoints.len(), 3);

        let fill = resolve_chain(&scene, true).unwrap();
        assert_eq!(fill.template, None);
        assert_eq!(fill.waypoints.len(), 4);
    }

    #[test]
    fn chain_needs_enough_nodes() {
        let scene = scene_with_selection(&["tpl", "a"]);
        assert!(matches!(
            resolve_chain(&scene, false),
            Err(PlacementError::InsufficientInput { required: 3, found: 2, .. })
        ));
        assert!(resolve_chain(&scene, true).is_ok());
    }

    #[test]
    fn radial_needs_two_nodes() {
        let scene = scene_with_selection(&["base"]);
        assert!(matches!(resolve_radial(&scene), Err(PlacementError::MissingInput(_))));

        let scene = scene_with_selection(&["base", "petal"]);
        let sel = resolve_radial(&scene).unwrap();
        assert_eq!(sel.target, NodeId::new("petal"));
    }
}

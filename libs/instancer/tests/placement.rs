//! End-to-end placement against the in-memory scene.

use approx::assert_abs_diff_eq;
use instancer::preferences::{ArrayPreferences, ChainPreferences, RadialPreferences, SpecMode};
use instancer::{
    place_chain, place_linear, place_radial, resolve_chain, resolve_linear, resolve_radial,
    ChainRequest, FillOptions, LinearArrayRequest, MemoryScene, NodeId, PlacementError,
    PlacementSpec, SceneGraph,
};
use instancer_kernel::{Axis, Vec3};

fn positions(scene: &MemoryScene, nodes: &[NodeId]) -> Vec<Vec3> {
    nodes
        .iter()
        .map(|n| scene.world_position(n).expect("placed node exists"))
        .collect()
}

fn assert_close(actual: &[Vec3], expected: &[Vec3]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!((*a - *e).length(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn linear_from_selection_and_preferences() {
    let mut scene = MemoryScene::new();
    let start = scene.add_node("start", Vec3::ZERO);
    let end = scene.add_node("end", Vec3::new(0.0, 0.0, 10.0));
    scene.set_selection(vec![start.clone(), end]);

    let selection = resolve_linear(&scene).expect("two nodes selected");
    let prefs = ArrayPreferences {
        count: 4,
        include_end: true,
        ..Default::default()
    };
    let request = prefs.to_request(selection.parent, selection.child);

    let outcome = place_linear(&mut scene, &request).expect("placement succeeds");

    assert_close(
        &positions(&scene, &outcome.nodes),
        &[
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, 6.0),
            Vec3::new(0.0, 0.0, 8.0),
            Vec3::new(0.0, 0.0, 10.0),
        ],
    );
    for node in &outcome.nodes {
        assert_eq!(scene.parent_of(node).as_ref(), Some(&start));
    }
}

#[test]
fn linear_spacing_stops_before_child() {
    let mut scene = MemoryScene::new();
    let start = scene.add_node("start", Vec3::ZERO);
    let end = scene.add_node("end", Vec3::new(10.0, 0.0, 0.0));
    let prefs = ArrayPreferences {
        mode: SpecMode::Spacing,
        spacing: 2.5,
        ..Default::default()
    };

    let outcome = place_linear(&mut scene, &prefs.to_request(Some(start), end)).expect("placement succeeds");

    let xs: Vec<f64> = positions(&scene, &outcome.nodes).iter().map(|p| p.x).collect();
    assert_eq!(xs.len(), 3);
    for (x, want) in xs.iter().zip([2.5, 5.0, 7.5]) {
        assert_abs_diff_eq!(*x, want, epsilon = 1e-9);
    }
}

#[test]
fn repeated_runs_produce_identical_poses() {
    let mut scene = MemoryScene::new();
    let start = scene.add_node("start", Vec3::new(1.0, 2.0, 3.0));
    let end = scene.add_node("end", Vec3::new(-4.0, 0.5, 7.0));
    let request = LinearArrayRequest::new(Some(start), end, PlacementSpec::FixedCount(6));

    let first = place_linear(&mut scene, &request).expect("first run");
    let second = place_linear(&mut scene, &request).expect("second run");

    assert_eq!(first.len(), second.len());
    assert_close(&positions(&scene, &first.nodes), &positions(&scene, &second.nodes));
    assert!(first.nodes.iter().all(|n| !second.nodes.contains(n)));
}

#[test]
fn alternating_scale_mirrors_every_other_instance() {
    let mut scene = MemoryScene::new();
    let start = scene.add_node("start", Vec3::ZERO);
    let end = scene.add_node("end", Vec3::new(5.0, 0.0, 0.0));
    let mut request = LinearArrayRequest::new(Some(start), end, PlacementSpec::FixedCount(4));
    request.alternate_scale = Some(Axis::Z);

    let outcome = place_linear(&mut scene, &request).expect("placement succeeds");

    let z_scales: Vec<f64> = outcome
        .nodes
        .iter()
        .map(|n| scene.local_scale(n).expect("scale").z)
        .collect();
    assert_eq!(z_scales, vec![1.0, -1.0, 1.0, -1.0]);
}

#[test]
fn chain_orders_unsorted_waypoints() {
    let mut scene = MemoryScene::new();
    let template = scene.add_node("bead", Vec3::ZERO);
    let c = scene.add_node("c", Vec3::new(6.0, 0.0, 0.0));
    let a = scene.add_node("a", Vec3::new(0.0, 0.0, 0.0));
    let b = scene.add_node("b", Vec3::new(3.0, 0.0, 0.0));
    scene.set_selection(vec![template, c, a, b]);

    let selection = resolve_chain(&scene, false).expect("template and waypoints selected");
    let prefs = ChainPreferences {
        per_segment: 2,
        ..Default::default()
    };
    let request = prefs.to_request(selection.template, selection.waypoints);
    let outcome = place_chain(&mut scene, &request).expect("placement succeeds");

    let mut xs: Vec<f64> = positions(&scene, &outcome.nodes).iter().map(|p| p.x).collect();
    xs.sort_by(f64::total_cmp);
    assert_eq!(xs.len(), 4);
    for (x, want) in xs.iter().zip([1.0, 2.0, 4.0, 5.0]) {
        assert_abs_diff_eq!(*x, want, epsilon = 1e-9);
    }
}

#[test]
fn chain_fill_closes_gap_between_boxes() {
    let mut scene = MemoryScene::new();
    let left = scene.add_box("left", Vec3::ZERO, Vec3::ONE);
    let right = scene.add_box("right", Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
    let request = ChainRequest::fill(
        vec![left, right],
        FillOptions {
            divisions: 1,
            alternate_axis: None,
        },
    );

    let outcome = place_chain(&mut scene, &request).expect("placement succeeds");

    assert_eq!(outcome.len(), 1);
    let node = &outcome.nodes[0];
    assert_close(&positions(&scene, &outcome.nodes), &[Vec3::new(2.5, 0.0, 0.0)]);
    let bounds = scene
        .world_matrix(node)
        .map(|m| instancer_kernel::LocalBounds::unit_cube().to_world(&m))
        .expect("box has a matrix");
    let xs: Vec<f64> = bounds.corners.iter().map(|c| c.x).collect();
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert_abs_diff_eq!(min, 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(max, 4.5, epsilon = 1e-9);
}

#[test]
fn radial_from_preferences_places_ring() {
    let mut scene = MemoryScene::new();
    let base = scene.add_node("base", Vec3::ZERO);
    let petal = scene.add_node("petal", Vec3::new(0.0, 0.0, 3.0));
    scene.set_selection(vec![base, petal]);

    let selection = resolve_radial(&scene).expect("base and target selected");
    let prefs = RadialPreferences {
        count: 4,
        ..Default::default()
    };
    let outcome = place_radial(&mut scene, &prefs.to_request(selection.base, selection.target))
        .expect("placement succeeds");

    assert_close(
        &positions(&scene, &outcome.nodes),
        &[
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -3.0),
            Vec3::new(-3.0, 0.0, 0.0),
        ],
    );
}

#[test]
fn rejected_command_leaves_scene_untouched() {
    let mut scene = MemoryScene::new();
    let template = scene.add_node("bead", Vec3::ZERO);
    let a = scene.add_node("a", Vec3::ZERO);
    let b = scene.add_node("b", Vec3::new(4.0, 0.0, 0.0));
    let mut request = ChainRequest::new(template, vec![a, b]);
    request.spec = PlacementSpec::FixedCount(3);
    request.group_name = Some("links#".to_string());
    scene.reject("parent");

    let err = place_chain(&mut scene, &request).unwrap_err();

    assert!(matches!(err, PlacementError::Scene(_)));
    assert_eq!(scene.len(), 3);
    assert_eq!(scene.failures().len(), 1);
}

//! Tests for radial planning and pivot application.

use super::*;
use crate::scene::MemoryScene;
use approx::assert_abs_diff_eq;
use instancer_kernel::rotation_about;

fn snap(name: &str, position: Vec3) -> TransformSnapshot {
    TransformSnapshot::from_trs(NodeId::new(name), position, DMat3::IDENTITY, Vec3::ONE)
}

fn assert_vec_eq(actual: Vec3, expected: Vec3) {
    assert_abs_diff_eq!((actual - expected).length(), 0.0, epsilon = 1e-9);
}

#[test]
fn four_steps_about_y_are_quarter_turns() {
    let base = snap("base", Vec3::ZERO);
    let target = snap("petal", Vec3::new(2.0, 0.0, 0.0));
    let request = RadialRequest::new(base.node.clone(), target.node.clone(), 4);

    let plan = plan_radial(&request, &base, &target).unwrap();

    let angles: Vec<f64> = plan.steps.iter().map(|s| s.angle_degrees).collect();
    assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);
    let expected = [
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -2.0),
        Vec3::new(-2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
    ];
    for (step, want) in plan.steps.iter().zip(expected) {
        assert_vec_eq(step.instance_position, want);
    }
    for (step, angle) in plan.steps.iter().zip(angles) {
        assert!(step.rotation.abs_diff_eq(rotation_about(Axis::Y, angle), 1e-9));
    }
}

#[test]
fn step_angle_replaces_base_angle_about_axis() {
    let yawed = rotation_about(Axis::Y, 30.0);
    let base = TransformSnapshot::from_trs(NodeId::new("base"), Vec3::ZERO, yawed, Vec3::ONE);
    let target = snap("petal", Vec3::new(2.0, 0.0, 0.0));
    let request = RadialRequest::new(base.node.clone(), target.node.clone(), 4);

    let plan = plan_radial(&request, &base, &target).unwrap();

    for step in &plan.steps {
        assert!(step.initial_rotation.abs_diff_eq(yawed, 1e-12));
        assert!(step
            .rotation
            .abs_diff_eq(rotation_about(Axis::Y, step.angle_degrees), 1e-9));
    }
    // The first pivot undoes the base's yaw, so the petal is swung back by
    // 30 degrees around the base.
    let back = rotation_about(Axis::Y, -30.0) * Vec3::new(2.0, 0.0, 0.0);
    assert_vec_eq(plan.steps[0].instance_position, back);
}

#[test]
fn instances_turn_with_their_pivot() {
    let base = snap("base", Vec3::ZERO);
    let tilted = rotation_about(Axis::X, 15.0);
    let target = TransformSnapshot::from_trs(NodeId::new("petal"), Vec3::Z, tilted, Vec3::ONE);
    let request = RadialRequest::new(base.node.clone(), target.node.clone(), 2);

    let plan = plan_radial(&request, &base, &target).unwrap();

    assert!(plan.steps[0].instance_rotation.abs_diff_eq(tilted, 1e-9));
    let half_turn = rotation_about(Axis::Y, 180.0) * tilted;
    assert!(plan.steps[1].instance_rotation.abs_diff_eq(half_turn, 1e-9));
}

#[test]
fn pivots_are_numbered() {
    let base = snap("base", Vec3::ZERO);
    let target = snap("petal", Vec3::X);
    let request = RadialRequest::new(base.node.clone(), target.node.clone(), 3);

    let plan = plan_radial(&request, &base, &target).unwrap();

    let names: Vec<&str> = plan.steps.iter().map(|s| s.pivot_name.as_str()).collect();
    assert_eq!(names, ["circle_null_00", "circle_null_01", "circle_null_02"]);
}

#[test]
fn radius_offsets_along_base_local_axis() {
    let turned = rotation_about(Axis::Z, 90.0);
    let base = TransformSnapshot::from_trs(NodeId::new("base"), Vec3::new(1.0, 0.0, 0.0), turned, Vec3::ONE);
    let target = snap("petal", Vec3::new(1.0, 0.0, 0.0));
    let mut request = RadialRequest::new(base.node.clone(), target.node.clone(), 2);
    request.axis = Axis::Y;
    request.radius = 3.0;

    let plan = plan_radial(&request, &base, &target).unwrap();

    // Local Y of the base points along world -X.
    assert_vec_eq(plan.steps[0].pivot_position, Vec3::new(-2.0, 0.0, 0.0));
    // The target sits 3 units back along the spin axis, so it stays on it.
    assert_vec_eq(plan.steps[1].instance_position, Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn zero_or_runaway_count_and_bad_radius_are_invalid() {
    let base = snap("base", Vec3::ZERO);
    let target = snap("petal", Vec3::X);

    let request = RadialRequest::new(base.node.clone(), target.node.clone(), 0);
    assert!(matches!(
        plan_radial(&request, &base, &target),
        Err(PlacementError::InvalidParameter(_))
    ));

    let request = RadialRequest::new(base.node.clone(), target.node.clone(), u32::MAX);
    assert!(matches!(
        plan_radial(&request, &base, &target),
        Err(PlacementError::InvalidParameter(_))
    ));

    let mut request = RadialRequest::new(base.node.clone(), target.node.clone(), 4);
    request.radius = f64::NAN;
    assert!(matches!(
        plan_radial(&request, &base, &target),
        Err(PlacementError::InvalidParameter(_))
    ));
}

#[test]
fn default_request_uses_eight_steps_about_y() {
    let request = RadialRequest::default();
    assert_eq!(request.count, 8);
    assert_eq!(request.axis, Axis::Y);
}

#[test]
fn place_builds_pivots_that_carry_instances() {
    let mut scene = MemoryScene::new();
    let base = scene.add_node("base", Vec3::new(0.0, 1.0, 0.0));
    let target = scene.add_node("petal", Vec3::new(2.0, 1.0, 0.0));
    let mut request = RadialRequest::new(base, target, 4);
    request.group_name = Some("flower#".to_string());

    let outcome = place_radial(&mut scene, &request).unwrap();

    assert_eq!(outcome.len(), 4);
    let expected = [
        Vec3::new(2.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, -2.0),
        Vec3::new(-2.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 2.0),
    ];
    let mut group = None;
    for (node, want) in outcome.nodes.iter().zip(expected) {
        assert_vec_eq(scene.world_position(node).unwrap(), want);
        let pivot = scene.parent_of(node).unwrap();
        assert!(pivot.as_str().starts_with("circle_null_"));
        let pivot_group = scene.parent_of(&pivot).unwrap();
        assert!(pivot_group.as_str().starts_with("flower"));
        group.get_or_insert(pivot_group.clone());
        assert_eq!(group.as_ref(), Some(&pivot_group));
    }
}

#[test]
fn place_with_missing_nodes_fails_cleanly() {
    let mut scene = MemoryScene::new();
    let base = scene.add_node("base", Vec3::ZERO);
    let request = RadialRequest::new(base, NodeId::new("petal"), 4);

    let err = place_radial(&mut scene, &request).unwrap_err();

    assert!(matches!(err, PlacementError::MissingInput(_)));
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.failures().len(), 1);
}

#[test]
fn rejected_instance_removes_pivots() {
    let mut scene = MemoryScene::new();
    let base = scene.add_node("base", Vec3::ZERO);
    let target = scene.add_node("petal", Vec3::X);
    scene.reject("create_instance");

    let err = place_radial(&mut scene, &RadialRequest::new(base, target, 3)).unwrap_err();

    assert!(matches!(err, PlacementError::Scene(_)));
    assert_eq!(scene.len(), 2);
}

use super::*;

#[test]
fn parses_all_labels_case_insensitively() {
    assert_eq!("x".parse::<Axis>().unwrap(), Axis::X);
    assert_eq!("Y".parse::<Axis>().unwrap(), Axis::Y);
    assert_eq!("z\n".parse::<Axis>().unwrap(), Axis::Z);
}

#[test]
fn rejects_unknown_label() {
    let err = "up".parse::<Axis>().unwrap_err();
    assert_eq!(err, AxisParseError("up".to_string()));
    assert!(err.to_string().contains("up"));
}

#[test]
fn index_matches_unit_vector() {
    for axis in Axis::ALL {
        assert_eq!(axis.unit()[axis.index()], 1.0);
        assert_eq!(axis.label().parse::<Axis>().unwrap(), axis);
    }
}

#[test]
fn negate_component_leaves_other_axes() {
    let v = Vec3::new(2.0, -3.0, 4.0);
    assert_eq!(Axis::X.negate_component(v), Vec3::new(-2.0, -3.0, 4.0));
    assert_eq!(Axis::Z.negate_component(v), Vec3::new(2.0, -3.0, -4.0));
}

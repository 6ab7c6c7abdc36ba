use super::*;

#[test]
fn rgba_serializes_as_array() {
    let c = Rgba::new(1.0, 0.5, 0.25, 1.0);
    let s = serde_json::to_string(&c).unwrap();
    assert_eq!(s, "[1.0,0.5,0.25,1.0]");
    let back: Rgba = serde_json::from_str(&s).unwrap();
    assert_eq!(back, c);
}

#[test]
fn rgba_finiteness() {
    assert!(Rgba::WHITE.is_finite());
    assert!(!Rgba::new(f32::NAN, 0.0, 0.0, 1.0).is_finite());
}

#[test]
fn euler_deg_single_axis_matches_axis_angle() {
    let q = quat_from_euler_deg(Vec3::new(0.0, 90.0, 0.0));
    let expected = Quat::from_rotation_y(90f32.to_radians());
    assert!(q.abs_diff_eq(expected, 1e-6), "{q:?} != {expected:?}");

    let back = quat_to_euler_deg(q);
    assert!((back.y - 90.0).abs() < 1e-3);
}

#[test]
fn ensure_finite_rejects_nan() {
    assert!(ensure_finite("x", 1.0).is_ok());
    assert!(matches!(
        ensure_finite("x", f32::INFINITY),
        Err(CalamityError::Configuration(_))
    ));
    assert!(ensure_finite_vec3("v", Vec3::new(0.0, f32::NAN, 0.0)).is_err());
}

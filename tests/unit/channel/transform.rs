use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{scene::model::SceneNode, subject};

fn node_at(position: Vec3, rotation: Quat, scale: Vec3) -> Rc<RefCell<SceneNode>> {
    Rc::new(RefCell::new(SceneNode {
        position,
        rotation,
        scale,
        writes: 0,
    }))
}

fn channel_for(node: &Rc<RefCell<SceneNode>>, target: TransformTarget) -> TransformChannel {
    let mut ch = TransformChannel::new(subject::spatial("tower", node), target);
    ch.setup().unwrap();
    ch
}

#[test]
fn zero_progress_reproduces_baseline() {
    let rot = Quat::from_rotation_y(0.4);
    let node = node_at(Vec3::new(1.0, 2.0, 3.0), rot, Vec3::splat(2.0));
    let target = TransformTarget::new(Vec3::new(5.0, -1.0, 0.0))
        .with_rotation_euler_deg(Vec3::new(0.0, 0.0, 30.0))
        .with_scale_factor(0.5);
    let mut ch = channel_for(&node, target);

    ch.apply_progress(0.0).unwrap();
    let n = node.borrow();
    assert_eq!(n.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(n.rotation, rot);
    assert_eq!(n.scale, Vec3::splat(2.0));
}

#[test]
fn full_progress_reaches_target_without_overshoot() {
    let rot = Quat::from_rotation_x(0.25);
    let node = node_at(Vec3::ZERO, rot, Vec3::ONE);
    let delta = Quat::from_rotation_z(1.0);
    let target = TransformTarget::new(Vec3::new(0.0, -4.0, 0.0))
        .with_rotation(delta)
        .with_scale_factors(Vec3::new(1.0, 0.25, 1.0));
    let mut ch = channel_for(&node, target);
    let expected_rotation = ch.target_rotation().unwrap();
    assert!(expected_rotation.abs_diff_eq(rot * delta, 1e-6));

    for p in [1.0, 1.5, 20.0] {
        ch.apply_progress(p).unwrap();
        let n = node.borrow();
        assert_eq!(n.position, Vec3::new(0.0, -4.0, 0.0));
        assert_eq!(n.rotation, expected_rotation);
        assert_eq!(n.scale, Vec3::new(1.0, 0.25, 1.0));
    }
}

#[test]
fn negative_progress_holds_baseline() {
    let node = node_at(Vec3::X, Quat::IDENTITY, Vec3::ONE);
    let mut ch = channel_for(&node, TransformTarget::new(Vec3::Y).with_scale_factor(3.0));
    ch.apply_progress(-0.5).unwrap();
    let n = node.borrow();
    assert_eq!(n.position, Vec3::X);
    assert_eq!(n.scale, Vec3::ONE);
}

#[test]
fn rotation_is_relative_to_baseline() {
    let base = Quat::from_rotation_y(90f32.to_radians());
    let node = node_at(Vec3::ZERO, base, Vec3::ONE);
    let target = TransformTarget::new(Vec3::ZERO)
        .with_rotation_euler_deg(Vec3::new(0.0, 90.0, 0.0));
    let mut ch = channel_for(&node, target);

    ch.apply_progress(1.0).unwrap();
    let got = node.borrow().rotation;
    let expected = Quat::from_rotation_y(180f32.to_radians());
    assert!(got.angle_between(expected) < 1e-4);
}

#[test]
fn rotation_takes_shorter_arc() {
    let node = node_at(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
    let target = TransformTarget::new(Vec3::ZERO)
        .with_rotation(Quat::from_rotation_y(300f32.to_radians()));
    let mut ch = channel_for(&node, target);

    ch.apply_progress(0.5).unwrap();
    let mid = node.borrow().rotation;
    // 300 degrees one way is 60 degrees the other; halfway is 30.
    let angle = Quat::IDENTITY.angle_between(mid).to_degrees();
    assert!((angle - 30.0).abs() < 1e-2, "angle = {angle}");
}

#[test]
fn pose_is_written_in_one_call_then_scale() {
    let node = node_at(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
    let mut ch = channel_for(&node, TransformTarget::new(Vec3::ONE));
    ch.apply_progress(0.5).unwrap();
    assert_eq!(node.borrow().writes, 2);
}

#[test]
fn apply_before_setup_is_a_usage_error() {
    let node = node_at(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
    let handle = subject::spatial("tower", &node);
    let mut ch = TransformChannel::new(handle, TransformTarget::new(Vec3::ONE));
    assert!(matches!(ch.apply_progress(0.5), Err(CalamityError::Usage(_))));
    assert!(matches!(ch.ensure_ready(), Err(CalamityError::Usage(_))));
    assert_eq!(node.borrow().writes, 0);
}

#[test]
fn setup_rejects_dead_subject_and_bad_targets() {
    let node = node_at(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
    let handle = subject::spatial("ghost", &node);
    drop(node);
    let mut ch = TransformChannel::new(handle, TransformTarget::new(Vec3::ONE));
    assert!(matches!(ch.setup(), Err(CalamityError::Configuration(_))));

    let node = node_at(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
    let bad = TransformTarget::new(Vec3::new(f32::NAN, 0.0, 0.0));
    let mut ch = TransformChannel::new(subject::spatial("tower", &node), bad);
    assert!(matches!(ch.setup(), Err(CalamityError::Configuration(_))));
    assert!(!ch.is_set_up());
}

#[test]
fn second_setup_is_a_usage_error() {
    let node = node_at(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
    let mut ch = channel_for(&node, TransformTarget::new(Vec3::ONE));
    assert!(matches!(ch.setup(), Err(CalamityError::Usage(_))));
}

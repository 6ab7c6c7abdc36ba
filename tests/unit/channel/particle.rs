use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{foundation::error::CalamityError, scene::model::ParticleEmitter, subject};

fn setup_channel(
    emitter: &Rc<RefCell<ParticleEmitter>>,
    target: ParticleTarget,
) -> ParticleChannel {
    let mut ch = ParticleChannel::new(subject::emitter("embers", emitter), target);
    ch.setup().unwrap();
    ch
}

const TARGET: ParticleTarget = ParticleTarget {
    speed_multiplier: 4.0,
    gravity_multiplier: -1.0,
};

#[test]
fn endpoints_are_exact() {
    let emitter = Rc::new(RefCell::new(ParticleEmitter {
        speed_multiplier: 1.0,
        gravity_multiplier: 0.3,
    }));
    let mut ch = setup_channel(&emitter, TARGET);

    ch.apply_progress(0.0).unwrap();
    assert_eq!(emitter.borrow().speed_multiplier, 1.0);
    assert_eq!(emitter.borrow().gravity_multiplier, 0.3);

    ch.apply_progress(1.0).unwrap();
    assert_eq!(emitter.borrow().speed_multiplier, 4.0);
    assert_eq!(emitter.borrow().gravity_multiplier, -1.0);

    ch.apply_progress(3.0).unwrap();
    assert_eq!(emitter.borrow().speed_multiplier, 4.0);
}

#[test]
fn speed_is_monotonic() {
    let emitter = Rc::new(RefCell::new(ParticleEmitter::default()));
    let mut ch = setup_channel(&emitter, TARGET);

    let mut last = f32::NEG_INFINITY;
    for i in 0..=20 {
        ch.apply_progress(f64::from(i) / 20.0).unwrap();
        let v = emitter.borrow().speed_multiplier;
        assert!(v >= last, "{v} < {last} at step {i}");
        last = v;
    }
}

#[test]
fn halfway_is_the_midpoint() {
    let emitter = Rc::new(RefCell::new(ParticleEmitter::default()));
    let mut ch = setup_channel(&emitter, TARGET);
    ch.apply_progress(0.5).unwrap();
    assert_eq!(emitter.borrow().speed_multiplier, 2.5);
    assert_eq!(emitter.borrow().gravity_multiplier, -0.5);
}

#[test]
fn apply_before_setup_is_a_usage_error() {
    let emitter = Rc::new(RefCell::new(ParticleEmitter::default()));
    let mut ch = ParticleChannel::new(subject::emitter("embers", &emitter), TARGET);
    assert!(matches!(ch.apply_progress(1.0), Err(CalamityError::Usage(_))));
    assert_eq!(*emitter.borrow(), ParticleEmitter::default());
}

#[test]
fn non_finite_target_fails_setup() {
    let emitter = Rc::new(RefCell::new(ParticleEmitter::default()));
    let target = ParticleTarget {
        speed_multiplier: f32::NAN,
        gravity_multiplier: 0.0,
    };
    let mut ch = ParticleChannel::new(subject::emitter("embers", &emitter), target);
    assert!(matches!(ch.setup(), Err(CalamityError::Configuration(_))));
}

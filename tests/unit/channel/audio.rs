use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{scene::model::AudioSource, subject};

fn setup_channel(source: &Rc<RefCell<AudioSource>>, target: f32) -> AudioChannel {
    let mut ch = AudioChannel::new(subject::audio("ambience", source), target);
    ch.setup().unwrap();
    ch
}

#[test]
fn fades_between_baseline_and_target() {
    let source = Rc::new(RefCell::new(AudioSource { volume: 1.0 }));
    let mut ch = setup_channel(&source, 0.0);

    ch.apply_progress(0.0).unwrap();
    assert_eq!(source.borrow().volume, 1.0);
    ch.apply_progress(0.5).unwrap();
    assert_eq!(source.borrow().volume, 0.5);
    ch.apply_progress(1.0).unwrap();
    assert_eq!(source.borrow().volume, 0.0);
    ch.apply_progress(2.0).unwrap();
    assert_eq!(source.borrow().volume, 0.0);
}

#[test]
fn fade_out_is_monotonic() {
    let source = Rc::new(RefCell::new(AudioSource { volume: 0.9 }));
    let mut ch = setup_channel(&source, 0.1);
    let mut last = f32::INFINITY;
    for i in 0..=32 {
        ch.apply_progress(f64::from(i) / 32.0).unwrap();
        let v = source.borrow().volume;
        assert!(v <= last);
        last = v;
    }
}

#[test]
fn repeated_progress_is_idempotent() {
    let source = Rc::new(RefCell::new(AudioSource { volume: 0.7 }));
    let mut ch = setup_channel(&source, 0.2);
    ch.apply_progress(0.3).unwrap();
    let first = source.borrow().volume;
    ch.apply_progress(0.9).unwrap();
    ch.apply_progress(0.3).unwrap();
    assert_eq!(source.borrow().volume, first);
}

#[test]
fn negative_target_is_rejected() {
    let source = Rc::new(RefCell::new(AudioSource::default()));
    let mut ch = AudioChannel::new(subject::audio("ambience", &source), -0.5);
    assert!(matches!(ch.setup(), Err(CalamityError::Configuration(_))));
}

#[test]
fn dropped_subject_after_setup_is_a_subject_error() {
    let source = Rc::new(RefCell::new(AudioSource::default()));
    let mut ch = setup_channel(&source, 0.0);
    drop(source);
    assert!(!ch.is_bound());
    assert!(matches!(ch.ensure_ready(), Err(CalamityError::Subject(_))));
    assert!(matches!(ch.apply_progress(0.5), Err(CalamityError::Subject(_))));
}

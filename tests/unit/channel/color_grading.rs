use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{
    scene::{model::ColorGradingVolume, registry::Scene},
    subject,
};

const TARGET: ColorGradingTarget = ColorGradingTarget {
    temperature: 60.0,
    color_filter: Rgba::new(1.0, 0.4, 0.2, 1.0),
};

#[test]
fn endpoints_and_midpoint() {
    let volume = Rc::new(RefCell::new(ColorGradingVolume::default()));
    let mut ch = ColorGradingChannel::new(subject::color_grading("grading", &volume), TARGET);
    ch.setup().unwrap();

    ch.apply_progress(0.0).unwrap();
    assert_eq!(*volume.borrow(), ColorGradingVolume::default());

    ch.apply_progress(0.5).unwrap();
    assert_eq!(volume.borrow().temperature, 30.0);
    assert_eq!(volume.borrow().color_filter, Rgba::new(1.0, 0.7, 0.6, 1.0));

    ch.apply_progress(2.0).unwrap();
    assert_eq!(volume.borrow().temperature, 60.0);
    assert_eq!(volume.borrow().color_filter, TARGET.color_filter);
}

#[test]
fn failed_lookup_surfaces_as_configuration_error() {
    let scene = Scene::new();
    let err = ColorGradingChannel::from_lookup(scene.color_grading_handle(), TARGET).unwrap_err();
    assert!(matches!(err, CalamityError::Configuration(_)));
}

#[test]
fn two_channels_on_shared_settings_last_write_wins() {
    let volume = Rc::new(RefCell::new(ColorGradingVolume::default()));
    let mut a = ColorGradingChannel::new(subject::color_grading("grading", &volume), TARGET);
    let mut b = ColorGradingChannel::new(
        subject::color_grading("grading", &volume),
        ColorGradingTarget {
            temperature: -20.0,
            color_filter: Rgba::WHITE,
        },
    );
    a.setup().unwrap();
    b.setup().unwrap();

    a.apply_progress(1.0).unwrap();
    b.apply_progress(1.0).unwrap();
    assert_eq!(volume.borrow().temperature, -20.0);
}

#[test]
fn apply_before_setup_is_a_usage_error() {
    let volume = Rc::new(RefCell::new(ColorGradingVolume::default()));
    let mut ch = ColorGradingChannel::new(subject::color_grading("grading", &volume), TARGET);
    assert!(matches!(ch.apply_progress(0.5), Err(CalamityError::Usage(_))));
}

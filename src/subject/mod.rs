//! Capability contracts for the externally owned objects a calamity mutates.
//!
//! The timeline never owns its subjects: channels hold [`SubjectHandle`]s, which are
//! weak references into the host's `Rc<RefCell<_>>` storage.

use std::{
    cell::{Ref, RefCell, RefMut},
    rc::{Rc, Weak},
};

use crate::foundation::{
    core::{Quat, Rgba, Vec3},
    error::{CalamityError, CalamityResult},
};

/// A posed scene-graph node.
pub trait SpatialSubject {
    /// Current position.
    fn position(&self) -> Vec3;
    /// Overwrite position.
    fn set_position(&mut self, position: Vec3);
    /// Current orientation.
    fn rotation(&self) -> Quat;
    /// Overwrite orientation.
    fn set_rotation(&mut self, rotation: Quat);
    /// Current scale.
    fn scale(&self) -> Vec3;
    /// Overwrite scale.
    fn set_scale(&mut self, scale: Vec3);
    /// Overwrite position and orientation in one mutation.
    fn set_position_and_rotation(&mut self, position: Vec3, rotation: Quat);
}

/// A particle emitter's live emission parameters.
pub trait EmitterSubject {
    /// Start-speed multiplier for newly emitted particles.
    fn speed_multiplier(&self) -> f32;
    /// Overwrite the start-speed multiplier.
    fn set_speed_multiplier(&mut self, value: f32);
    /// Gravity multiplier for newly emitted particles.
    fn gravity_multiplier(&self) -> f32;
    /// Overwrite the gravity multiplier.
    fn set_gravity_multiplier(&mut self, value: f32);
}

/// Process-wide color-grading settings.
pub trait ColorGrading {
    /// White-balance temperature.
    fn temperature(&self) -> f32;
    /// Overwrite the white-balance temperature.
    fn set_temperature(&mut self, value: f32);
    /// Multiplicative color filter.
    fn color_filter(&self) -> Rgba;
    /// Overwrite the color filter.
    fn set_color_filter(&mut self, value: Rgba);
}

/// An audio output.
pub trait AudioSubject {
    /// Output volume, typically in `[0, 1]`.
    fn volume(&self) -> f32;
    /// Overwrite output volume.
    fn set_volume(&mut self, value: f32);
}

/// Weak, non-owning reference to a host subject.
pub struct SubjectHandle<T: ?Sized> {
    label: String,
    inner: Weak<RefCell<T>>,
}

impl<T: ?Sized> SubjectHandle<T> {
    /// Wrap an existing weak reference. `label` names the subject in errors and logs.
    pub fn new(label: impl Into<String>, inner: Weak<RefCell<T>>) -> Self {
        Self {
            label: label.into(),
            inner,
        }
    }

    /// Name used in diagnostics.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the host still owns the subject.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Whether the subject is alive and not borrowed anywhere else right now.
    pub fn is_writable(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|rc| rc.try_borrow_mut().is_ok())
    }

    /// Strong reference for the duration of one operation.
    pub(crate) fn upgrade(&self) -> CalamityResult<Rc<RefCell<T>>> {
        self.inner
            .upgrade()
            .ok_or_else(|| CalamityError::subject(format!("subject '{}' was dropped", self.label)))
    }

    /// Strong reference at setup time, where a missing subject is a configuration fault.
    pub(crate) fn resolve(&self) -> CalamityResult<Rc<RefCell<T>>> {
        self.inner.upgrade().ok_or_else(|| {
            CalamityError::configuration(format!(
                "subject '{}' is not bound to a live object",
                self.label
            ))
        })
    }
}

impl<T: ?Sized> Clone for SubjectHandle<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for SubjectHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubjectHandle")
            .field("label", &self.label)
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Handle to a spatial subject.
pub type SpatialHandle = SubjectHandle<dyn SpatialSubject>;
/// Handle to a particle emitter.
pub type EmitterHandle = SubjectHandle<dyn EmitterSubject>;
/// Handle to the color-grading settings.
pub type ColorGradingHandle = SubjectHandle<dyn ColorGrading>;
/// Handle to an audio output.
pub type AudioHandle = SubjectHandle<dyn AudioSubject>;

/// Weak handle to a concrete spatial subject.
pub fn spatial<S: SpatialSubject + 'static>(
    label: impl Into<String>,
    subject: &Rc<RefCell<S>>,
) -> SpatialHandle {
    let weak = Rc::downgrade(subject);
    let weak: Weak<RefCell<dyn SpatialSubject>> = weak;
    SubjectHandle::new(label, weak)
}

/// Weak handle to a concrete emitter.
pub fn emitter<S: EmitterSubject + 'static>(
    label: impl Into<String>,
    subject: &Rc<RefCell<S>>,
) -> EmitterHandle {
    let weak = Rc::downgrade(subject);
    let weak: Weak<RefCell<dyn EmitterSubject>> = weak;
    SubjectHandle::new(label, weak)
}

/// Weak handle to concrete color-grading settings.
pub fn color_grading<S: ColorGrading + 'static>(
    label: impl Into<String>,
    subject: &Rc<RefCell<S>>,
) -> ColorGradingHandle {
    let weak = Rc::downgrade(subject);
    let weak: Weak<RefCell<dyn ColorGrading>> = weak;
    SubjectHandle::new(label, weak)
}

/// Weak handle to a concrete audio output.
pub fn audio<S: AudioSubject + 'static>(
    label: impl Into<String>,
    subject: &Rc<RefCell<S>>,
) -> AudioHandle {
    let weak = Rc::downgrade(subject);
    let weak: Weak<RefCell<dyn AudioSubject>> = weak;
    SubjectHandle::new(label, weak)
}

pub(crate) fn borrow<'a, T: ?Sized>(
    label: &str,
    cell: &'a RefCell<T>,
) -> CalamityResult<Ref<'a, T>> {
    cell.try_borrow().map_err(|_| {
        CalamityError::subject(format!("subject '{label}' is being mutated elsewhere"))
    })
}

pub(crate) fn borrow_mut<'a, T: ?Sized>(
    label: &str,
    cell: &'a RefCell<T>,
) -> CalamityResult<RefMut<'a, T>> {
    cell.try_borrow_mut()
        .map_err(|_| CalamityError::subject(format!("subject '{label}' is already borrowed")))
}

#[cfg(test)]
#[path = "../../tests/unit/subject/handle.rs"]
mod tests;

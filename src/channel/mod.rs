//! Interpolation channels: one external subject, one baseline, one target.

pub(crate) mod audio;
pub(crate) mod color_grading;
pub(crate) mod particle;
pub(crate) mod transform;

use crate::foundation::error::{CalamityError, CalamityResult};

/// A unit of interpolation driven by the timeline.
///
/// The timeline calls [`Channel::setup`] exactly once, then [`Channel::apply_progress`]
/// once per tick with the shared eased progress. Implementations clamp progress to
/// `[0, 1]` themselves and must produce the same subject state for the same progress
/// no matter how many ticks came before.
pub trait Channel {
    /// Short static name of the channel type, used in logs and errors.
    fn kind(&self) -> &'static str;

    /// Name of the bound subject.
    fn label(&self) -> &str;

    /// Validate targets and capture the subject's current state as the baseline.
    fn setup(&mut self) -> CalamityResult<()>;

    /// Whether the baseline was captured; `false` until [`Channel::setup`] succeeds.
    fn is_set_up(&self) -> bool;

    /// Whether the bound subject still exists.
    fn is_bound(&self) -> bool;

    /// Whether the bound subject can be written without a borrow conflict.
    fn is_writable(&self) -> bool;

    /// Interpolate from baseline toward target and write the result to the subject.
    fn apply_progress(&mut self, progress: f64) -> CalamityResult<()>;

    /// Check, without side effects, that [`Channel::apply_progress`] can run.
    fn ensure_ready(&self) -> CalamityResult<()> {
        if !self.is_set_up() {
            return Err(not_set_up(self.kind(), self.label()));
        }
        if !self.is_bound() {
            return Err(CalamityError::subject(format!(
                "{} channel: subject '{}' was dropped",
                self.kind(),
                self.label()
            )));
        }
        if !self.is_writable() {
            return Err(CalamityError::subject(format!(
                "{} channel: subject '{}' is borrowed elsewhere",
                self.kind(),
                self.label()
            )));
        }
        Ok(())
    }
}

pub(crate) fn not_set_up(kind: &str, label: &str) -> CalamityError {
    CalamityError::usage(format!(
        "{kind} channel '{label}': apply_progress called before setup"
    ))
}

pub(crate) fn already_set_up(kind: &str, label: &str) -> CalamityError {
    CalamityError::usage(format!("{kind} channel '{label}': setup called twice"))
}

use crate::{
    animation::lerp::mix,
    channel::{Channel, already_set_up, not_set_up},
    foundation::{core::ensure_finite, error::CalamityResult},
    subject::{EmitterHandle, borrow, borrow_mut},
};

/// Emission multipliers reached at full progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticleTarget {
    /// Start-speed multiplier.
    pub speed_multiplier: f32,
    /// Gravity multiplier.
    pub gravity_multiplier: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Emission {
    speed: f32,
    gravity: f32,
}

/// Interpolates the start-speed and gravity multipliers of a particle emitter.
///
/// Writes land on the emitter's live parameters every tick; already emitted particles
/// are the emitter's business.
#[derive(Debug)]
pub struct ParticleChannel {
    subject: EmitterHandle,
    target: ParticleTarget,
    baseline: Option<Emission>,
}

impl ParticleChannel {
    /// Bind `subject` to `target`.
    pub fn new(subject: EmitterHandle, target: ParticleTarget) -> Self {
        Self {
            subject,
            target,
            baseline: None,
        }
    }

    /// Configured target.
    pub fn target(&self) -> &ParticleTarget {
        &self.target
    }
}

impl Channel for ParticleChannel {
    fn kind(&self) -> &'static str {
        "particles"
    }

    fn label(&self) -> &str {
        self.subject.label()
    }

    fn setup(&mut self) -> CalamityResult<()> {
        if self.baseline.is_some() {
            return Err(already_set_up(self.kind(), self.label()));
        }
        ensure_finite("particle speed multiplier", self.target.speed_multiplier)?;
        ensure_finite("particle gravity multiplier", self.target.gravity_multiplier)?;

        let rc = self.subject.resolve()?;
        let emitter = borrow(self.subject.label(), &rc)?;
        let base = Emission {
            speed: emitter.speed_multiplier(),
            gravity: emitter.gravity_multiplier(),
        };
        tracing::debug!(
            subject = self.subject.label(),
            speed = base.speed,
            gravity = base.gravity,
            "captured particle baseline"
        );
        self.baseline = Some(base);
        Ok(())
    }

    fn is_set_up(&self) -> bool {
        self.baseline.is_some()
    }

    fn is_bound(&self) -> bool {
        self.subject.is_alive()
    }

    fn is_writable(&self) -> bool {
        self.subject.is_writable()
    }

    fn apply_progress(&mut self, progress: f64) -> CalamityResult<()> {
        let base = self
            .baseline
            .ok_or_else(|| not_set_up(self.kind(), self.label()))?;

        let rc = self.subject.upgrade()?;
        let mut emitter = borrow_mut(self.subject.label(), &rc)?;
        emitter.set_speed_multiplier(mix(&base.speed, &self.target.speed_multiplier, progress));
        emitter.set_gravity_multiplier(mix(
            &base.gravity,
            &self.target.gravity_multiplier,
            progress,
        ));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/channel/particle.rs"]
mod tests;

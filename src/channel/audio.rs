use crate::{
    animation::lerp::mix,
    channel::{Channel, already_set_up, not_set_up},
    foundation::{
        core::ensure_finite,
        error::{CalamityError, CalamityResult},
    },
    subject::{AudioHandle, borrow, borrow_mut},
};

/// Interpolates the volume of an audio output.
#[derive(Debug)]
pub struct AudioChannel {
    subject: AudioHandle,
    target_volume: f32,
    baseline: Option<f32>,
}

impl AudioChannel {
    /// Fade `subject` to `target_volume`.
    pub fn new(subject: AudioHandle, target_volume: f32) -> Self {
        Self {
            subject,
            target_volume,
            baseline: None,
        }
    }

    /// Configured target volume.
    pub fn target_volume(&self) -> f32 {
        self.target_volume
    }
}

impl Channel for AudioChannel {
    fn kind(&self) -> &'static str {
        "audio"
    }

    fn label(&self) -> &str {
        self.subject.label()
    }

    fn setup(&mut self) -> CalamityResult<()> {
        if self.baseline.is_some() {
            return Err(already_set_up(self.kind(), self.label()));
        }
        ensure_finite("audio target volume", self.target_volume)?;
        if self.target_volume < 0.0 {
            return Err(CalamityError::configuration(format!(
                "audio target volume must be >= 0, got {}",
                self.target_volume
            )));
        }

        let rc = self.subject.resolve()?;
        let volume = borrow(self.subject.label(), &rc)?.volume();
        tracing::debug!(subject = self.subject.label(), volume, "captured audio baseline");
        self.baseline = Some(volume);
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
        let volume = mix(&base, &self.target_volume, progress);
        borrow_mut(self.subject.label(), &rc)?.set_volume(volume);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/channel/audio.rs"]
mod tests;

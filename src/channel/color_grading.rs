use crate::{
    animation::lerp::mix,
    channel::{Channel, already_set_up, not_set_up},
    foundation::{
        core::{Rgba, ensure_finite},
        error::{CalamityError, CalamityResult},
    },
    subject::{ColorGradingHandle, borrow, borrow_mut},
};

/// Color-grading values reached at full progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorGradingTarget {
    /// White-balance temperature.
    pub temperature: f32,
    /// Color filter, mixed per component.
    pub color_filter: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Grade {
    temperature: f32,
    color_filter: Rgba,
}

/// Interpolates temperature and color filter of the global color-grading settings.
///
/// The settings object is process-wide. Two timelines grading color at once simply
/// overwrite each other; the last tick wins.
#[derive(Debug)]
pub struct ColorGradingChannel {
    settings: ColorGradingHandle,
    target: ColorGradingTarget,
    baseline: Option<Grade>,
}

impl ColorGradingChannel {
    /// Bind the already-resolved settings to `target`.
    ///
    /// Resolution belongs to the host; see [`crate::Scene::color_grading_handle`], which
    /// fails with a configuration error when no settings are active.
    pub fn new(settings: ColorGradingHandle, target: ColorGradingTarget) -> Self {
        Self {
            settings,
            target,
            baseline: None,
        }
    }

    /// Bind the result of a host lookup, surfacing a failed lookup as an error.
    pub fn from_lookup(
        settings: CalamityResult<ColorGradingHandle>,
        target: ColorGradingTarget,
    ) -> CalamityResult<Self> {
        settings.map(|settings| Self::new(settings, target))
    }

    /// Configured target.
    pub fn target(&self) -> &ColorGradingTarget {
        &self.target
    }
}

impl Channel for ColorGradingChannel {
    fn kind(&self) -> &'static str {
        "color_grading"
    }

    fn label(&self) -> &str {
        self.settings.label()
    }

    fn setup(&mut self) -> CalamityResult<()> {
        if self.baseline.is_some() {
            return Err(already_set_up(self.kind(), self.label()));
        }
        ensure_finite("color-grading temperature", self.target.temperature)?;
        if !self.target.color_filter.is_finite() {
            return Err(CalamityError::configuration(
                "color-grading filter must be finite",
            ));
        }

        let rc = self.settings.resolve()?;
        let settings = borrow(self.settings.label(), &rc)?;
        let base = Grade {
            temperature: settings.temperature(),
            color_filter: settings.color_filter(),
        };
        tracing::debug!(
            temperature = base.temperature,
            filter = ?base.color_filter,
            "captured color-grading baseline"
        );
        self.baseline = Some(base);
        Ok(())
    }

    fn is_set_up(&self) -> bool {
        self.baseline.is_some()
    }

    fn is_bound(&self) -> bool {
        self.settings.is_alive()
    }

    fn is_writable(&self) -> bool {
        self.settings.is_writable()
    }

    fn apply_progress(&mut self, progress: f64) -> CalamityResult<()> {
        let base = self
            .baseline
            .ok_or_else(|| not_set_up(self.kind(), self.label()))?;

        let rc = self.settings.upgrade()?;
        let mut settings = borrow_mut(self.settings.label(), &rc)?;
        settings.set_temperature(mix(&base.temperature, &self.target.temperature, progress));
        settings.set_color_filter(mix(&base.color_filter, &self.target.color_filter, progress));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/channel/color_grading.rs"]
mod tests;

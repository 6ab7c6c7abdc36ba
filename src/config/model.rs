use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Rgba, Vec3, ensure_finite, ensure_finite_vec3},
        error::{CalamityError, CalamityResult},
    },
    scene::registry::SceneSnapshot,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A scene together with the calamity that runs over it; the CLI's input format.
pub struct CalamityDocument {
    /// Initial state of every subject.
    #[serde(default)]
    pub scene: SceneSnapshot,
    /// The transition to run.
    pub calamity: CalamityConfig,
}

impl CalamityDocument {
    /// Parse a JSON document.
    pub fn from_json(s: &str) -> CalamityResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Validate the calamity part.
    pub fn validate(&self) -> CalamityResult<()> {
        self.calamity.validate()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Declarative description of one calamity.
///
/// Targets only: baselines are whatever the subjects hold when the timeline is set up.
pub struct CalamityConfig {
    /// Transition length in seconds.
    pub duration_secs: f64,
    /// Easing applied to linear progress.
    #[serde(default)]
    pub ease: Ease,
    /// Channels, in drive order.
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Scale factor, either one number for all axes or one per axis.
pub enum ScaleFactor {
    /// Same factor on every axis.
    Uniform(f32),
    /// Per-axis factors.
    PerAxis(Vec3),
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::Uniform(1.0)
    }
}

impl ScaleFactor {
    /// Factors as a vector.
    pub fn to_vec3(self) -> Vec3 {
        match self {
            Self::Uniform(f) => Vec3::splat(f),
            Self::PerAxis(v) => v,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One channel of a [`CalamityConfig`].
pub enum ChannelConfig {
    /// Move, turn and scale a scene node.
    Transform {
        /// Node name.
        subject: String,
        /// End position.
        position: Vec3,
        /// Rotation relative to the baseline, Euler degrees (Z, then X, then Y).
        #[serde(default)]
        rotation_deg: Vec3,
        /// Factor applied to the baseline scale.
        #[serde(default)]
        scale_factor: ScaleFactor,
    },
    /// Re-tune a particle emitter.
    Particles {
        /// Emitter name.
        subject: String,
        /// Target start-speed multiplier.
        speed_multiplier: f32,
        /// Target gravity multiplier.
        gravity_multiplier: f32,
    },
    /// Shift the scene's global color grading.
    ColorGrading {
        /// Target white-balance temperature.
        temperature: f32,
        /// Target color filter.
        color_filter: Rgba,
    },
    /// Fade an audio output.
    Audio {
        /// Audio source name.
        subject: String,
        /// Target volume.
        volume: f32,
    },
}

impl ChannelConfig {
    /// Subject name, if the channel targets a named subject.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::Transform { subject, .. }
            | Self::Particles { subject, .. }
            | Self::Audio { subject, .. } => Some(subject),
            Self::ColorGrading { .. } => None,
        }
    }

    fn validate(&self) -> CalamityResult<()> {
        if let Some(subject) = self.subject()
            && subject.trim().is_empty()
        {
            return Err(CalamityError::configuration("subject name must be non-empty"));
        }

        match self {
            Self::Transform {
                position,
                rotation_deg,
                scale_factor,
                ..
            } => {
                ensure_finite_vec3("position", *position)?;
                ensure_finite_vec3("rotation_deg", *rotation_deg)?;
                ensure_finite_vec3("scale_factor", scale_factor.to_vec3())
            }
            Self::Particles {
                speed_multiplier,
                gravity_multiplier,
                ..
            } => {
                ensure_finite("speed_multiplier", *speed_multiplier)?;
                ensure_finite("gravity_multiplier", *gravity_multiplier)
            }
            Self::ColorGrading {
                temperature,
                color_filter,
            } => {
                ensure_finite("temperature", *temperature)?;
                if !color_filter.is_finite() {
                    return Err(CalamityError::configuration("color_filter must be finite"));
                }
                Ok(())
            }
            Self::Audio { volume, .. } => {
                ensure_finite("volume", *volume)?;
                if *volume < 0.0 {
                    return Err(CalamityError::configuration(format!(
                        "volume must be >= 0, got {volume}"
                    )));
                }
                Ok(())
            }
        }
    }
}

impl CalamityConfig {
    /// Check duration and every channel's values. Subject names are resolved later,
    /// against a concrete scene.
    pub fn validate(&self) -> CalamityResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(CalamityError::configuration(format!(
                "duration_secs must be finite and > 0, got {}",
                self.duration_secs
            )));
        }
        for (index, channel) in self.channels.iter().enumerate() {
            channel.validate().map_err(|err| match err {
                CalamityError::Configuration(msg) => {
                    CalamityError::configuration(format!("channels[{index}]: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;

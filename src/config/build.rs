use crate::{
    channel::{
        Channel,
        audio::AudioChannel,
        color_grading::{ColorGradingChannel, ColorGradingTarget},
        particle::{ParticleChannel, ParticleTarget},
        transform::{TransformChannel, TransformTarget},
    },
    config::model::{CalamityConfig, ChannelConfig},
    foundation::error::CalamityResult,
    scene::registry::Scene,
    timeline::controller::TimelineController,
};

/// Resolve every channel of `config` against `scene` and assemble a controller.
///
/// Unknown subject names and a missing color-grading volume are configuration
/// errors; the returned controller still needs [`TimelineController::setup`].
#[tracing::instrument(skip_all, fields(channels = config.channels.len()))]
pub fn build_controller(
    config: &CalamityConfig,
    scene: &Scene,
) -> CalamityResult<TimelineController> {
    config.validate()?;

    let mut controller = TimelineController::new(config.duration_secs, config.ease);
    for channel in &config.channels {
        controller.push_channel(build_channel(channel, scene)?);
    }
    tracing::debug!(
        duration_secs = config.duration_secs,
        ease = ?config.ease,
        "built calamity timeline"
    );
    Ok(controller)
}

fn build_channel(channel: &ChannelConfig, scene: &Scene) -> CalamityResult<Box<dyn Channel>> {
    let built: Box<dyn Channel> = match channel {
        ChannelConfig::Transform {
            subject,
            position,
            rotation_deg,
            scale_factor,
        } => {
            let target = TransformTarget::new(*position)
                .with_rotation_euler_deg(*rotation_deg)
                .with_scale_factors(scale_factor.to_vec3());
            Box::new(TransformChannel::new(scene.spatial_handle(subject)?, target))
        }
        ChannelConfig::Particles {
            subject,
            speed_multiplier,
            gravity_multiplier,
        } => {
            let target = ParticleTarget {
                speed_multiplier: *speed_multiplier,
                gravity_multiplier: *gravity_multiplier,
            };
            Box::new(ParticleChannel::new(scene.emitter_handle(subject)?, target))
        }
        ChannelConfig::ColorGrading {
            temperature,
            color_filter,
        } => {
            let target = ColorGradingTarget {
                temperature: *temperature,
                color_filter: *color_filter,
            };
            Box::new(ColorGradingChannel::from_lookup(
                scene.color_grading_handle(),
                target,
            )?)
        }
        ChannelConfig::Audio { subject, volume } => {
            Box::new(AudioChannel::new(scene.audio_handle(subject)?, *volume))
        }
    };
    Ok(built)
}

#[cfg(test)]
#[path = "../../tests/unit/config/build.rs"]
mod tests;

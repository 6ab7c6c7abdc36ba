//! Calamity drives scripted, time-bounded scene transitions.
//!
//! A calamity animates several unrelated properties at once (node poses, particle
//! emission, global color grading, audio volume) from whatever state they hold when it
//! starts toward configured targets. Everything is keyed off one number: progress.
//!
//! # Model
//!
//! 1. **Setup**: [`TimelineController::setup`] records the start time and asks every
//!    [`Channel`] to capture its subject's baseline.
//! 2. **Tick**: [`TimelineController::tick`] turns `now` into linear progress
//!    (`elapsed / duration`), shapes it once with an [`Ease`], and hands the result to
//!    every channel in configuration order.
//! 3. **Apply**: each channel clamps progress to `[0, 1]`, interpolates baseline to
//!    target and writes the result to its subject.
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: subject state is a pure function of `now`; there is no
//!   accumulation between ticks.
//! - **Borrowed subjects**: channels hold weak handles; the host owns every subject.
//! - **Fail before mutating**: configuration errors surface at build or setup, never
//!   half-way through a tick.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod channel;
mod config;
mod foundation;
mod scene;
mod subject;
mod timeline;

pub use animation::ease::Ease;
pub use animation::lerp::{Lerp, mix, slerp_shortest};
pub use channel::Channel;
pub use channel::audio::AudioChannel;
pub use channel::color_grading::{ColorGradingChannel, ColorGradingTarget};
pub use channel::particle::{ParticleChannel, ParticleTarget};
pub use channel::transform::{TransformChannel, TransformTarget};
pub use config::build::build_controller;
pub use config::model::{CalamityConfig, CalamityDocument, ChannelConfig, ScaleFactor};
pub use foundation::core::{EulerRot, Quat, Rgba, Vec3, quat_from_euler_deg, quat_to_euler_deg};
pub use foundation::error::{CalamityError, CalamityResult};
pub use scene::model::{AudioSource, ColorGradingVolume, ParticleEmitter, SceneNode};
pub use scene::registry::{Scene, SceneSnapshot};
pub use subject::{
    AudioHandle, AudioSubject, ColorGrading, ColorGradingHandle, EmitterHandle, EmitterSubject,
    SpatialHandle, SpatialSubject, SubjectHandle, audio, color_grading, emitter, spatial,
};
pub use timeline::clock::{Clock, ManualClock, SystemClock};
pub use timeline::controller::{Progress, TimelineController};

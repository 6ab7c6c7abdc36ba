use crate::{
    animation::ease::Ease,
    channel::Channel,
    foundation::error::{CalamityError, CalamityResult},
    timeline::clock::Clock,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Timeline position computed for one tick.
pub struct Progress {
    /// Seconds since setup; negative if the clock reads earlier than the start.
    pub elapsed_secs: f64,
    /// `elapsed / duration`, unclamped.
    pub linear: f64,
    /// `linear` after easing; what every channel received.
    pub eased: f64,
}

/// Drives an ordered set of channels from a single eased progress value.
///
/// One controller covers one transition: build it, call [`TimelineController::setup`]
/// once, then [`TimelineController::tick`] every frame until the host stops. Output
/// is a pure function of `now`, so ticking twice at the same time yields the same
/// subject states.
pub struct TimelineController {
    duration_secs: f64,
    ease: Ease,
    channels: Vec<Box<dyn Channel>>,
    start: Option<f64>,
    last_tick: Option<f64>,
}

impl TimelineController {
    /// Controller with no channels. `duration_secs` is checked at setup.
    pub fn new(duration_secs: f64, ease: Ease) -> Self {
        Self {
            duration_secs,
            ease,
            channels: Vec::new(),
            start: None,
            last_tick: None,
        }
    }

    /// Append a channel; channels are driven in insertion order.
    pub fn with_channel(mut self, channel: impl Channel + 'static) -> Self {
        self.push_channel(Box::new(channel));
        self
    }

    /// Append a boxed channel.
    pub fn push_channel(&mut self, channel: Box<dyn Channel>) {
        self.channels.push(channel);
    }

    /// Configured duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Configured easing.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Clock reading recorded by a successful setup.
    pub fn start_time(&self) -> Option<f64> {
        self.start
    }

    /// Whether setup has completed.
    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// `(kind, label)` of every channel, in drive order.
    pub fn channel_labels(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.channels.iter().map(|c| (c.kind(), c.label()))
    }

    fn validate_duration(&self) -> CalamityResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(CalamityError::configuration(format!(
                "calamity duration must be finite and > 0, got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }

    /// Record `now` as the start and capture every channel's baseline, in order.
    ///
    /// The first channel failure is returned and the controller stays un-started, so
    /// no tick can ever run against a partial setup.
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(duration_secs = self.duration_secs, ease = ?self.ease, channels = self.channels.len())
    )]
    pub fn setup(&mut self, now: f64) -> CalamityResult<()> {
        if self.start.is_some() {
            return Err(CalamityError::usage("timeline setup called twice"));
        }
        self.validate_duration()?;
        if !now.is_finite() {
            return Err(CalamityError::usage(format!(
                "setup time must be finite, got {now}"
            )));
        }

        for channel in &mut self.channels {
            if let Err(err) = channel.setup() {
                tracing::warn!(
                    kind = channel.kind(),
                    subject = channel.label(),
                    error = %err,
                    "channel setup failed"
                );
                return Err(err);
            }
        }

        self.start = Some(now);
        tracing::debug!(start = now, "calamity started");
        Ok(())
    }

    /// [`TimelineController::setup`] at the clock's current reading.
    pub fn setup_with(&mut self, clock: &impl Clock) -> CalamityResult<()> {
        self.setup(clock.now())
    }

    /// Progress at `now` without touching any channel.
    pub fn progress_at(&self, now: f64) -> CalamityResult<Progress> {
        let start = self
            .start
            .ok_or_else(|| CalamityError::usage("timeline ticked before setup"))?;
        if !now.is_finite() {
            return Err(CalamityError::usage(format!(
                "tick time must be finite, got {now}"
            )));
        }

        let elapsed_secs = now - start;
        let linear = elapsed_secs / self.duration_secs;
        Ok(Progress {
            elapsed_secs,
            linear,
            eased: self.ease.apply(linear),
        })
    }

    /// Whether `now` is at or past the nominal end. Always `false` before setup.
    pub fn is_complete(&self, now: f64) -> bool {
        self.progress_at(now).is_ok_and(|p| p.linear >= 1.0)
    }

    /// Advance every channel to the eased progress at `now`.
    ///
    /// Every channel is checked before any is written, so a dropped subject fails the
    /// whole tick instead of leaving it half applied.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, now: f64) -> CalamityResult<Progress> {
        let progress = self.progress_at(now)?;

        if let Some(last) = self.last_tick
            && now < last
        {
            tracing::warn!(now, last, "clock went backwards");
        }

        for channel in &self.channels {
            channel.ensure_ready()?;
        }
        for channel in &mut self.channels {
            channel.apply_progress(progress.eased)?;
        }

        self.last_tick = Some(now);
        tracing::trace!(linear = progress.linear, eased = progress.eased, "ticked");
        Ok(progress)
    }

    /// [`TimelineController::tick`] at the clock's current reading.
    pub fn tick_with(&mut self, clock: &impl Clock) -> CalamityResult<Progress> {
        self.tick(clock.now())
    }
}

impl std::fmt::Debug for TimelineController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineController")
            .field("duration_secs", &self.duration_secs)
            .field("ease", &self.ease)
            .field("channels", &self.channel_labels().collect::<Vec<_>>())
            .field("start", &self.start)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/controller.rs"]
mod tests;

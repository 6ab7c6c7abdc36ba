use crate::{
    animation::lerp::{mix, slerp_shortest},
    channel::{Channel, already_set_up, not_set_up},
    foundation::{
        core::{Quat, Vec3, ensure_finite_vec3, quat_from_euler_deg},
        error::{CalamityError, CalamityResult},
    },
    subject::{SpatialHandle, borrow, borrow_mut},
};

/// Where a [`TransformChannel`] ends up at full progress.
///
/// Position is absolute. Rotation and scale are relative to the baseline captured at
/// setup, in the subject's own coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformTarget {
    /// End position.
    pub position: Vec3,
    /// Rotation composed onto the baseline orientation.
    pub rotation_delta: Quat,
    /// Per-axis factor applied to the baseline scale.
    pub scale_factor: Vec3,
}

impl TransformTarget {
    /// Move to `position`; no rotation, no scaling.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation_delta: Quat::IDENTITY,
            scale_factor: Vec3::ONE,
        }
    }

    /// Rotate by `delta` relative to the baseline.
    pub fn with_rotation(mut self, delta: Quat) -> Self {
        self.rotation_delta = delta;
        self
    }

    /// Rotate by Euler angles in degrees (Z, then X, then Y) relative to the baseline.
    pub fn with_rotation_euler_deg(self, deg: Vec3) -> Self {
        self.with_rotation(quat_from_euler_deg(deg))
    }

    /// Scale the baseline uniformly by `factor`.
    pub fn with_scale_factor(self, factor: f32) -> Self {
        self.with_scale_factors(Vec3::splat(factor))
    }

    /// Scale the baseline per axis.
    pub fn with_scale_factors(mut self, factors: Vec3) -> Self {
        self.scale_factor = factors;
        self
    }

    /// Reject non-finite values and degenerate rotations.
    pub fn validate(&self) -> CalamityResult<()> {
        ensure_finite_vec3("transform target position", self.position)?;
        ensure_finite_vec3("transform scale factor", self.scale_factor)?;
        if !self.rotation_delta.is_finite() || self.rotation_delta.length_squared() < 1e-6 {
            return Err(CalamityError::configuration(
                "transform rotation delta must be a finite, non-zero quaternion",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Pose {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

/// Interpolates position, orientation and scale of a spatial subject.
#[derive(Debug)]
pub struct TransformChannel {
    subject: SpatialHandle,
    target: TransformTarget,
    rotation_delta: Quat,
    baseline: Option<Pose>,
}

impl TransformChannel {
    /// Bind `subject` to `target`. Nothing is read until setup.
    pub fn new(subject: SpatialHandle, target: TransformTarget) -> Self {
        Self {
            subject,
            target,
            rotation_delta: target.rotation_delta.normalize(),
            baseline: None,
        }
    }

    /// Configured target.
    pub fn target(&self) -> &TransformTarget {
        &self.target
    }

    /// Orientation reached at full progress, once the baseline is known.
    pub fn target_rotation(&self) -> Option<Quat> {
        self.baseline.map(|b| b.rotation * self.rotation_delta)
    }
}

impl Channel for TransformChannel {
    fn kind(&self) -> &'static str {
        "transform"
    }

    fn label(&self) -> &str {
        self.subject.label()
    }

    fn setup(&mut self) -> CalamityResult<()> {
        if self.baseline.is_some() {
            return Err(already_set_up(self.kind(), self.label()));
        }
        self.target.validate()?;

        let rc = self.subject.resolve()?;
        let subject = borrow(self.subject.label(), &rc)?;
        let pose = Pose {
            position: subject.position(),
            rotation: subject.rotation(),
            scale: subject.scale(),
        };
        tracing::debug!(
            subject = self.subject.label(),
            position = ?pose.position,
            rotation = ?pose.rotation,
            scale = ?pose.scale,
            "captured transform baseline"
        );
        self.baseline = Some(pose);
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

        let position = mix(&base.position, &self.target.position, progress);
        let end_rotation = base.rotation * self.rotation_delta;
        let rotation = slerp_shortest(base.rotation, end_rotation, progress);
        let scale = base.scale * mix(&Vec3::ONE, &self.target.scale_factor, progress);

        let rc = self.subject.upgrade()?;
        let mut subject = borrow_mut(self.subject.label(), &rc)?;
        subject.set_position_and_rotation(position, rotation);
        subject.set_scale(scale);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/channel/transform.rs"]
mod tests;

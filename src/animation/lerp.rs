use crate::foundation::core::{Quat, Rgba, Vec3};

/// Unclamped linear interpolation between two values.
pub trait Lerp: Sized {
    /// `a` at `t = 0`, `b` at `t = 1`; extrapolates outside that range.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec3::new(
            <f32 as Lerp>::lerp(&a.x, &b.x, t),
            <f32 as Lerp>::lerp(&a.y, &b.y, t),
            <f32 as Lerp>::lerp(&a.z, &b.z, t),
        )
    }
}

impl Lerp for Rgba {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            r: <f32 as Lerp>::lerp(&a.r, &b.r, t),
            g: <f32 as Lerp>::lerp(&a.g, &b.g, t),
            b: <f32 as Lerp>::lerp(&a.b, &b.b, t),
            a: <f32 as Lerp>::lerp(&a.a, &b.a, t),
        }
    }
}

/// Clamped interpolation used by every channel.
///
/// `t` is clamped to `[0, 1]` and the endpoints are returned verbatim, so progress
/// before the start holds the baseline and progress past the end holds the target
/// bit-for-bit.
pub fn mix<T: Lerp + Clone>(a: &T, b: &T, t: f64) -> T {
    let t = clamp_unit(t);
    if t <= 0.0 {
        a.clone()
    } else if t >= 1.0 {
        b.clone()
    } else {
        T::lerp(a, b, t)
    }
}

/// Spherical interpolation along the shorter of the two arcs between `a` and `b`.
///
/// Same clamping and endpoint rules as [`mix`].
pub fn slerp_shortest(a: Quat, b: Quat, t: f64) -> Quat {
    let t = clamp_unit(t);
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }
    // q and -q are the same orientation; pick the one on a's hemisphere.
    let b = if a.dot(b) < 0.0 { -b } else { b };
    a.slerp(b, t as f32).normalize()
}

/// NaN maps to 0 so a broken clock can never push a channel past its baseline.
pub(crate) fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;

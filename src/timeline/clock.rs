use std::{cell::Cell, time::Instant};

/// Source of non-decreasing time values, in seconds.
pub trait Clock {
    /// Current time.
    fn now(&self) -> f64;
}

/// Wall clock measured from its creation.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock reading `0.0` now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock advanced explicitly by the host; used for fixed-step simulation and tests.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Clock reading `start`.
    pub fn starting_at(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move forward by `dt` seconds. Negative steps are ignored.
    pub fn advance(&self, dt: f64) {
        if dt > 0.0 {
            self.now.set(self.now.get() + dt);
        }
    }

    /// Jump to `t` if it is not earlier than the current reading.
    pub fn set(&self, t: f64) {
        if t >= self.now.get() {
            self.now.set(t);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clock.rs"]
mod tests;

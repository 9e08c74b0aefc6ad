//! Single-property tweens.
//!
//! A tween carries one scalar from its captured start value to a target
//! over a fixed duration, shaped by an easing curve. Tweens are stepped by
//! the engine clock rather than wall time, so the whole animation system
//! is deterministic under test.

use super::easing::Easing;

/// One in-flight property animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: f64,
    elapsed: f64,
    easing: Easing,
}

impl Tween {
    /// Start a tween from `from` to `to`.
    ///
    /// A non-positive duration completes on the first step (instant set).
    pub fn new(from: f64, to: f64, duration: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds and return the current value.
    pub fn step(&mut self, dt: f64) -> f64 {
        self.elapsed += dt.max(0.0);
        self.value()
    }

    /// Current value without advancing.
    pub fn value(&self) -> f64 {
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return self.to;
        }
        let t = self.easing.apply(self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    /// Target value.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Whether the tween has reached its target.
    pub fn finished(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }
}

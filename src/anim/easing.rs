//! Easing curves.
//!
//! The small set of curves the cursor effect actually uses: linear for the
//! idle spin, and the power-out family for everything that should start
//! fast and settle softly.

/// An easing curve mapping normalized time to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant rate. Used by the idle spin.
    Linear,
    /// `1 - (1-t)^2` - gentle deceleration.
    Power1Out,
    /// `1 - (1-t)^3` - medium deceleration.
    #[default]
    Power2Out,
    /// `1 - (1-t)^4` - strong deceleration. Used by the pointer glide.
    Power3Out,
}

impl Easing {
    /// Evaluate the curve at `t` in `[0, 1]`. Input is clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - inv * inv,
            Easing::Power2Out => 1.0 - inv * inv * inv,
            Easing::Power3Out => 1.0 - inv * inv * inv * inv,
        }
    }
}

//! Cursor configuration.
//!
//! Every timing and inset the effect uses is an aesthetic choice, not a
//! correctness requirement, so all of them live here instead of being
//! hardcoded. `Default` reproduces the reference styling.

/// Tunable parameters for the pointer highlight effect.
///
/// Durations are in seconds, distances in CSS pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorConfig {
    /// Period of one full idle rotation.
    pub spin_period: f64,
    /// Duration of the engagement-strength ramp (0 to 1) on hover enter.
    pub hover_duration: f64,
    /// Duration of the eased pointer-follow glide on mouse move.
    pub move_duration: f64,
    /// Duration of the overlay glide to the target's center on enter.
    pub engage_glide_duration: f64,
    /// Duration of each corner's animation out to the frame on enter.
    pub corner_engage_duration: f64,
    /// Duration of the corners' return to the idle cluster on leave.
    pub corner_release_duration: f64,
    /// Per-frame corner tracking tween while strength is still ramping.
    pub track_duration: f64,
    /// Corner settle tween once strength has reached `settle_threshold`.
    /// Only applied when `parallax` is on; otherwise corners snap.
    pub settle_duration: f64,
    /// Strength at which tracking switches from ramp to settle behavior.
    pub settle_threshold: f64,
    /// Center-dot scale while the button is held.
    pub press_dot_scale: f64,
    /// Overlay scale while the button is held.
    pub press_cursor_scale: f64,
    /// Duration of the dot press/release scale tween.
    pub press_dot_duration: f64,
    /// Duration of the overlay press/release scale tween.
    pub press_cursor_duration: f64,
    /// Debounce before the idle spin resumes after a leave. Absorbs
    /// enter/leave flicker when the pointer crosses element boundaries.
    pub resume_debounce: f64,
    /// Gap between a target's edge and its corner markers.
    pub border_width: f64,
    /// Side length of one corner marker.
    pub corner_size: f64,
    /// Viewport width at or below which a touch screen counts as mobile.
    pub mobile_max_width: f64,
    /// Maximum number of times the animation-engine probe is polled
    /// before attach declines.
    pub engine_poll_attempts: u32,
    /// Hide the native pointer cursor while attached.
    pub hide_native_cursor: bool,
    /// Soft corner settling while hovering (parallax feel). When off,
    /// corners lock to the frame as soon as strength is full.
    pub parallax: bool,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            spin_period: 2.0,
            hover_duration: 0.2,
            move_duration: 0.1,
            engage_glide_duration: 0.3,
            corner_engage_duration: 0.2,
            corner_release_duration: 0.3,
            track_duration: 0.05,
            settle_duration: 0.2,
            settle_threshold: 0.99,
            press_dot_scale: 0.7,
            press_cursor_scale: 0.9,
            press_dot_duration: 0.3,
            press_cursor_duration: 0.2,
            resume_debounce: 0.05,
            border_width: 3.0,
            corner_size: 12.0,
            mobile_max_width: 768.0,
            engine_poll_attempts: 40,
            hide_native_cursor: true,
            parallax: true,
        }
    }
}

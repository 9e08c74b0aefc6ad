//! Reactive pointer state.
//!
//! Thread-local signals the controller keeps current so host UIs can
//! react to the cursor without polling it:
//!
//! - `pointer_x`, `pointer_y` - tracked pointer position
//! - `is_pointer_down` - button state
//! - `engaged_target` - element currently framed, if any
//! - `engagement_strength` - blend factor between idle and framing shape

use spark_signals::{signal, Signal};

use crate::types::ElementId;

thread_local! {
    static POINTER_X: Signal<f64> = signal(0.0);
    static POINTER_Y: Signal<f64> = signal(0.0);
    static IS_POINTER_DOWN: Signal<bool> = signal(false);
    static ENGAGED_TARGET: Signal<Option<ElementId>> = signal(None);
    static ENGAGEMENT_STRENGTH: Signal<f64> = signal(0.0);
}

/// Get the tracked pointer X position.
pub fn pointer_x() -> f64 {
    POINTER_X.with(|s| s.get())
}

/// Get the tracked pointer Y position.
pub fn pointer_y() -> f64 {
    POINTER_Y.with(|s| s.get())
}

/// Check if the pointer button is currently down.
pub fn is_pointer_down() -> bool {
    IS_POINTER_DOWN.with(|s| s.get())
}

/// Get the currently engaged target, if any.
pub fn engaged_target() -> Option<ElementId> {
    ENGAGED_TARGET.with(|s| s.get())
}

/// Get the current engagement strength (0 = idle, 1 = fully framing).
pub fn engagement_strength() -> f64 {
    ENGAGEMENT_STRENGTH.with(|s| s.get())
}

pub(crate) fn set_pointer(x: f64, y: f64) {
    POINTER_X.with(|s| s.set(x));
    POINTER_Y.with(|s| s.set(y));
}

pub(crate) fn set_pointer_down(down: bool) {
    IS_POINTER_DOWN.with(|s| s.set(down));
}

pub(crate) fn set_engaged_target(target: Option<ElementId>) {
    ENGAGED_TARGET.with(|s| s.set(target));
}

pub(crate) fn set_engagement_strength(strength: f64) {
    ENGAGEMENT_STRENGTH.with(|s| s.set(strength));
}

/// Reset all pointer state (for testing).
pub fn reset_pointer_state() {
    POINTER_X.with(|s| s.set(0.0));
    POINTER_Y.with(|s| s.set(0.0));
    IS_POINTER_DOWN.with(|s| s.set(false));
    ENGAGED_TARGET.with(|s| s.set(None));
    ENGAGEMENT_STRENGTH.with(|s| s.set(0.0));
}

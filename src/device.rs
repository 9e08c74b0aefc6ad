//! Device detection - the mobile policy gate.
//!
//! The highlight effect replaces the native cursor, which is useless on a
//! touch-primary device. Before attaching any listeners the controller
//! checks the device profile and declines entirely when it looks mobile:
//! touch capability on a small viewport, or a known mobile user agent.

use std::sync::OnceLock;

use regex::Regex;

// =============================================================================
// Capability Flags
// =============================================================================

bitflags::bitflags! {
    /// Device capability signals relevant to the mobile check.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DeviceFlags: u8 {
        /// At least one touch point is available.
        const TOUCH_SCREEN = 1 << 0;
        /// Viewport width is at or below the mobile cutoff.
        const SMALL_VIEWPORT = 1 << 1;
        /// User agent matches a known mobile device pattern.
        const MOBILE_USER_AGENT = 1 << 2;
    }
}

// =============================================================================
// Device Profile
// =============================================================================

/// A snapshot of the host device signals, taken once at attach time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceProfile {
    /// Number of simultaneous touch points the device reports.
    pub touch_points: u32,
    /// Current viewport width in CSS pixels.
    pub viewport_width: f64,
    /// Raw user agent string.
    pub user_agent: String,
}

fn mobile_user_agent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)android|webos|iphone|ipad|ipod|blackberry|iemobile|opera mini")
            .expect("mobile user agent pattern is valid")
    })
}

impl DeviceProfile {
    /// Create a desktop-looking profile (no touch, wide viewport).
    pub fn desktop(viewport_width: f64, user_agent: impl Into<String>) -> Self {
        Self {
            touch_points: 0,
            viewport_width,
            user_agent: user_agent.into(),
        }
    }

    /// Compute the capability flags for this profile.
    ///
    /// `mobile_max_width` is the viewport cutoff from
    /// [`CursorConfig`](crate::config::CursorConfig).
    pub fn flags(&self, mobile_max_width: f64) -> DeviceFlags {
        let mut flags = DeviceFlags::empty();
        if self.touch_points > 0 {
            flags |= DeviceFlags::TOUCH_SCREEN;
        }
        if self.viewport_width <= mobile_max_width {
            flags |= DeviceFlags::SMALL_VIEWPORT;
        }
        if mobile_user_agent_pattern().is_match(&self.user_agent) {
            flags |= DeviceFlags::MOBILE_USER_AGENT;
        }
        flags
    }

    /// Whether the effect should be disabled for this device.
    ///
    /// Mobile means: touch screen AND small viewport, or a mobile user
    /// agent regardless of viewport.
    pub fn is_mobile(&self, mobile_max_width: f64) -> bool {
        let flags = self.flags(mobile_max_width);
        flags.contains(DeviceFlags::TOUCH_SCREEN | DeviceFlags::SMALL_VIEWPORT)
            || flags.contains(DeviceFlags::MOBILE_USER_AGENT)
    }
}

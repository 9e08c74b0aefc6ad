//! # reticle
//!
//! Reactive pointer highlight controller.
//!
//! A custom cursor overlay for interactive pages: in its idle state it
//! follows the pointer and spins in place; when the pointer enters a
//! registered interactive element, it morphs into four corner brackets
//! that frame the element and track its live bounds through scroll and
//! layout shifts. Hover ends, the brackets collapse back into the idle
//! cluster and the spin resumes where it left off.
//!
//! ## Architecture
//!
//! The controller is an explicit state machine (`Idle` / `Engaged`) fed by
//! [`PointerEvent`] messages. Everything it touches is behind a seam:
//!
//! - [`Stage`] - the document: bounds queries, hit testing, parent links,
//!   the interactive-target marker, overlay presence
//! - [`AnimationEngine`] - tweens, the idle-spin loop, delayed calls;
//!   [`TweenEngine`] is the provided deterministic implementation
//! - [`DeviceProfile`] - the touch/mobile gate that disables the effect
//!   where a custom cursor is useless
//!
//! Observable state (pointer position, engaged target, engagement
//! strength) is published through [spark-signals](https://github.com/RLabs-Inc/spark-signals)
//! signals in [`state`].
//!
//! ## Modules
//!
//! - [`types`] - geometry and the corner-offset math
//! - [`config`] - every timing/inset as a tunable (defaults match the
//!   reference styling)
//! - [`device`] - mobile detection policy
//! - [`stage`] - the consumed document surface
//! - [`anim`] - easing, tweens, the engine seam
//! - [`state`] - reactive pointer state
//! - [`controller`] - the pointer highlight controller itself

pub mod anim;
pub mod config;
pub mod controller;
pub mod device;
pub mod stage;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::{
    frame_corner_offsets, idle_corner_offsets, Corner, ElementId, Rect, Size, Vec2,
};

pub use config::CursorConfig;

pub use device::{DeviceFlags, DeviceProfile};

pub use stage::{resolve_target, OverlaySpec, Stage};

pub use anim::{
    acquire_engine, AnimationEngine, Channel, Easing, NodeId, Prop, TimerId, Tween, TweenEngine,
};

pub use state::{
    engaged_target, engagement_strength, is_pointer_down, pointer_x, pointer_y,
    reset_pointer_state,
};

pub use controller::{AttachDecline, PointerCursor, PointerEvent};

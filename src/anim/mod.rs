//! Animation module - easing, tweens, and the engine seam.
//!
//! - Easing: the curves the effect uses (linear + power-out family)
//! - Tween: one scalar animated over a fixed duration
//! - Engine: property addressing, the [`AnimationEngine`] trait, and the
//!   deterministic [`TweenEngine`] implementation

mod easing;
mod engine;
mod tween;

pub use easing::Easing;
pub use engine::{
    acquire_engine, AnimationEngine, Channel, NodeId, Prop, TimerId, TweenEngine,
};
pub use tween::Tween;

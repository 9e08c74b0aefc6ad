//! Animation engine - property addressing, the engine trait, and the
//! default deterministic implementation.
//!
//! The controller treats the engine as an external capability: anything
//! that can set a property, tween it over a duration, loop the idle spin,
//! and schedule/cancel a delayed call will do. [`TweenEngine`] is the
//! provided implementation, stepped explicitly through [`advance`] so a
//! host drives it from its own frame loop and tests drive it by hand.
//!
//! [`advance`]: AnimationEngine::advance

use std::collections::HashMap;

use super::easing::Easing;
use super::tween::Tween;

// =============================================================================
// Property Addressing
// =============================================================================

/// A visual node the engine can animate.
///
/// `Strength` is not a visual at all - it is the engagement-strength
/// scalar, animated exactly like any other property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// The cursor overlay wrapper.
    Cursor,
    /// The center dot.
    Dot,
    /// One of the four corner markers (0-3).
    Corner(u8),
    /// The engagement-strength scalar.
    Strength,
}

/// An animatable channel of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    X,
    Y,
    Rotation,
    Scale,
    /// The single channel of scalar nodes.
    Value,
}

/// A fully-addressed animatable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prop {
    pub node: NodeId,
    pub channel: Channel,
}

impl Prop {
    /// Address a property.
    pub const fn new(node: NodeId, channel: Channel) -> Self {
        Self { node, channel }
    }

    pub const CURSOR_X: Prop = Prop::new(NodeId::Cursor, Channel::X);
    pub const CURSOR_Y: Prop = Prop::new(NodeId::Cursor, Channel::Y);
    pub const CURSOR_ROTATION: Prop = Prop::new(NodeId::Cursor, Channel::Rotation);
    pub const CURSOR_SCALE: Prop = Prop::new(NodeId::Cursor, Channel::Scale);
    pub const DOT_SCALE: Prop = Prop::new(NodeId::Dot, Channel::Scale);
    pub const STRENGTH: Prop = Prop::new(NodeId::Strength, Channel::Value);

    /// X channel of corner marker `index` (0-3).
    pub const fn corner_x(index: u8) -> Prop {
        Prop::new(NodeId::Corner(index), Channel::X)
    }

    /// Y channel of corner marker `index` (0-3).
    pub const fn corner_y(index: u8) -> Prop {
        Prop::new(NodeId::Corner(index), Channel::Y)
    }
}

/// Handle to a scheduled delayed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

// =============================================================================
// Engine Trait
// =============================================================================

/// The tweening/timeline capability the controller consumes.
///
/// Semantics the controller relies on:
/// - [`tween`](Self::tween) overwrites: starting a tween on a prop cancels
///   any in-flight tween on that prop.
/// - [`set`](Self::set) writes the value but does NOT cancel tweens; pair
///   it with [`kill`](Self::kill) for a hard snap.
/// - [`repeat`](Self::repeat) loops forever, advancing the prop by `delta`
///   per `period` at a constant rate (the idle spin primitive).
/// - [`advance`](Self::advance) steps the clock and returns every timer
///   that fired during the step.
pub trait AnimationEngine {
    /// Write a property immediately.
    fn set(&mut self, prop: Prop, value: f64);

    /// Read a property's current value.
    fn get(&self, prop: Prop) -> f64;

    /// Animate a property to `to` over `duration` seconds. Zero duration
    /// applies on the next step. Replaces any in-flight tween on `prop`.
    fn tween(&mut self, prop: Prop, to: f64, duration: f64, easing: Easing);

    /// Cancel the in-flight tween on one property, leaving its current value.
    fn kill(&mut self, prop: Prop);

    /// Cancel every in-flight tween on a node's properties.
    fn kill_node(&mut self, node: NodeId);

    /// Loop `prop` forever, advancing by `delta` per `period` seconds.
    /// Replaces any existing loop on `prop`.
    fn repeat(&mut self, prop: Prop, delta: f64, period: f64);

    /// Pause the loop on `prop`, keeping it installed.
    fn pause_repeat(&mut self, prop: Prop);

    /// Remove the loop on `prop`.
    fn kill_repeat(&mut self, prop: Prop);

    /// Schedule a delayed call `duration` seconds from now.
    fn delay(&mut self, duration: f64) -> TimerId;

    /// Cancel a scheduled call. Unknown or already-fired ids are ignored.
    fn cancel_delay(&mut self, timer: TimerId);

    /// Step the clock by `dt` seconds: apply repeats, advance tweens, and
    /// return the timers that fired during this step.
    fn advance(&mut self, dt: f64) -> Vec<TimerId>;

    /// Current engine clock in seconds.
    fn now(&self) -> f64;
}

// =============================================================================
// Readiness
// =============================================================================

/// Poll `probe` up to `attempts` times for an engine instance.
///
/// Stands in for the load-time availability wait: the host's probe may
/// return `None` until its animation machinery is up. The bound keeps a
/// missing engine from becoming an infinite loop; exhausting it means the
/// effect declines to initialize.
pub fn acquire_engine<E, F>(mut probe: F, attempts: u32) -> Option<E>
where
    F: FnMut() -> Option<E>,
{
    for _ in 0..attempts {
        if let Some(engine) = probe() {
            return Some(engine);
        }
    }
    None
}

// =============================================================================
// TweenEngine - default implementation
// =============================================================================

#[derive(Debug, Clone)]
struct Repeat {
    delta: f64,
    period: f64,
    paused: bool,
}

/// Deterministic engine stepped by an explicit clock.
///
/// One tween per property (starting a new one overwrites), loops for the
/// idle spin, and one-shot timers for the resume debounce.
#[derive(Default)]
pub struct TweenEngine {
    clock: f64,
    props: HashMap<Prop, f64>,
    tweens: HashMap<Prop, Tween>,
    repeats: HashMap<Prop, Repeat>,
    timers: Vec<(TimerId, f64)>,
    next_timer: u64,
}

impl TweenEngine {
    /// Create an engine with the clock at zero and all properties unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of in-flight tweens (for inspection in tests).
    pub fn active_tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// Whether a loop is installed and running on `prop`.
    pub fn is_repeating(&self, prop: Prop) -> bool {
        self.repeats.get(&prop).is_some_and(|r| !r.paused)
    }

    /// Whether a timer is still pending.
    pub fn is_pending(&self, timer: TimerId) -> bool {
        self.timers.iter().any(|(id, _)| *id == timer)
    }
}

impl AnimationEngine for TweenEngine {
    fn set(&mut self, prop: Prop, value: f64) {
        self.props.insert(prop, value);
    }

    fn get(&self, prop: Prop) -> f64 {
        self.props.get(&prop).copied().unwrap_or(0.0)
    }

    fn tween(&mut self, prop: Prop, to: f64, duration: f64, easing: Easing) {
        let from = self.get(prop);
        self.tweens.insert(prop, Tween::new(from, to, duration, easing));
    }

    fn kill(&mut self, prop: Prop) {
        self.tweens.remove(&prop);
    }

    fn kill_node(&mut self, node: NodeId) {
        self.tweens.retain(|prop, _| prop.node != node);
    }

    fn repeat(&mut self, prop: Prop, delta: f64, period: f64) {
        self.repeats.insert(
            prop,
            Repeat {
                delta,
                period: period.max(f64::EPSILON),
                paused: false,
            },
        );
    }

    fn pause_repeat(&mut self, prop: Prop) {
        if let Some(repeat) = self.repeats.get_mut(&prop) {
            repeat.paused = true;
        }
    }

    fn kill_repeat(&mut self, prop: Prop) {
        self.repeats.remove(&prop);
    }

    fn delay(&mut self, duration: f64) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push((id, self.clock + duration.max(0.0)));
        id
    }

    fn cancel_delay(&mut self, timer: TimerId) {
        self.timers.retain(|(id, _)| *id != timer);
    }

    fn advance(&mut self, dt: f64) -> Vec<TimerId> {
        let dt = dt.max(0.0);
        self.clock += dt;

        // Loops first: a tween installed on the same prop wins below.
        let mut looped: Vec<(Prop, f64)> = Vec::new();
        for (prop, repeat) in &self.repeats {
            if !repeat.paused {
                let value = self.props.get(prop).copied().unwrap_or(0.0);
                looped.push((*prop, value + repeat.delta * dt / repeat.period));
            }
        }
        for (prop, value) in looped {
            self.props.insert(prop, value);
        }

        let mut finished: Vec<Prop> = Vec::new();
        for (prop, tween) in self.tweens.iter_mut() {
            let value = tween.step(dt);
            self.props.insert(*prop, value);
            if tween.finished() {
                finished.push(*prop);
            }
        }
        for prop in finished {
            self.tweens.remove(&prop);
        }

        let clock = self.clock;
        let mut fired: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|(_, deadline)| *deadline <= clock)
            .map(|(id, _)| *id)
            .collect();
        fired.sort_by_key(|id| id.0);
        self.timers.retain(|(_, deadline)| *deadline > clock);
        fired
    }

    fn now(&self) -> f64 {
        self.clock
    }
}

//! Pointer Highlight Controller.
//!
//! The single component of the crate: a custom cursor overlay that idles
//! as a rotating spinner and, when a registered interactive element is
//! hovered, morphs into four corner brackets framing that element's live
//! bounds.
//!
//! The controller is an explicit state machine with two phases:
//!
//! - `Idle` - the overlay follows the pointer and spins in place
//! - `Engaged` - a target is framed; every frame re-reads the target's
//!   current bounds and re-targets the corner markers
//!
//! All mutation happens through [`PointerCursor::handle`] message
//! dispatch. The host translates its native events (mouse move, button
//! down/up, hover enter/leave, scroll, animation frame) into
//! [`PointerEvent`]s; nothing else touches the state.
//!
//! # Example
//!
//! ```ignore
//! use reticle::{CursorConfig, PointerCursor, PointerEvent, TweenEngine};
//!
//! let mut cursor = PointerCursor::attach(
//!     stage,
//!     &device_profile,
//!     || Some(TweenEngine::new()),
//!     CursorConfig::default(),
//! )?;
//!
//! // per frame:
//! cursor.handle(PointerEvent::Tick { dt: frame_dt });
//! ```

use log::debug;
use thiserror::Error;

use crate::anim::{acquire_engine, AnimationEngine, Easing, NodeId, Prop, TimerId};
use crate::config::CursorConfig;
use crate::device::DeviceProfile;
use crate::stage::{resolve_target, Stage};
use crate::state;
use crate::types::{frame_corner_offsets, idle_corner_offsets, ElementId, Vec2};

// =============================================================================
// Events
// =============================================================================

/// An input message for the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to a viewport position.
    Move { x: f64, y: f64 },
    /// Pointer button pressed.
    Down,
    /// Pointer button released.
    Up,
    /// Pointer moved over an element (the event's direct target; the
    /// controller resolves the nearest registered ancestor-or-self).
    Over { element: ElementId },
    /// Pointer left the engaged target.
    Leave,
    /// Document scrolled.
    Scroll,
    /// Animation frame: step the engine clock by `dt` seconds.
    Tick { dt: f64 },
}

// =============================================================================
// Attach Decline
// =============================================================================

/// Why `attach` declined to initialize.
///
/// None of these are faults - the effect is a best-effort enhancement and
/// callers typically log and move on, leaving the native cursor alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttachDecline {
    /// Touch-primary device or mobile user agent; the effect would be
    /// useless there.
    #[error("device is touch-primary or mobile; effect disabled")]
    MobileDevice,
    /// The overlay wrapper, center dot, or the four corner markers are
    /// missing from the document.
    #[error("cursor overlay structure is missing or incomplete")]
    MissingOverlay,
    /// The animation engine never became available within the poll bound.
    #[error("animation engine unavailable after {attempts} polls")]
    EngineUnavailable { attempts: u32 },
}

// =============================================================================
// Phase
// =============================================================================

/// An active engagement: the framed target and the corner offsets the
/// markers are currently steering toward (relative to the target center).
#[derive(Debug, Clone, PartialEq)]
struct Engagement {
    target: ElementId,
    corners: [Vec2; 4],
}

/// Controller phase. The frame updater only exists while `Engaged` holds
/// an [`Engagement`]; dropping it IS the unsubscription.
#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Engaged(Engagement),
}

// =============================================================================
// Controller
// =============================================================================

/// The pointer highlight controller. See the module docs.
pub struct PointerCursor<S: Stage, E: AnimationEngine> {
    stage: S,
    engine: E,
    config: CursorConfig,
    phase: Phase,
    /// Pending idle-resume debounce, if a leave just happened.
    resume_timer: Option<TimerId>,
    /// Last pointer position fed through `Move`.
    pointer: Vec2,
    attached: bool,
}

impl<S: Stage, E: AnimationEngine> PointerCursor<S, E> {
    /// Attach the effect.
    ///
    /// Declines (without side effects on the document) when the device is
    /// mobile, the overlay structure is incomplete, or the engine probe
    /// never yields within `config.engine_poll_attempts` polls. On
    /// success: hides the native cursor, centers the overlay in the
    /// viewport, parks the corners in their idle cluster, and starts the
    /// idle spin.
    pub fn attach<F>(
        mut stage: S,
        profile: &DeviceProfile,
        engine_probe: F,
        config: CursorConfig,
    ) -> Result<Self, AttachDecline>
    where
        F: FnMut() -> Option<E>,
    {
        if profile.is_mobile(config.mobile_max_width) {
            debug!("pointer cursor: declining attach on mobile device");
            return Err(AttachDecline::MobileDevice);
        }

        if !stage.overlay().is_some_and(|spec| spec.is_complete()) {
            debug!("pointer cursor: overlay structure missing, declining attach");
            return Err(AttachDecline::MissingOverlay);
        }

        let attempts = config.engine_poll_attempts;
        let Some(mut engine) = acquire_engine(engine_probe, attempts) else {
            debug!("pointer cursor: animation engine unavailable after {attempts} polls");
            return Err(AttachDecline::EngineUnavailable { attempts });
        };

        if config.hide_native_cursor {
            stage.set_native_cursor_hidden(true);
        }

        let center = stage.viewport().center();
        engine.set(Prop::CURSOR_X, center.x);
        engine.set(Prop::CURSOR_Y, center.y);
        engine.set(Prop::CURSOR_ROTATION, 0.0);
        engine.set(Prop::CURSOR_SCALE, 1.0);
        engine.set(Prop::DOT_SCALE, 1.0);
        engine.set(Prop::STRENGTH, 0.0);
        for (index, offset) in idle_corner_offsets(config.corner_size).iter().enumerate() {
            engine.set(Prop::corner_x(index as u8), offset.x);
            engine.set(Prop::corner_y(index as u8), offset.y);
        }
        engine.repeat(Prop::CURSOR_ROTATION, 360.0, config.spin_period);

        state::set_pointer(center.x, center.y);
        state::set_engaged_target(None);
        state::set_engagement_strength(0.0);

        debug!("pointer cursor: attached");
        Ok(Self {
            stage,
            engine,
            config,
            phase: Phase::Idle,
            resume_timer: None,
            pointer: center,
            attached: true,
        })
    }

    /// Detach the effect: restore the native cursor, cancel the pending
    /// resume timer, stop all animations. Further events are ignored.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;

        if let Some(timer) = self.resume_timer.take() {
            self.engine.cancel_delay(timer);
        }
        self.phase = Phase::Idle;

        self.engine.kill_repeat(Prop::CURSOR_ROTATION);
        self.engine.kill_node(NodeId::Cursor);
        self.engine.kill_node(NodeId::Dot);
        self.engine.kill_node(NodeId::Strength);
        for index in 0..4 {
            self.engine.kill_node(NodeId::Corner(index));
        }

        self.stage.set_native_cursor_hidden(false);
        state::set_engaged_target(None);
        state::set_engagement_strength(0.0);
        debug!("pointer cursor: detached");
    }

    /// Dispatch one input message.
    pub fn handle(&mut self, event: PointerEvent) {
        if !self.attached {
            return;
        }
        match event {
            PointerEvent::Move { x, y } => self.on_move(x, y),
            PointerEvent::Down => self.on_down(),
            PointerEvent::Up => self.on_up(),
            PointerEvent::Over { element } => self.on_over(element),
            PointerEvent::Leave => self.disengage(),
            PointerEvent::Scroll => self.on_scroll(),
            PointerEvent::Tick { dt } => self.on_tick(dt),
        }
    }

    /// Currently engaged target, if any.
    pub fn engaged(&self) -> Option<ElementId> {
        match &self.phase {
            Phase::Engaged(engagement) => Some(engagement.target),
            Phase::Idle => None,
        }
    }

    /// Last pointer position fed through [`PointerEvent::Move`].
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Whether a leave just happened and the idle-resume debounce is
    /// still pending.
    pub fn has_pending_resume(&self) -> bool {
        self.resume_timer.is_some()
    }

    /// Whether the controller is attached and processing events.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// The animation engine (for inspection).
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The stage (for inspection).
    pub fn stage(&self) -> &S {
        &self.stage
    }

    // -------------------------------------------------------------------------
    // Event handlers
    // -------------------------------------------------------------------------

    fn on_move(&mut self, x: f64, y: f64) {
        self.pointer = Vec2::new(x, y);
        state::set_pointer(x, y);
        // Eased glide, never an instant jump.
        let duration = self.config.move_duration;
        self.engine.tween(Prop::CURSOR_X, x, duration, Easing::Power3Out);
        self.engine.tween(Prop::CURSOR_Y, y, duration, Easing::Power3Out);
    }

    fn on_down(&mut self) {
        state::set_pointer_down(true);
        self.engine.tween(
            Prop::DOT_SCALE,
            self.config.press_dot_scale,
            self.config.press_dot_duration,
            Easing::Power2Out,
        );
        self.engine.tween(
            Prop::CURSOR_SCALE,
            self.config.press_cursor_scale,
            self.config.press_cursor_duration,
            Easing::Power2Out,
        );
    }

    fn on_up(&mut self) {
        state::set_pointer_down(false);
        self.engine.tween(
            Prop::DOT_SCALE,
            1.0,
            self.config.press_dot_duration,
            Easing::Power2Out,
        );
        self.engine.tween(
            Prop::CURSOR_SCALE,
            1.0,
            self.config.press_cursor_duration,
            Easing::Power2Out,
        );
    }

    fn on_over(&mut self, element: ElementId) {
        let Some(target) = resolve_target(&self.stage, element) else {
            return;
        };
        // Entering the already-engaged target is a no-op.
        if self.engaged() == Some(target) {
            return;
        }
        self.engage(target);
    }

    fn on_scroll(&mut self) {
        let Phase::Engaged(engagement) = &self.phase else {
            return;
        };
        // Re-sample under the overlay's current position, not the raw
        // pointer: the overlay is what visually frames the target.
        let cursor = Vec2::new(
            self.engine.get(Prop::CURSOR_X),
            self.engine.get(Prop::CURSOR_Y),
        );
        let still_over = self
            .stage
            .element_at(cursor)
            .and_then(|element| resolve_target(&self.stage, element))
            .is_some_and(|target| target == engagement.target);
        if !still_over {
            self.disengage();
        }
    }

    fn on_tick(&mut self, dt: f64) {
        let fired = self.engine.advance(dt);
        if let Some(timer) = self.resume_timer {
            if fired.contains(&timer) {
                self.resume_timer = None;
                if matches!(self.phase, Phase::Idle) {
                    self.resume_spin();
                }
            }
        }
        self.frame_update();
        state::set_engagement_strength(self.engine.get(Prop::STRENGTH));
    }

    // -------------------------------------------------------------------------
    // Engagement transitions
    // -------------------------------------------------------------------------

    fn engage(&mut self, target: ElementId) {
        // A target with no live bounds cannot be framed.
        let Some(bounds) = self.stage.bounds_of(target) else {
            return;
        };

        // Tear down the previous engagement's bookkeeping before the new
        // one: pending idle resume, corner tweens, the spin.
        if let Some(timer) = self.resume_timer.take() {
            self.engine.cancel_delay(timer);
        }
        for index in 0..4 {
            self.engine.kill_node(NodeId::Corner(index));
        }
        self.engine.kill(Prop::CURSOR_ROTATION);
        self.engine.pause_repeat(Prop::CURSOR_ROTATION);
        self.engine.set(Prop::CURSOR_ROTATION, 0.0);

        let center = bounds.center();
        self.engine.tween(
            Prop::CURSOR_X,
            center.x,
            self.config.engage_glide_duration,
            Easing::Power2Out,
        );
        self.engine.tween(
            Prop::CURSOR_Y,
            center.y,
            self.config.engage_glide_duration,
            Easing::Power2Out,
        );

        let corners =
            frame_corner_offsets(bounds, self.config.border_width, self.config.corner_size);
        self.engine.tween(
            Prop::STRENGTH,
            1.0,
            self.config.hover_duration,
            Easing::Power2Out,
        );
        for (index, offset) in corners.iter().enumerate() {
            self.engine.tween(
                Prop::corner_x(index as u8),
                offset.x,
                self.config.corner_engage_duration,
                Easing::Power2Out,
            );
            self.engine.tween(
                Prop::corner_y(index as u8),
                offset.y,
                self.config.corner_engage_duration,
                Easing::Power2Out,
            );
        }

        // Replacing the phase drops any previous engagement, so exactly
        // one is live at a time.
        self.phase = Phase::Engaged(Engagement { target, corners });
        state::set_engaged_target(Some(target));
        debug!("pointer cursor: engaged {target:?}");
    }

    fn disengage(&mut self) {
        let Phase::Engaged(engagement) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return;
        };

        // Strength snaps to zero; the frame updater went away with the
        // engagement.
        self.engine.kill(Prop::STRENGTH);
        self.engine.set(Prop::STRENGTH, 0.0);
        state::set_engaged_target(None);
        state::set_engagement_strength(0.0);

        // All four corners return to the idle cluster together.
        for index in 0..4 {
            self.engine.kill_node(NodeId::Corner(index));
        }
        for (index, offset) in idle_corner_offsets(self.config.corner_size).iter().enumerate() {
            self.engine.tween(
                Prop::corner_x(index as u8),
                offset.x,
                self.config.corner_release_duration,
                Easing::Power3Out,
            );
            self.engine.tween(
                Prop::corner_y(index as u8),
                offset.y,
                self.config.corner_release_duration,
                Easing::Power3Out,
            );
        }

        // Debounce before the spin resumes, so enter/leave flicker across
        // element boundaries never flashes the idle state.
        self.resume_timer = Some(self.engine.delay(self.config.resume_debounce));
        debug!("pointer cursor: disengaged {:?}", engagement.target);
    }

    /// Per-frame updater, live only while engaged.
    fn frame_update(&mut self) {
        let target = match &self.phase {
            Phase::Engaged(engagement) => engagement.target,
            Phase::Idle => return,
        };

        // At zero strength the updater does no work at all - not even a
        // bounds read.
        let strength = self.engine.get(Prop::STRENGTH);
        if strength == 0.0 {
            return;
        }

        // Re-read the live bounds; a vanished target is an implicit leave.
        let Some(bounds) = self.stage.bounds_of(target) else {
            self.disengage();
            return;
        };

        let center = bounds.center();
        self.engine.set(Prop::CURSOR_X, center.x);
        self.engine.set(Prop::CURSOR_Y, center.y);

        let offsets =
            frame_corner_offsets(bounds, self.config.border_width, self.config.corner_size);
        for (index, offset) in offsets.iter().enumerate() {
            let current = Vec2::new(
                self.engine.get(Prop::corner_x(index as u8)),
                self.engine.get(Prop::corner_y(index as u8)),
            );
            // Blend toward the live frame by the strength fraction so the
            // approach stays smooth while strength ramps.
            let blended = current.lerp(*offset, strength);
            let duration = if strength >= self.config.settle_threshold {
                if self.config.parallax {
                    self.config.settle_duration
                } else {
                    0.0
                }
            } else {
                self.config.track_duration
            };
            let easing = if duration == 0.0 {
                Easing::Linear
            } else {
                Easing::Power1Out
            };
            self.engine.tween(Prop::corner_x(index as u8), blended.x, duration, easing);
            self.engine.tween(Prop::corner_y(index as u8), blended.y, duration, easing);
        }

        if let Phase::Engaged(engagement) = &mut self.phase {
            engagement.corners = offsets;
        }
    }

    /// Restart the idle spin from the current angle normalized into the
    /// spin period, so the rotation picks up without a visible snap.
    fn resume_spin(&mut self) {
        let rotation = self.engine.get(Prop::CURSOR_ROTATION).rem_euclid(360.0);
        self.engine.set(Prop::CURSOR_ROTATION, rotation);
        self.engine.kill_repeat(Prop::CURSOR_ROTATION);
        self.engine
            .repeat(Prop::CURSOR_ROTATION, 360.0, self.config.spin_period);
        debug!("pointer cursor: idle spin resumed at {rotation:.1} degrees");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use crate::anim::TweenEngine;
    use crate::stage::OverlaySpec;
    use crate::state::reset_pointer_state;
    use crate::types::{Rect, Size};

    // -------------------------------------------------------------------------
    // Fake stage
    // -------------------------------------------------------------------------

    struct ElementRec {
        parent: Option<ElementId>,
        bounds: Option<Rect>,
        target: bool,
    }

    struct StageInner {
        viewport: Size,
        elements: HashMap<ElementId, ElementRec>,
        overlay: Option<OverlaySpec>,
        native_cursor_hidden: bool,
        bounds_reads: HashMap<ElementId, u32>,
    }

    #[derive(Clone)]
    struct FakeStage(Rc<RefCell<StageInner>>);

    impl FakeStage {
        fn new() -> Self {
            Self(Rc::new(RefCell::new(StageInner {
                viewport: Size::new(1024.0, 768.0),
                elements: HashMap::new(),
                overlay: Some(OverlaySpec {
                    has_dot: true,
                    corner_count: 4,
                }),
                native_cursor_hidden: false,
                bounds_reads: HashMap::new(),
            })))
        }

        fn add(&self, id: u64, parent: Option<u64>, bounds: Option<Rect>, target: bool) {
            self.0.borrow_mut().elements.insert(
                ElementId(id),
                ElementRec {
                    parent: parent.map(ElementId),
                    bounds,
                    target,
                },
            );
        }

        fn set_bounds(&self, id: u64, bounds: Option<Rect>) {
            if let Some(rec) = self.0.borrow_mut().elements.get_mut(&ElementId(id)) {
                rec.bounds = bounds;
            }
        }

        fn bounds_reads(&self, id: u64) -> u32 {
            self.0
                .borrow()
                .bounds_reads
                .get(&ElementId(id))
                .copied()
                .unwrap_or(0)
        }

        fn native_cursor_hidden(&self) -> bool {
            self.0.borrow().native_cursor_hidden
        }

        fn set_overlay(&self, overlay: Option<OverlaySpec>) {
            self.0.borrow_mut().overlay = overlay;
        }

        fn depth(&self, id: ElementId) -> usize {
            let inner = self.0.borrow();
            let mut depth = 0;
            let mut current = inner.elements.get(&id).and_then(|rec| rec.parent);
            while let Some(parent) = current {
                depth += 1;
                current = inner.elements.get(&parent).and_then(|rec| rec.parent);
            }
            depth
        }
    }

    impl Stage for FakeStage {
        fn viewport(&self) -> Size {
            self.0.borrow().viewport
        }

        fn bounds_of(&self, element: ElementId) -> Option<Rect> {
            let mut inner = self.0.borrow_mut();
            *inner.bounds_reads.entry(element).or_insert(0) += 1;
            inner.elements.get(&element).and_then(|rec| rec.bounds)
        }

        fn element_at(&self, point: Vec2) -> Option<ElementId> {
            let hits: Vec<ElementId> = {
                let inner = self.0.borrow();
                inner
                    .elements
                    .iter()
                    .filter(|(_, rec)| rec.bounds.is_some_and(|b| b.contains(point)))
                    .map(|(id, _)| *id)
                    .collect()
            };
            hits.into_iter().max_by_key(|id| self.depth(*id))
        }

        fn parent_of(&self, element: ElementId) -> Option<ElementId> {
            self.0
                .borrow()
                .elements
                .get(&element)
                .and_then(|rec| rec.parent)
        }

        fn is_target(&self, element: ElementId) -> bool {
            self.0
                .borrow()
                .elements
                .get(&element)
                .is_some_and(|rec| rec.target)
        }

        fn overlay(&self) -> Option<OverlaySpec> {
            self.0.borrow().overlay
        }

        fn set_native_cursor_hidden(&mut self, hidden: bool) {
            self.0.borrow_mut().native_cursor_hidden = hidden;
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    const CARD_A: u64 = 2;
    const LABEL_A: u64 = 3;
    const CARD_B: u64 = 4;

    fn page() -> FakeStage {
        let stage = FakeStage::new();
        // root(1) covers the viewport; card A holds a label; card B is
        // elsewhere on the page.
        stage.add(1, None, Some(Rect::new(0.0, 0.0, 1024.0, 768.0)), false);
        stage.add(
            CARD_A,
            Some(1),
            Some(Rect::new(100.0, 50.0, 80.0, 40.0)),
            true,
        );
        stage.add(
            LABEL_A,
            Some(CARD_A),
            Some(Rect::new(110.0, 60.0, 40.0, 20.0)),
            false,
        );
        stage.add(
            CARD_B,
            Some(1),
            Some(Rect::new(300.0, 300.0, 100.0, 50.0)),
            true,
        );
        stage
    }

    fn desktop() -> DeviceProfile {
        DeviceProfile::desktop(1024.0, "Mozilla/5.0 (X11; Linux x86_64)")
    }

    fn attach(stage: &FakeStage) -> PointerCursor<FakeStage, TweenEngine> {
        reset_pointer_state();
        PointerCursor::attach(
            stage.clone(),
            &desktop(),
            || Some(TweenEngine::new()),
            CursorConfig::default(),
        )
        .expect("attach")
    }

    fn corner_pos(cursor: &PointerCursor<FakeStage, TweenEngine>, index: u8) -> Vec2 {
        Vec2::new(
            cursor.engine().get(Prop::corner_x(index)),
            cursor.engine().get(Prop::corner_y(index)),
        )
    }

    /// Corner tracking converges geometrically while engaged, so compare
    /// with a small tolerance there.
    fn assert_near(actual: Vec2, expected: Vec2) {
        assert!(
            (actual.x - expected.x).abs() < 0.01 && (actual.y - expected.y).abs() < 0.01,
            "expected {expected:?}, got {actual:?}"
        );
    }

    /// Advance in small steps so tracking tweens get to finish.
    fn run(cursor: &mut PointerCursor<FakeStage, TweenEngine>, total: f64) {
        let step: f64 = 0.05;
        let mut remaining = total;
        while remaining > 1e-9 {
            let dt = step.min(remaining);
            cursor.handle(PointerEvent::Tick { dt });
            remaining -= dt;
        }
    }

    // -------------------------------------------------------------------------
    // Attach / decline
    // -------------------------------------------------------------------------

    #[test]
    fn test_attach_centers_overlay_and_spins() {
        let stage = page();
        let cursor = attach(&stage);

        assert!(cursor.is_attached());
        assert!(stage.native_cursor_hidden());
        assert_eq!(cursor.engine().get(Prop::CURSOR_X), 512.0);
        assert_eq!(cursor.engine().get(Prop::CURSOR_Y), 384.0);
        assert!(cursor.engine().is_repeating(Prop::CURSOR_ROTATION));

        // Corners parked at the idle cluster.
        assert_eq!(corner_pos(&cursor, 0), Vec2::new(-18.0, -18.0));
        assert_eq!(corner_pos(&cursor, 2), Vec2::new(6.0, 6.0));
    }

    #[test]
    fn test_attach_declines_on_mobile() {
        reset_pointer_state();
        let stage = page();
        let profile = DeviceProfile {
            touch_points: 5,
            viewport_width: 600.0,
            user_agent: "SomeBrowser/1.0".into(),
        };

        let result: Result<PointerCursor<FakeStage, TweenEngine>, _> = PointerCursor::attach(
            stage.clone(),
            &profile,
            || Some(TweenEngine::new()),
            CursorConfig::default(),
        );

        assert_eq!(result.err(), Some(AttachDecline::MobileDevice));
        // Native cursor untouched: the effect never attached anything.
        assert!(!stage.native_cursor_hidden());
    }

    #[test]
    fn test_attach_declines_without_overlay() {
        reset_pointer_state();
        let stage = page();
        stage.set_overlay(Some(OverlaySpec {
            has_dot: true,
            corner_count: 3,
        }));

        let result: Result<PointerCursor<FakeStage, TweenEngine>, _> = PointerCursor::attach(
            stage.clone(),
            &desktop(),
            || Some(TweenEngine::new()),
            CursorConfig::default(),
        );
        assert_eq!(result.err(), Some(AttachDecline::MissingOverlay));

        stage.set_overlay(None);
        let result: Result<PointerCursor<FakeStage, TweenEngine>, _> = PointerCursor::attach(
            stage.clone(),
            &desktop(),
            || Some(TweenEngine::new()),
            CursorConfig::default(),
        );
        assert_eq!(result.err(), Some(AttachDecline::MissingOverlay));
        assert!(!stage.native_cursor_hidden());
    }

    #[test]
    fn test_attach_bounds_engine_poll() {
        reset_pointer_state();
        let stage = page();
        let config = CursorConfig {
            engine_poll_attempts: 7,
            ..CursorConfig::default()
        };

        let polls = Rc::new(RefCell::new(0u32));
        let polls_probe = polls.clone();
        let result: Result<PointerCursor<FakeStage, TweenEngine>, _> = PointerCursor::attach(
            stage.clone(),
            &desktop(),
            move || {
                *polls_probe.borrow_mut() += 1;
                None
            },
            config,
        );

        assert_eq!(
            result.err(),
            Some(AttachDecline::EngineUnavailable { attempts: 7 })
        );
        assert_eq!(*polls.borrow(), 7);
        assert!(!stage.native_cursor_hidden());
    }

    // -------------------------------------------------------------------------
    // Pointer follow / press feedback
    // -------------------------------------------------------------------------

    #[test]
    fn test_move_glides_to_pointer() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Move { x: 200.0, y: 150.0 });
        assert_eq!(cursor.pointer(), Vec2::new(200.0, 150.0));
        assert_eq!(crate::state::pointer_x(), 200.0);
        assert_eq!(crate::state::pointer_y(), 150.0);

        // Glide is eased, not an instant jump.
        cursor.handle(PointerEvent::Tick { dt: 0.05 });
        let mid_x = cursor.engine().get(Prop::CURSOR_X);
        assert!(mid_x > 512.0 - 312.0 && mid_x < 512.0, "mid glide, got {mid_x}");

        run(&mut cursor, 0.1);
        assert_eq!(cursor.engine().get(Prop::CURSOR_X), 200.0);
        assert_eq!(cursor.engine().get(Prop::CURSOR_Y), 150.0);
    }

    #[test]
    fn test_press_feedback_scales_down_and_back() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Down);
        assert!(crate::state::is_pointer_down());
        run(&mut cursor, 0.3);
        assert_eq!(cursor.engine().get(Prop::DOT_SCALE), 0.7);
        assert_eq!(cursor.engine().get(Prop::CURSOR_SCALE), 0.9);

        cursor.handle(PointerEvent::Up);
        assert!(!crate::state::is_pointer_down());
        run(&mut cursor, 0.3);
        assert_eq!(cursor.engine().get(Prop::DOT_SCALE), 1.0);
        assert_eq!(cursor.engine().get(Prop::CURSOR_SCALE), 1.0);
    }

    // -------------------------------------------------------------------------
    // Engagement
    // -------------------------------------------------------------------------

    #[test]
    fn test_over_descendant_engages_registered_ancestor() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(LABEL_A),
        });

        assert_eq!(cursor.engaged(), Some(ElementId(CARD_A)));
        assert_eq!(crate::state::engaged_target(), Some(ElementId(CARD_A)));

        // Spin stopped, rotation snapped to zero.
        assert!(!cursor.engine().is_repeating(Prop::CURSOR_ROTATION));
        assert_eq!(cursor.engine().get(Prop::CURSOR_ROTATION), 0.0);
    }

    #[test]
    fn test_over_unregistered_element_is_ignored() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(1),
        });
        assert_eq!(cursor.engaged(), None);
        assert!(cursor.engine().is_repeating(Prop::CURSOR_ROTATION));
    }

    #[test]
    fn test_engagement_frames_target_bounds() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 1.0);

        // Overlay centered on the box, strength fully ramped.
        assert_eq!(cursor.engine().get(Prop::CURSOR_X), 140.0);
        assert_eq!(cursor.engine().get(Prop::CURSOR_Y), 70.0);
        assert_eq!(cursor.engine().get(Prop::STRENGTH), 1.0);
        assert_eq!(crate::state::engagement_strength(), 1.0);

        // Corner brackets at the expected frame offsets.
        assert_near(corner_pos(&cursor, 0), Vec2::new(-43.0, -23.0));
        assert_near(corner_pos(&cursor, 1), Vec2::new(31.0, -23.0));
        assert_near(corner_pos(&cursor, 2), Vec2::new(31.0, 11.0));
        assert_near(corner_pos(&cursor, 3), Vec2::new(-43.0, 11.0));
    }

    #[test]
    fn test_reentering_engaged_target_is_idempotent() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 0.1);
        let strength_before = cursor.engine().get(Prop::STRENGTH);
        assert!(strength_before > 0.0 && strength_before < 1.0);

        // Over again, directly and via the descendant: no restart.
        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        cursor.handle(PointerEvent::Over {
            element: ElementId(LABEL_A),
        });
        assert_eq!(cursor.engine().get(Prop::STRENGTH), strength_before);

        cursor.handle(PointerEvent::Tick { dt: 0.05 });
        assert!(cursor.engine().get(Prop::STRENGTH) > strength_before);
        assert_eq!(cursor.engaged(), Some(ElementId(CARD_A)));
    }

    #[test]
    fn test_switching_targets_keeps_single_engagement() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 0.3);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_B),
        });
        assert_eq!(cursor.engaged(), Some(ElementId(CARD_B)));

        run(&mut cursor, 1.0);
        // Frame follows card B's box {300,300,100,50}: center (350,325),
        // top-left offset (-53,-28).
        assert_eq!(cursor.engine().get(Prop::CURSOR_X), 350.0);
        assert_eq!(cursor.engine().get(Prop::CURSOR_Y), 325.0);
        assert_near(corner_pos(&cursor, 0), Vec2::new(-53.0, -28.0));
    }

    // -------------------------------------------------------------------------
    // Leave / resume
    // -------------------------------------------------------------------------

    #[test]
    fn test_leave_clears_engagement_and_snaps_strength() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 0.3);
        assert_eq!(cursor.engine().get(Prop::STRENGTH), 1.0);

        cursor.handle(PointerEvent::Leave);

        // Immediately zero, before any tick.
        assert_eq!(cursor.engaged(), None);
        assert_eq!(cursor.engine().get(Prop::STRENGTH), 0.0);
        assert_eq!(crate::state::engagement_strength(), 0.0);
        assert!(cursor.has_pending_resume());

        // Corners return to the idle cluster together.
        run(&mut cursor, 0.3);
        assert_eq!(corner_pos(&cursor, 0), Vec2::new(-18.0, -18.0));
        assert_eq!(corner_pos(&cursor, 1), Vec2::new(6.0, -18.0));
        assert_eq!(corner_pos(&cursor, 2), Vec2::new(6.0, 6.0));
        assert_eq!(corner_pos(&cursor, 3), Vec2::new(-18.0, 6.0));
    }

    #[test]
    fn test_leave_unsubscribes_frame_updater() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 0.3);
        cursor.handle(PointerEvent::Leave);

        // No further bounds reads for the old target once disengaged.
        let reads = stage.bounds_reads(CARD_A);
        run(&mut cursor, 1.0);
        assert_eq!(stage.bounds_reads(CARD_A), reads);
    }

    #[test]
    fn test_idle_spin_resumes_after_debounce() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 0.3);
        cursor.handle(PointerEvent::Leave);
        assert!(!cursor.engine().is_repeating(Prop::CURSOR_ROTATION));

        run(&mut cursor, 0.1);
        assert!(!cursor.has_pending_resume());
        assert!(cursor.engine().is_repeating(Prop::CURSOR_ROTATION));
        // Resumed from a normalized angle.
        assert!(cursor.engine().get(Prop::CURSOR_ROTATION) < 360.0);
    }

    #[test]
    fn test_reentry_within_debounce_cancels_resume() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 0.3);
        cursor.handle(PointerEvent::Leave);
        assert!(cursor.has_pending_resume());

        // New engagement inside the 50ms window.
        cursor.handle(PointerEvent::Tick { dt: 0.02 });
        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_B),
        });
        assert!(!cursor.has_pending_resume());

        // The cancelled timer must never fire: the spin stays paused for
        // the whole engagement, with rotation pinned at zero.
        run(&mut cursor, 1.0);
        assert!(!cursor.engine().is_repeating(Prop::CURSOR_ROTATION));
        assert_eq!(cursor.engine().get(Prop::CURSOR_ROTATION), 0.0);
        assert_eq!(cursor.engaged(), Some(ElementId(CARD_B)));
    }

    // -------------------------------------------------------------------------
    // Frame updater
    // -------------------------------------------------------------------------

    #[test]
    fn test_zero_strength_skips_bounds_read() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        let reads_after_engage = stage.bounds_reads(CARD_A);

        // Strength has not ramped yet: the updater must not even read
        // bounds.
        cursor.handle(PointerEvent::Tick { dt: 0.0 });
        assert_eq!(stage.bounds_reads(CARD_A), reads_after_engage);

        // Once strength is non-zero the live tracking starts.
        cursor.handle(PointerEvent::Tick { dt: 0.05 });
        assert!(stage.bounds_reads(CARD_A) > reads_after_engage);
    }

    #[test]
    fn test_frame_updater_tracks_layout_shift() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 0.5);

        // The card shifts (layout change while hovered).
        stage.set_bounds(CARD_A, Some(Rect::new(200.0, 100.0, 80.0, 40.0)));
        cursor.handle(PointerEvent::Tick { dt: 0.016 });

        // Overlay recenters on the new box immediately.
        assert_eq!(cursor.engine().get(Prop::CURSOR_X), 240.0);
        assert_eq!(cursor.engine().get(Prop::CURSOR_Y), 120.0);

        // Corners settle onto the (unchanged-shape) frame offsets.
        run(&mut cursor, 0.5);
        assert_near(corner_pos(&cursor, 0), Vec2::new(-43.0, -23.0));
    }

    #[test]
    fn test_vanished_target_is_implicit_leave() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 0.3);

        stage.set_bounds(CARD_A, None);
        cursor.handle(PointerEvent::Tick { dt: 0.016 });

        assert_eq!(cursor.engaged(), None);
        assert_eq!(cursor.engine().get(Prop::STRENGTH), 0.0);
        assert!(cursor.has_pending_resume());
    }

    // -------------------------------------------------------------------------
    // Scroll re-check
    // -------------------------------------------------------------------------

    #[test]
    fn test_scroll_away_synthesizes_one_leave() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 0.5);

        // Scroll moves the card out from under the overlay.
        stage.set_bounds(CARD_A, Some(Rect::new(100.0, 500.0, 80.0, 40.0)));
        stage.set_bounds(LABEL_A, Some(Rect::new(110.0, 510.0, 40.0, 20.0)));
        cursor.handle(PointerEvent::Scroll);

        assert_eq!(cursor.engaged(), None);
        assert!(cursor.has_pending_resume());

        // A second scroll while idle is a no-op.
        cursor.handle(PointerEvent::Scroll);
        assert_eq!(cursor.engaged(), None);
        assert!(cursor.has_pending_resume());
    }

    #[test]
    fn test_scroll_over_descendant_keeps_engagement() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 0.5);

        // The overlay sits on the card's center, over the label - a
        // descendant of the engaged target. No leave.
        cursor.handle(PointerEvent::Scroll);
        assert_eq!(cursor.engaged(), Some(ElementId(CARD_A)));
    }

    // -------------------------------------------------------------------------
    // Detach
    // -------------------------------------------------------------------------

    #[test]
    fn test_detach_restores_cursor_and_ignores_events() {
        let stage = page();
        let mut cursor = attach(&stage);

        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_A),
        });
        run(&mut cursor, 0.1);

        cursor.detach();
        assert!(!cursor.is_attached());
        assert!(!stage.native_cursor_hidden());
        assert_eq!(crate::state::engaged_target(), None);

        // Detach is idempotent and later events are ignored.
        cursor.detach();
        cursor.handle(PointerEvent::Over {
            element: ElementId(CARD_B),
        });
        assert_eq!(cursor.engaged(), None);
    }
}

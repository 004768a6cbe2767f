//! Scroll coordination
//!
//! The coordinator arbitrates one vertical gesture between three parties:
//! the container's own header region (which reveals, then locks), the nested
//! scrollable descendant below the sticky child, and any ancestor
//! nested-scroll consumer. Touch tracking, the drag state machine, fling
//! hand-off and the per-frame tick all live here; rendering and raw event
//! delivery stay on the host side of [`HostBinding`].
//!
//! # States
//!
//! `Idle → Dragging → {Idle, Flinging} → Idle`. A new touch-down aborts any
//! in-flight fling synchronously and adopts its current offset as the new
//! drag baseline, so the content never jumps under the finger.

use std::sync::{Arc, Mutex, Weak};

use ceiling_animation::{AnimationScheduler, FlingConfig, FlingCurve, FlingId};
use ceiling_core::events::{event_types, PointerId};
use ceiling_core::StateTransitions;

use crate::config::TouchConfig;
use crate::nested::{DetachedParent, HostBinding, NestedScrollParent, NullHost, AXIS_VERTICAL};
use crate::resolver::{NestedTargetResolver, TargetNode};
use crate::velocity::VelocityTracker;

/// Touch-session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TouchState {
    #[default]
    Idle,
    /// Pointer movement crossed the slop; deltas scroll the container
    Dragging,
    /// A fling or linked fling session is running
    Flinging,
}

impl StateTransitions for TouchState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (TouchState::Idle, DRAG_START) => Some(TouchState::Dragging),
            (TouchState::Idle, FLING_START) => Some(TouchState::Flinging),
            (TouchState::Dragging, DRAG_END) => Some(TouchState::Idle),
            (TouchState::Dragging, FLING_START) => Some(TouchState::Flinging),
            // Touching down on a moving surface is immediately a drag
            (TouchState::Flinging, TOUCH_DOWN) => Some(TouchState::Dragging),
            (TouchState::Flinging, FLING_END) => Some(TouchState::Idle),
            _ => None,
        }
    }
}

/// Which way a fling session travels through the combined range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlingDirection {
    /// Container scrolls toward its maximum; content moves up
    Upward,
    /// The reverse: the child unwinds first, then the header reveals
    Downward,
}

/// A fling whose position space spans the nested child's offset plus this
/// container's own range
#[derive(Debug, Clone, Copy)]
struct LinkedSession {
    id: FlingId,
    direction: FlingDirection,
    /// Offset at which this container starts absorbing the curve
    boundary_start: i32,
    /// Offset at which this container stops absorbing it
    boundary_final: i32,
}

/// One applied scroll step
struct ScrollStep {
    consumed: i32,
    unconsumed: i32,
    clamped: bool,
}

/// Ceiling progress for a given offset: `(is_ceiling, scale)`.
///
/// Exactly at the scroll range the ceiling is locked and the scale is
/// exactly 1.0; anywhere else the scale is the plain ratio.
pub fn ceiling_progress(offset: i32, scroll_range: i32) -> (bool, f32) {
    if offset == scroll_range {
        (true, 1.0)
    } else if scroll_range > 0 {
        (false, offset as f32 / scroll_range as f32)
    } else {
        (false, 0.0)
    }
}

/// The nested-scroll coordination state machine
pub struct ScrollCoordinator {
    offset: i32,
    scroll_range: i32,
    state: TouchState,

    active_pointer: Option<PointerId>,
    last_touch_y: i32,
    tracker: Option<VelocityTracker>,

    touch: TouchConfig,
    fling_config: FlingConfig,

    scheduler: Weak<Mutex<AnimationScheduler>>,
    /// The container's own one-region fling
    fling: Option<FlingId>,
    last_scroller_y: i32,
    /// A fling spanning the child's offset plus this container's range
    linked: Option<LinkedSession>,

    parent: Box<dyn NestedScrollParent>,
    host: Box<dyn HostBinding>,
    /// Whether an ancestor accepted the current session
    parent_session: bool,

    ceiling_listener: Option<Box<dyn FnMut(bool, f32)>>,
    scroll_listener: Option<Box<dyn FnMut(i32)>>,
}

impl ScrollCoordinator {
    pub fn new(touch: TouchConfig, fling_config: FlingConfig) -> Self {
        Self {
            offset: 0,
            scroll_range: 0,
            state: TouchState::Idle,
            active_pointer: None,
            last_touch_y: 0,
            tracker: None,
            touch,
            fling_config,
            scheduler: Weak::new(),
            fling: None,
            last_scroller_y: 0,
            linked: None,
            parent: Box::new(DetachedParent),
            host: Box::new(NullHost),
            parent_session: false,
            ceiling_listener: None,
            scroll_listener: None,
        }
    }

    /// Create a coordinator wired to a frame-driven animation scheduler.
    pub fn with_scheduler(
        touch: TouchConfig,
        fling_config: FlingConfig,
        scheduler: &Arc<Mutex<AnimationScheduler>>,
    ) -> Self {
        let mut coordinator = Self::new(touch, fling_config);
        coordinator.scheduler = Arc::downgrade(scheduler);
        coordinator
    }

    pub fn set_scheduler(&mut self, scheduler: &Arc<Mutex<AnimationScheduler>>) {
        self.scheduler = Arc::downgrade(scheduler);
    }

    /// Install the ancestor nested-scroll consumer.
    pub fn set_parent(&mut self, parent: Box<dyn NestedScrollParent>) {
        self.parent = parent;
    }

    /// Install the host view binding.
    pub fn set_host(&mut self, host: Box<dyn HostBinding>) {
        self.host = host;
    }

    /// Listener for `(is_ceiling, scale)` pairs on every offset change.
    pub fn on_ceiling_scroll(&mut self, listener: impl FnMut(bool, f32) + 'static) {
        self.ceiling_listener = Some(Box::new(listener));
    }

    /// Listener for the raw offset on every change.
    pub fn on_scroll(&mut self, listener: impl FnMut(i32) + 'static) {
        self.scroll_listener = Some(Box::new(listener));
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn scroll_range(&self) -> i32 {
        self.scroll_range
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.fling.is_some() || self.linked.is_some()
    }

    /// Update the scroll range after a measurement pass; the offset is
    /// clamped into the new range.
    pub fn set_scroll_range(&mut self, scroll_range: i32) {
        self.scroll_range = scroll_range.max(0);
        let clamped = self.offset.clamp(0, self.scroll_range);
        if clamped != self.offset {
            self.scroll_to(clamped);
        }
    }

    // =========================================================================
    // Touch handling
    // =========================================================================

    pub fn on_touch_down(&mut self, pointer: PointerId, y: i32, time_ms: f64) {
        let was_flinging = self.abort_animations();
        if was_flinging {
            if let Some(next) = self.state.on_event(event_types::TOUCH_DOWN) {
                self.state = next;
            }
        }
        self.active_pointer = Some(pointer);
        self.last_touch_y = y;
        let tracker = self.tracker.get_or_insert_with(VelocityTracker::new);
        tracker.clear();
        tracker.add_movement(y, time_ms);
        self.parent_session = self.parent.start_session(AXIS_VERTICAL);
        tracing::trace!(pointer, y, was_flinging, "touch down");
    }

    pub fn on_touch_move(&mut self, pointer: PointerId, y: i32, time_ms: f64) {
        let Some(active) = self.active_pointer else {
            return;
        };
        if pointer != active {
            // Unknown pointer mid-gesture: transient anomaly, ignore
            return;
        }
        if let Some(tracker) = &mut self.tracker {
            tracker.add_movement(y, time_ms);
        }
        let mut delta = self.last_touch_y - y;
        if delta == 0 {
            return;
        }
        if self.parent_session {
            let (_, consumed_y) = self.parent.pre_scroll(0, delta);
            delta -= consumed_y;
        }
        if self.state != TouchState::Dragging && delta.abs() > self.touch.touch_slop {
            if let Some(next) = self.state.on_event(event_types::DRAG_START) {
                self.state = next;
            }
            delta -= self.touch.touch_slop * delta.signum();
        }
        if self.state == TouchState::Dragging {
            self.last_touch_y = y;
            let step = self.apply_scroll(delta);
            if step.clamped && !self.parent_session {
                // Dragging past a hard edge: stale momentum must not turn
                // into a fling on release
                if let Some(tracker) = &mut self.tracker {
                    tracker.clear();
                }
            }
            if self.parent_session && (step.consumed != 0 || step.unconsumed != 0) {
                self.parent.post_scroll(0, step.consumed, 0, step.unconsumed);
            }
        }
    }

    pub fn on_touch_up(&mut self, _pointer: PointerId) {
        let velocity = self
            .tracker
            .as_ref()
            .map(|t| -t.velocity(self.touch.max_fling_velocity))
            .unwrap_or(0.0);
        if velocity.abs() >= self.touch.min_fling_velocity {
            self.fling_with_nested_dispatch(velocity);
        }
        self.end_drag();
    }

    /// Identical cleanup to touch-up, without initiating a fling.
    pub fn on_touch_cancel(&mut self) {
        self.end_drag();
    }

    /// A second pointer joined; it becomes the tracked pointer.
    ///
    /// The tracker restarts from the new pointer: the position jump between
    /// fingers must not read as an instantaneous velocity.
    pub fn on_secondary_pointer_down(&mut self, pointer: PointerId, y: i32) {
        self.active_pointer = Some(pointer);
        self.last_touch_y = y;
        if let Some(tracker) = &mut self.tracker {
            tracker.clear();
        }
    }

    /// A non-final pointer left. If it was the tracked one, re-anchor to the
    /// remaining pointer; with none left, the gesture ends silently.
    pub fn on_secondary_pointer_up(
        &mut self,
        departed: PointerId,
        remaining: Option<(PointerId, i32)>,
    ) {
        if self.active_pointer != Some(departed) {
            return;
        }
        match remaining {
            Some((pointer, y)) => {
                self.active_pointer = Some(pointer);
                self.last_touch_y = y;
                if let Some(tracker) = &mut self.tracker {
                    tracker.clear();
                }
            }
            None => {
                tracing::warn!(departed, "active pointer lost with no replacement");
                self.end_drag();
            }
        }
    }

    fn end_drag(&mut self) {
        self.active_pointer = None;
        // Tracker resource is released exactly once per drag session
        self.tracker = None;
        if let Some(next) = self.state.on_event(event_types::DRAG_END) {
            self.state = next;
        }
        if self.parent_session && !self.is_animating() {
            self.parent.stop_session();
            self.parent_session = false;
        }
    }

    // =========================================================================
    // Fling
    // =========================================================================

    fn fling_with_nested_dispatch(&mut self, velocity: f32) {
        let can_fling = (self.offset > 0 || velocity > 0.0)
            && (self.offset < self.scroll_range || velocity < 0.0);
        if self.parent_session && self.parent.pre_fling(0.0, velocity) {
            return;
        }
        if self.parent_session {
            self.parent.post_fling(0.0, velocity, can_fling);
        }
        self.fling(velocity);
    }

    fn fling(&mut self, velocity: f32) {
        let velocity = velocity.clamp(
            -self.touch.max_fling_velocity,
            self.touch.max_fling_velocity,
        );
        if !self.parent_session {
            self.parent_session = self.parent.start_session(AXIS_VERTICAL);
        }
        let curve = FlingCurve::new(self.offset as f32, velocity, self.fling_config);
        let Some(scheduler) = self.scheduler.upgrade() else {
            // No frame driver: settle at the curve's end synchronously
            let end = curve.final_position().round() as i32;
            self.scroll_to(end);
            return;
        };
        let id = scheduler.lock().unwrap().add_fling(curve);
        self.fling = Some(id);
        self.last_scroller_y = self.offset;
        if let Some(next) = self.state.on_event(event_types::FLING_START) {
            self.state = next;
        }
        self.host.request_frame();
        tracing::debug!(velocity, offset = self.offset, "fling started");
    }

    // =========================================================================
    // Nested-parent role
    // =========================================================================

    /// Accept vertical nested-scroll sessions from the descendant.
    pub fn on_start_nested_scroll(&mut self, axes: u32) -> bool {
        axes & AXIS_VERTICAL != 0
    }

    /// A descendant session was accepted; chain it to our own ancestor.
    pub fn on_nested_scroll_accepted(&mut self, axes: u32) {
        self.parent_session = self.parent.start_session(axes);
    }

    pub fn on_stop_nested_scroll(&mut self) {
        if self.parent_session && !self.is_animating() {
            self.parent.stop_session();
            self.parent_session = false;
        }
    }

    /// Scroll already applied by the descendant; forward it upward.
    pub fn on_nested_scroll(&mut self, consumed_dy: i32, unconsumed_dy: i32) {
        if self.parent_session {
            self.parent.post_scroll(0, consumed_dy, 0, unconsumed_dy);
        }
    }

    /// Pre-scroll offer from the descendant. Returns the consumed portion.
    ///
    /// Upward deltas collapse the header until the ceiling locks; downward
    /// deltas reveal it again, but only once the descendant's own content
    /// sits at its top. The remainder is then offered to our ancestor.
    pub fn on_nested_pre_scroll(
        &mut self,
        resolver: &mut NestedTargetResolver,
        target: &TargetNode,
        dy: i32,
    ) -> i32 {
        let mut consumed = 0;
        if dy > 0 && self.offset < self.scroll_range {
            let take = dy.min(self.scroll_range - self.offset);
            self.scroll_to(self.offset + take);
            consumed = take;
        } else if dy < 0 && self.offset > 0 && resolver.vertical_offset(target) <= 0 {
            let take = dy.max(-self.offset);
            self.scroll_to(self.offset + take);
            consumed = take;
        }
        if self.parent_session {
            let (_, ancestor) = self.parent.pre_scroll(0, dy - consumed);
            consumed += ancestor;
        }
        consumed
    }

    /// Pre-fling offer from the descendant. True means fully consumed here
    /// (or by our ancestor); the descendant must not start its own momentum.
    pub fn on_nested_pre_fling(
        &mut self,
        resolver: &mut NestedTargetResolver,
        target: &TargetNode,
        velocity: f32,
    ) -> bool {
        if self.fling_self_consumes(resolver, target, velocity) {
            return true;
        }
        self.parent_session && self.parent.pre_fling(0.0, velocity)
    }

    /// Fling notification from the descendant; forwarded upward.
    pub fn on_nested_fling(&mut self, velocity: f32, consumed: bool) -> bool {
        if self.parent_session {
            self.parent.post_fling(0.0, velocity, consumed)
        } else {
            false
        }
    }

    /// The linked-fling decision.
    ///
    /// Starts a session over the combined child-plus-self range whenever
    /// this container still has room in the fling's direction. Reports
    /// "fully consumed" only for an upward fling whose terminal position
    /// lies within the container's own range, so the descendant's momentum
    /// never needs to start.
    fn fling_self_consumes(
        &mut self,
        resolver: &mut NestedTargetResolver,
        target: &TargetNode,
        velocity: f32,
    ) -> bool {
        if velocity.abs() < self.touch.min_fling_velocity {
            return false;
        }
        let velocity = velocity.clamp(
            -self.touch.max_fling_velocity,
            self.touch.max_fling_velocity,
        );
        let remaining = self.scroll_range - self.offset;
        let has_room = (velocity > 0.0 && remaining > 0)
            || (velocity < 0.0 && remaining < self.scroll_range);
        if !has_room {
            return false;
        }

        let child_offset = resolver.vertical_offset(target);
        let (start, boundary_start, boundary_final, direction) = if velocity > 0.0 {
            (self.offset as f32, 0, self.scroll_range, FlingDirection::Upward)
        } else {
            (
                (child_offset + self.offset) as f32,
                self.offset,
                0,
                FlingDirection::Downward,
            )
        };
        let curve = FlingCurve::new(start, velocity, self.fling_config);
        let fully_consumed = direction == FlingDirection::Upward
            && curve.final_position() <= boundary_final as f32;

        let Some(scheduler) = self.scheduler.upgrade() else {
            // No frame driver: apply the terminal state synchronously
            let end = curve.final_position().round() as i32;
            match direction {
                FlingDirection::Upward => self.scroll_to(end.min(boundary_final)),
                FlingDirection::Downward => {
                    if end <= boundary_start {
                        self.scroll_to(end.clamp(boundary_final, boundary_start));
                    }
                }
            }
            return fully_consumed;
        };
        let id = scheduler.lock().unwrap().add_fling(curve);
        self.linked = Some(LinkedSession {
            id,
            direction,
            boundary_start,
            boundary_final,
        });
        if let Some(next) = self.state.on_event(event_types::FLING_START) {
            self.state = next;
        }
        self.host.request_frame();
        tracing::debug!(
            velocity,
            child_offset,
            fully_consumed,
            ?direction,
            "linked fling started"
        );
        fully_consumed
    }

    // =========================================================================
    // Frame tick
    // =========================================================================

    /// Advance active fling sessions one frame.
    ///
    /// Call after the scheduler's own `tick(dt)`. Returns whether another
    /// frame is needed; when the last session completes, any still-open
    /// nested-scroll session is ended.
    pub fn tick(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }
        let Some(scheduler) = self.scheduler.upgrade() else {
            self.fling = None;
            self.linked = None;
            return false;
        };
        let mut active = false;

        if let Some(link) = self.linked {
            let sample = {
                let scheduler = scheduler.lock().unwrap();
                scheduler
                    .get_fling(link.id)
                    .map(|curve| (curve.value().round() as i32, curve.is_finished()))
            };
            match sample {
                Some((curr, finished)) => {
                    // Only this container's offset moves, and only while the
                    // curve is on our side of the hand-off boundary; the
                    // child's native momentum is not modeled here.
                    match link.direction {
                        FlingDirection::Upward => {
                            if curr >= link.boundary_start {
                                self.scroll_to(curr.min(link.boundary_final));
                            }
                        }
                        FlingDirection::Downward => {
                            if curr <= link.boundary_start {
                                self.scroll_to(curr.max(link.boundary_final));
                            }
                        }
                    }
                    if finished {
                        scheduler.lock().unwrap().remove_fling(link.id);
                        self.linked = None;
                    } else {
                        active = true;
                    }
                }
                None => self.linked = None,
            }
        }

        if let Some(id) = self.fling {
            let sample = {
                let scheduler = scheduler.lock().unwrap();
                scheduler
                    .get_fling(id)
                    .map(|curve| (curve.value().round() as i32, curve.is_finished()))
            };
            match sample {
                Some((y, finished)) => {
                    let dy = y - self.last_scroller_y;
                    if dy != 0 {
                        let step = self.apply_scroll(dy);
                        if self.parent_session && (step.consumed != 0 || step.unconsumed != 0) {
                            self.parent.post_scroll(0, step.consumed, 0, step.unconsumed);
                        }
                    }
                    self.last_scroller_y = y;
                    if finished {
                        scheduler.lock().unwrap().remove_fling(id);
                        self.fling = None;
                        self.last_scroller_y = 0;
                    } else {
                        active = true;
                    }
                }
                None => self.fling = None,
            }
        }

        if active {
            self.host.request_frame();
        } else {
            if let Some(next) = self.state.on_event(event_types::FLING_END) {
                self.state = next;
            }
            if self.parent_session && self.active_pointer.is_none() {
                self.parent.stop_session();
                self.parent_session = false;
            }
        }
        active
    }

    // =========================================================================
    // Offset application
    // =========================================================================

    /// Apply a delta with clamping; reports consumed/unconsumed/over-scroll.
    fn apply_scroll(&mut self, delta: i32) -> ScrollStep {
        let old = self.offset;
        let target = old + delta;
        let clamped = target > self.scroll_range || target < 0;
        self.scroll_to(target);
        let consumed = self.offset - old;
        ScrollStep {
            consumed,
            unconsumed: delta - consumed,
            clamped,
        }
    }

    fn scroll_to(&mut self, y: i32) {
        let clamped = y.clamp(0, self.scroll_range);
        if clamped == self.offset {
            return;
        }
        self.offset = clamped;
        self.host.set_visible_offset(clamped);
        self.host.request_redraw();
        tracing::trace!(offset = clamped, range = self.scroll_range, "scroll");
        let (is_ceiling, scale) = ceiling_progress(self.offset, self.scroll_range);
        if let Some(listener) = &mut self.ceiling_listener {
            listener(is_ceiling, scale);
        }
        if let Some(listener) = &mut self.scroll_listener {
            listener(self.offset);
        }
    }

    fn abort_animations(&mut self) -> bool {
        let fling = self.fling.take();
        let linked = self.linked.take();
        let was_flinging = fling.is_some() || linked.is_some();
        if let Some(scheduler) = self.scheduler.upgrade() {
            let mut scheduler = scheduler.lock().unwrap();
            if let Some(id) = fling {
                scheduler.remove_fling(id);
            }
            if let Some(link) = linked {
                scheduler.remove_fling(link.id);
            }
        }
        self.last_scroller_y = 0;
        was_flinging
    }
}

//! The ceiling container
//!
//! Ties the pieces together: measurement validates the child arrangement and
//! produces the scroll range, the coordinator arbitrates gestures over that
//! range, and the resolver unwraps nested-scroll targets. The container is
//! the only type a host integration needs to hold.

use std::sync::{Arc, Mutex};

use ceiling_animation::{AnimationScheduler, FlingConfig};
use ceiling_core::events::{TouchEvent, TouchPhase};
use ceiling_core::ConfigError;

use crate::config::{CeilingConfig, TouchConfig};
use crate::coordinator::{ceiling_progress, ScrollCoordinator, TouchState};
use crate::measure::{measure_ceiling, CeilingGeometry, ChildSpec};
use crate::nested::{HostBinding, NestedScrollParent};
use crate::resolver::{NestedTargetResolver, TargetNode};

/// Sticky-header scroll container
///
/// Children above the sticky child form a collapsible header; the sticky
/// child pins at the top (the "ceiling") once the header has scrolled away,
/// and the single trailing child fills the remaining height.
pub struct CeilingLayout {
    config: CeilingConfig,
    touch: TouchConfig,
    geometry: Option<CeilingGeometry>,
    coordinator: ScrollCoordinator,
    resolver: NestedTargetResolver,
}

impl CeilingLayout {
    pub fn new(config: CeilingConfig) -> Self {
        Self::with_touch_config(config, TouchConfig::default(), FlingConfig::default())
    }

    pub fn with_touch_config(
        config: CeilingConfig,
        touch: TouchConfig,
        fling: FlingConfig,
    ) -> Self {
        Self {
            config,
            touch,
            geometry: None,
            coordinator: ScrollCoordinator::new(touch, fling),
            resolver: NestedTargetResolver::new(),
        }
    }

    /// Wire the container to a frame-driven animation scheduler.
    pub fn set_scheduler(&mut self, scheduler: &Arc<Mutex<AnimationScheduler>>) {
        self.coordinator.set_scheduler(scheduler);
    }

    /// Install the ancestor nested-scroll consumer.
    pub fn set_parent(&mut self, parent: Box<dyn NestedScrollParent>) {
        self.coordinator.set_parent(parent);
    }

    /// Install the host view binding.
    pub fn set_host(&mut self, host: Box<dyn HostBinding>) {
        self.coordinator.set_host(host);
    }

    pub fn config(&self) -> &CeilingConfig {
        &self.config
    }

    pub fn touch_config(&self) -> &TouchConfig {
        &self.touch
    }

    /// Geometry from the last successful measurement pass, if any.
    pub fn geometry(&self) -> Option<&CeilingGeometry> {
        self.geometry.as_ref()
    }

    pub fn offset(&self) -> i32 {
        self.coordinator.offset()
    }

    pub fn scroll_range(&self) -> i32 {
        self.coordinator.scroll_range()
    }

    pub fn state(&self) -> TouchState {
        self.coordinator.state()
    }

    pub fn is_animating(&self) -> bool {
        self.coordinator.is_animating()
    }

    /// Current `(is_ceiling, scale)` pair.
    pub fn ceiling_state(&self) -> (bool, f32) {
        ceiling_progress(self.coordinator.offset(), self.coordinator.scroll_range())
    }

    /// Scrollbar-facing total range: the measured height plus the hidden
    /// header travel, so thumb proportions account for the collapsible part.
    pub fn computed_vertical_scroll_range(&self) -> i32 {
        match &self.geometry {
            Some(geometry) => geometry.measured_height + geometry.scroll_range,
            None => 0,
        }
    }

    /// Listener for `(is_ceiling, scale)` pairs on every offset change.
    pub fn on_ceiling_scroll(&mut self, listener: impl FnMut(bool, f32) + 'static) {
        self.coordinator.on_ceiling_scroll(listener);
    }

    /// Listener for the raw offset on every change.
    pub fn on_scroll(&mut self, listener: impl FnMut(i32) + 'static) {
        self.coordinator.on_scroll(listener);
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the configuration. The current measurement is discarded; the
    /// host must run another measurement pass before gestures resume.
    pub fn set_config(&mut self, config: CeilingConfig) {
        self.config = config;
        self.geometry = None;
        self.resolver.invalidate();
    }

    /// Move the sticky child at runtime.
    pub fn set_sticky_child_index(&mut self, index: i32) {
        let mut config = self.config;
        config.sticky_child_index = index;
        self.set_config(config);
    }

    /// Change the visible allowance above the pinned child at runtime.
    pub fn set_offset_allowance(&mut self, allowance: i32) {
        let mut config = self.config;
        config.offset_allowance = allowance;
        self.set_config(config);
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Run the ceiling measurement pass.
    ///
    /// Returns `Ok(None)` when ceiling behavior is disabled; the container
    /// then acts as a plain vertical stack. On success the scroll range is
    /// pushed into the coordinator, with the current offset clamped to it.
    pub fn measure(
        &mut self,
        children: &[ChildSpec],
        min_height: i32,
    ) -> Result<Option<CeilingGeometry>, ConfigError> {
        if !self.config.is_enabled() {
            self.geometry = None;
            self.coordinator.set_scroll_range(0);
            return Ok(None);
        }
        let geometry = measure_ceiling(children, &self.config, min_height)?;
        self.coordinator.set_scroll_range(geometry.scroll_range);
        self.geometry = Some(geometry);
        Ok(Some(geometry))
    }

    // =========================================================================
    // Touch input
    // =========================================================================

    /// Feed one touch sample. Ignored while ceiling behavior is disabled.
    pub fn handle_touch(&mut self, event: TouchEvent) {
        if !self.config.is_enabled() {
            return;
        }
        match event.phase {
            TouchPhase::Down => {
                self.coordinator
                    .on_touch_down(event.pointer_id, event.y, event.time_ms)
            }
            TouchPhase::Move => {
                self.coordinator
                    .on_touch_move(event.pointer_id, event.y, event.time_ms)
            }
            TouchPhase::Up => self.coordinator.on_touch_up(event.pointer_id),
            TouchPhase::Cancel => self.coordinator.on_touch_cancel(),
        }
    }

    /// A secondary pointer joined the gesture.
    pub fn handle_pointer_down(&mut self, pointer: i32, y: i32) {
        if self.config.is_enabled() {
            self.coordinator.on_secondary_pointer_down(pointer, y);
        }
    }

    /// A non-final pointer left the gesture.
    pub fn handle_pointer_up(&mut self, departed: i32, remaining: Option<(i32, i32)>) {
        if self.config.is_enabled() {
            self.coordinator.on_secondary_pointer_up(departed, remaining);
        }
    }

    /// Advance fling sessions one frame; returns whether more are needed.
    pub fn tick(&mut self) -> bool {
        self.coordinator.tick()
    }

    // =========================================================================
    // Nested-parent role
    // =========================================================================

    /// Whether to accept a descendant's nested-scroll session.
    pub fn on_start_nested_scroll(&mut self, axes: u32) -> bool {
        self.config.is_enabled() && self.coordinator.on_start_nested_scroll(axes)
    }

    pub fn on_nested_scroll_accepted(&mut self, axes: u32) {
        self.coordinator.on_nested_scroll_accepted(axes);
    }

    pub fn on_stop_nested_scroll(&mut self) {
        self.coordinator.on_stop_nested_scroll();
    }

    /// Pre-scroll offer from the descendant; returns the consumed portion.
    pub fn on_nested_pre_scroll(&mut self, target: &TargetNode, dy: i32) -> i32 {
        self.coordinator
            .on_nested_pre_scroll(&mut self.resolver, target, dy)
    }

    /// Scroll already applied by the descendant, forwarded upward.
    pub fn on_nested_scroll(&mut self, consumed_dy: i32, unconsumed_dy: i32) {
        self.coordinator.on_nested_scroll(consumed_dy, unconsumed_dy);
    }

    /// Pre-fling offer from the descendant; true means it must not start its
    /// own momentum.
    pub fn on_nested_pre_fling(&mut self, target: &TargetNode, velocity: f32) -> bool {
        self.coordinator
            .on_nested_pre_fling(&mut self.resolver, target, velocity)
    }

    pub fn on_nested_fling(&mut self, velocity: f32, consumed: bool) -> bool {
        self.coordinator.on_nested_fling(velocity, consumed)
    }

    /// Access the target resolver, e.g. to register offset strategies.
    pub fn resolver_mut(&mut self) -> &mut NestedTargetResolver {
        &mut self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::TargetKind;

    fn measured_layout() -> CeilingLayout {
        let mut layout = CeilingLayout::new(CeilingConfig::new(1));
        let children = [ChildSpec::new(300), ChildSpec::new(48), ChildSpec::new(600)];
        layout.measure(&children, 800).unwrap();
        layout
    }

    #[test]
    fn measurement_feeds_the_coordinator() {
        let layout = measured_layout();
        assert_eq!(layout.scroll_range(), 300);
        assert_eq!(layout.geometry().unwrap().trailing_fill_height, 800 - 48);
    }

    #[test]
    fn disabled_container_measures_to_nothing() {
        let mut layout = CeilingLayout::new(CeilingConfig::default());
        let children = [ChildSpec::new(300), ChildSpec::new(48), ChildSpec::new(600)];
        assert_eq!(layout.measure(&children, 800).unwrap(), None);
        assert_eq!(layout.scroll_range(), 0);
        assert!(!layout.on_start_nested_scroll(crate::nested::AXIS_VERTICAL));
    }

    #[test]
    fn invalid_arrangement_surfaces_the_error() {
        let mut layout = CeilingLayout::new(CeilingConfig::new(0));
        let children = [ChildSpec::new(300), ChildSpec::new(48), ChildSpec::new(600)];
        assert_eq!(
            layout.measure(&children, 800).unwrap_err(),
            ConfigError::StickyIndexAtTop
        );
    }

    #[test]
    fn reconfiguration_discards_the_measurement() {
        let mut layout = measured_layout();
        layout.set_offset_allowance(40);
        assert!(layout.geometry().is_none());
        let children = [ChildSpec::new(300), ChildSpec::new(48), ChildSpec::new(600)];
        layout.measure(&children, 800).unwrap();
        assert_eq!(layout.scroll_range(), 260);
    }

    #[test]
    fn touch_drag_collapses_the_header() {
        let mut layout = measured_layout();
        layout.handle_touch(TouchEvent::new(TouchPhase::Down, 0, 500, 0.0));
        layout.handle_touch(TouchEvent::new(TouchPhase::Move, 0, 400, 16.0));
        assert_eq!(layout.offset(), 100 - 8);
        layout.handle_touch(TouchEvent::new(TouchPhase::Cancel, 0, 400, 32.0));
        assert_eq!(layout.state(), TouchState::Idle);
    }

    #[test]
    fn disabled_container_ignores_touches() {
        let mut layout = CeilingLayout::new(CeilingConfig::default());
        layout.handle_touch(TouchEvent::new(TouchPhase::Down, 0, 500, 0.0));
        layout.handle_touch(TouchEvent::new(TouchPhase::Move, 0, 300, 16.0));
        assert_eq!(layout.offset(), 0);
        assert_eq!(layout.state(), TouchState::Idle);
    }

    #[test]
    fn nested_scroll_through_a_refresh_wrapper() {
        let mut layout = measured_layout();
        let target = TargetNode::new(1, TargetKind::RefreshWrapper)
            .with_content_index(0)
            .child(TargetNode::new(2, TargetKind::NestedChild).with_offset(0));
        assert!(layout.on_start_nested_scroll(crate::nested::AXIS_VERTICAL));
        layout.on_nested_scroll_accepted(crate::nested::AXIS_VERTICAL);
        assert_eq!(layout.on_nested_pre_scroll(&target, 120), 120);
        assert_eq!(layout.offset(), 120);
        layout.on_stop_nested_scroll();
    }

    #[test]
    fn ceiling_state_tracks_the_offset() {
        let mut layout = measured_layout();
        assert_eq!(layout.ceiling_state(), (false, 0.0));
        let target = TargetNode::new(2, TargetKind::NestedChild);
        layout.on_nested_pre_scroll(&target, 300);
        assert_eq!(layout.ceiling_state(), (true, 1.0));
    }

    #[test]
    fn computed_range_includes_hidden_travel() {
        let layout = measured_layout();
        assert_eq!(layout.computed_vertical_scroll_range(), 800 + 300);
        let unmeasured = CeilingLayout::new(CeilingConfig::new(1));
        assert_eq!(unmeasured.computed_vertical_scroll_range(), 0);
    }
}

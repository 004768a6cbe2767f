//! Sliding tab-indicator state
//!
//! A marker bar that sits under the selected tab of a horizontal tab row.
//! Selecting a tab sends the marker on a short decelerate-eased travel to
//! the new slot; a pager can instead drive the marker continuously with a
//! signed drag fraction toward the adjacent slot.
//!
//! The indicator never measures or draws; the host feeds it slot geometry
//! from its own layout pass and reads the marker rectangle back.

use ceiling_animation::Easing;
use rustc_hash::FxHashMap;

/// Marker width as a fraction of the narrowest tab, used when the
/// constructor is given an out-of-range weight
const WIDTH_WEIGHT_DEFAULT: f32 = 0.8;

/// Selection travel time in seconds
const TRAVEL_DURATION_S: f32 = 0.2;

/// Horizontal extent of one tab slot, in the host's pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabSlot {
    pub left: f32,
    pub width: f32,
}

impl TabSlot {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }
}

/// An in-flight marker travel between two slots
#[derive(Debug, Clone, Copy)]
struct Travel {
    from: f32,
    to: f32,
    elapsed: f32,
}

/// Sliding tab-indicator marker state
pub struct SliderIndicator {
    /// Left edge of each tab, keyed by tab index
    slot_left: FxHashMap<usize, f32>,
    /// Width of each tab, keyed by tab index
    slot_width: FxHashMap<usize, f32>,
    slot_count: usize,
    width_weight: f32,
    marker_width: f32,
    marker_left: f32,
    selected: usize,
    travel: Option<Travel>,
    easing: Easing,
}

impl Default for SliderIndicator {
    fn default() -> Self {
        Self::new(WIDTH_WEIGHT_DEFAULT)
    }
}

impl SliderIndicator {
    /// `width_weight` is the marker width as a fraction of the narrowest
    /// tab; values outside `[0, 1]` fall back to the default.
    pub fn new(width_weight: f32) -> Self {
        let width_weight = if (0.0..=1.0).contains(&width_weight) {
            width_weight
        } else {
            WIDTH_WEIGHT_DEFAULT
        };
        Self {
            slot_left: FxHashMap::default(),
            slot_width: FxHashMap::default(),
            slot_count: 0,
            width_weight,
            marker_width: 0.0,
            marker_left: 0.0,
            selected: 0,
            travel: None,
            easing: Easing::EaseOut,
        }
    }

    /// Rebuild slot geometry after the host's layout pass.
    ///
    /// The marker width becomes `width_weight` times the narrowest tab, and
    /// the marker snaps under the currently selected tab.
    pub fn layout(&mut self, slots: &[TabSlot]) {
        self.slot_left.clear();
        self.slot_width.clear();
        self.slot_count = slots.len();
        let mut min_width = f32::INFINITY;
        for (index, slot) in slots.iter().enumerate() {
            self.slot_left.insert(index, slot.left);
            self.slot_width.insert(index, slot.width);
            min_width = min_width.min(slot.width);
        }
        self.marker_width = if slots.is_empty() {
            0.0
        } else {
            min_width * self.width_weight
        };
        self.travel = None;
        if self.selected >= self.slot_count {
            self.selected = 0;
        }
        if let Some(left) = self.slot_marker_left(self.selected) {
            self.marker_left = left;
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Current marker rectangle along the horizontal axis: `(left, width)`.
    pub fn marker(&self) -> (f32, f32) {
        (self.marker_left, self.marker_width)
    }

    pub fn is_animating(&self) -> bool {
        self.travel.is_some()
    }

    /// Marker left edge centered under the given slot.
    fn slot_marker_left(&self, index: usize) -> Option<f32> {
        let left = *self.slot_left.get(&index)?;
        let width = *self.slot_width.get(&index)?;
        Some(left + (width - self.marker_width) / 2.0)
    }

    /// Select a tab, sending the marker on an eased travel to its slot.
    ///
    /// An in-flight travel is superseded from the marker's current position,
    /// so rapid re-selection never jumps. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index >= self.slot_count || index == self.selected {
            return;
        }
        let Some(to) = self.slot_marker_left(index) else {
            return;
        };
        self.travel = Some(Travel {
            from: self.marker_left,
            to,
            elapsed: 0.0,
        });
        self.selected = index;
        tracing::trace!(index, to, "slider travel started");
    }

    /// Pager-driven tracking: place the marker between the selected slot and
    /// its neighbor according to a signed drag fraction.
    ///
    /// A positive fraction moves toward the next slot, a negative one toward
    /// the previous; at the edges the marker stays put in that direction.
    /// Cancels any selection travel.
    pub fn follow(&mut self, index: usize, fraction: f32) {
        if index >= self.slot_count {
            return;
        }
        self.travel = None;
        self.selected = index;
        let Some(base) = self.slot_marker_left(index) else {
            return;
        };
        let neighbor = if fraction > 0.0 {
            self.slot_marker_left(index + 1)
        } else {
            index.checked_sub(1).and_then(|i| self.slot_marker_left(i))
        };
        self.marker_left = match neighbor {
            Some(stop) => base + (stop - base).abs() * fraction,
            None => base,
        };
    }

    /// Advance an active travel; returns whether another frame is needed.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(mut travel) = self.travel else {
            return false;
        };
        travel.elapsed = (travel.elapsed + dt.max(0.0)).min(TRAVEL_DURATION_S);
        let t = travel.elapsed / TRAVEL_DURATION_S;
        let eased = self.easing.apply(t);
        self.marker_left = travel.from + (travel.to - travel.from) * eased;
        if travel.elapsed >= TRAVEL_DURATION_S {
            self.marker_left = travel.to;
            self.travel = None;
            false
        } else {
            self.travel = Some(travel);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tabs() -> Vec<TabSlot> {
        vec![
            TabSlot::new(0.0, 100.0),
            TabSlot::new(100.0, 60.0),
            TabSlot::new(160.0, 120.0),
        ]
    }

    fn run_travel(indicator: &mut SliderIndicator) {
        for _ in 0..100 {
            if !indicator.tick(0.016) {
                return;
            }
        }
        panic!("travel never completed");
    }

    #[test]
    fn marker_width_follows_the_narrowest_tab() {
        let mut indicator = SliderIndicator::default();
        indicator.layout(&three_tabs());
        let (_, width) = indicator.marker();
        assert!((width - 60.0 * 0.8).abs() < 1e-4);
    }

    #[test]
    fn out_of_range_weight_falls_back_to_default() {
        let indicator = SliderIndicator::new(1.7);
        assert!((indicator.width_weight - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn layout_snaps_the_marker_under_the_selection() {
        let mut indicator = SliderIndicator::default();
        indicator.layout(&three_tabs());
        let (left, width) = indicator.marker();
        // Centered in the 100 px first tab
        assert!((left + width / 2.0 - 50.0).abs() < 1e-4);
    }

    #[test]
    fn select_travels_to_the_slot_center() {
        let mut indicator = SliderIndicator::default();
        indicator.layout(&three_tabs());
        indicator.select(2);
        assert!(indicator.is_animating());
        run_travel(&mut indicator);
        let (left, width) = indicator.marker();
        // Centered in the third tab: 160 + 120/2 = 220
        assert!((left + width / 2.0 - 220.0).abs() < 1e-4);
        assert_eq!(indicator.selected(), 2);
    }

    #[test]
    fn reselect_mid_travel_continues_from_the_current_position() {
        let mut indicator = SliderIndicator::default();
        indicator.layout(&three_tabs());
        indicator.select(2);
        indicator.tick(0.016);
        let (mid_left, _) = indicator.marker();
        indicator.select(0);
        indicator.tick(0.0);
        let (after_left, _) = indicator.marker();
        assert!((after_left - mid_left).abs() < 1e-4, "marker jumped");
        run_travel(&mut indicator);
        let (left, width) = indicator.marker();
        assert!((left + width / 2.0 - 50.0).abs() < 1e-4);
    }

    #[test]
    fn follow_interpolates_toward_the_next_slot() {
        let mut indicator = SliderIndicator::default();
        indicator.layout(&three_tabs());
        let base = indicator.marker().0;
        indicator.follow(0, 0.5);
        let halfway = indicator.marker().0;
        indicator.follow(0, 1.0);
        let full = indicator.marker().0;
        assert!(halfway > base);
        assert!((halfway - (base + (full - base) / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn follow_at_the_edge_stays_put() {
        let mut indicator = SliderIndicator::default();
        indicator.layout(&three_tabs());
        let base = indicator.marker().0;
        indicator.follow(0, -0.6);
        assert!((indicator.marker().0 - base).abs() < 1e-4);
    }

    #[test]
    fn invalid_selection_is_ignored() {
        let mut indicator = SliderIndicator::default();
        indicator.layout(&three_tabs());
        indicator.select(9);
        assert_eq!(indicator.selected(), 0);
        assert!(!indicator.is_animating());
    }
}

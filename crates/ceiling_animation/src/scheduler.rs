//! Animation scheduler
//!
//! Holds the active fling curves and advances them each frame. The host
//! integration owns one scheduler, calls [`AnimationScheduler::tick`] from
//! its per-frame callback, and keeps scheduling frames while
//! [`AnimationScheduler::has_active_animations`] reports activity.

use crate::fling::FlingCurve;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct FlingId;
}

/// The animation scheduler that ticks all active fling curves
pub struct AnimationScheduler {
    flings: SlotMap<FlingId, FlingCurve>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            flings: SlotMap::with_key(),
        }
    }

    pub fn add_fling(&mut self, curve: FlingCurve) -> FlingId {
        tracing::trace!(
            "fling added: final={:.1} duration={:.3}s",
            curve.final_position(),
            curve.duration()
        );
        self.flings.insert(curve)
    }

    pub fn get_fling(&self, id: FlingId) -> Option<&FlingCurve> {
        self.flings.get(id)
    }

    pub fn remove_fling(&mut self, id: FlingId) -> Option<FlingCurve> {
        self.flings.remove(id)
    }

    /// Advance all curves by `dt` seconds.
    ///
    /// Finished curves stay until their owner removes them; owners read the
    /// terminal value on their next tick before cleaning up.
    pub fn tick(&mut self, dt: f32) {
        for (_, curve) in self.flings.iter_mut() {
            curve.step(dt);
        }
    }

    /// Check if any curve is still moving
    pub fn has_active_animations(&self) -> bool {
        self.flings.iter().any(|(_, c)| !c.is_finished())
    }

    /// Number of tracked curves, finished or not
    pub fn fling_count(&self) -> usize {
        self.flings.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

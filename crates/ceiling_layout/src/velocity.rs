//! Touch velocity tracking
//!
//! Accumulates pointer samples during a drag and estimates the release
//! velocity with an exponential moving average. Samples separated by more
//! than half a second are treated as a fresh start; a finger resting still
//! should not inherit stale momentum.

/// Smoothing factor for the exponential moving average
const ALPHA: f32 = 0.3;

/// Samples further apart than this do not contribute to the estimate
const MAX_SAMPLE_GAP_S: f32 = 0.5;

/// Estimates pointer velocity along the vertical axis
///
/// One tracker lives per drag session: created on touch-down, cleared when
/// the active pointer changes, and dropped on every gesture exit path.
#[derive(Debug, Default)]
pub struct VelocityTracker {
    velocity: f32,
    last_sample: Option<(i32, f64)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one pointer sample (vertical position, timestamp in ms).
    pub fn add_movement(&mut self, y: i32, time_ms: f64) {
        if let Some((last_y, last_time)) = self.last_sample {
            let dt = ((time_ms - last_time) / 1000.0) as f32;
            if dt > 0.0 && dt < MAX_SAMPLE_GAP_S {
                let instant = (y - last_y) as f32 / dt;
                self.velocity = self.velocity * (1.0 - ALPHA) + instant * ALPHA;
            } else if dt >= MAX_SAMPLE_GAP_S {
                self.velocity = 0.0;
            }
        }
        self.last_sample = Some((y, time_ms));
    }

    /// Current estimate of pointer velocity in pixels/second, clamped to the
    /// given magnitude.
    pub fn velocity(&self, max_magnitude: f32) -> f32 {
        self.velocity.clamp(-max_magnitude, max_magnitude)
    }

    /// Discard accumulated samples, keeping the tracker alive.
    ///
    /// Used when the active pointer changes mid-gesture; momentum from the
    /// departed finger must not leak into the new one.
    pub fn clear(&mut self) {
        self.velocity = 0.0;
        self.last_sample = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_downward_drag_estimates_positive_velocity() {
        let mut tracker = VelocityTracker::new();
        // 10 px every 16 ms => 625 px/s, pointer moving down the screen
        for i in 0..20 {
            tracker.add_movement(i * 10, f64::from(i) * 16.0);
        }
        let v = tracker.velocity(8000.0);
        assert!(v > 500.0 && v < 700.0, "estimate {v} outside expected band");
    }

    #[test]
    fn upward_drag_estimates_negative_velocity() {
        let mut tracker = VelocityTracker::new();
        for i in 0..20 {
            tracker.add_movement(1000 - i * 10, f64::from(i) * 16.0);
        }
        assert!(tracker.velocity(8000.0) < -500.0);
    }

    #[test]
    fn velocity_is_clamped() {
        let mut tracker = VelocityTracker::new();
        for i in 0..20 {
            tracker.add_movement(i * 400, f64::from(i) * 16.0);
        }
        assert!((tracker.velocity(8000.0) - 8000.0).abs() < f32::EPSILON);
    }

    #[test]
    fn long_pause_resets_the_estimate() {
        let mut tracker = VelocityTracker::new();
        tracker.add_movement(0, 0.0);
        tracker.add_movement(100, 16.0);
        tracker.add_movement(100, 800.0);
        assert!(tracker.velocity(8000.0).abs() < f32::EPSILON);
    }

    #[test]
    fn clear_discards_samples() {
        let mut tracker = VelocityTracker::new();
        tracker.add_movement(0, 0.0);
        tracker.add_movement(50, 16.0);
        tracker.clear();
        assert!(tracker.velocity(8000.0).abs() < f32::EPSILON);
    }
}

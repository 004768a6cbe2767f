//! Fling physics
//!
//! A fling is a momentum scroll released with an initial velocity that decays
//! under constant deceleration. The curve is closed-form, so the terminal
//! position is known at construction time; the nested-scroll coordinator uses
//! that to decide whether a fling dies inside the container's own range
//! before the first frame ever runs.

/// Configuration for fling deceleration
#[derive(Debug, Clone, Copy)]
pub struct FlingConfig {
    /// Deceleration rate in pixels/second² (how fast momentum slows down)
    pub deceleration: f32,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            // Decelerate at 1500 px/s²
            deceleration: 1500.0,
        }
    }
}

/// A time-indexed momentum position curve
///
/// Position advances monotonically from `start` toward
/// [`final_position`](Self::final_position) and stops exactly when the
/// velocity decays to zero. The curve carries no bounds of its own; callers
/// clamp sampled values to their scroll range.
#[derive(Debug, Clone, Copy)]
pub struct FlingCurve {
    start: f32,
    velocity: f32,
    deceleration: f32,
    duration: f32,
    elapsed: f32,
}

impl FlingCurve {
    /// Create a curve from an initial position and a signed release velocity
    /// in pixels/second.
    pub fn new(start: f32, velocity: f32, config: FlingConfig) -> Self {
        let deceleration = config.deceleration.max(f32::EPSILON);
        Self {
            start,
            velocity,
            deceleration,
            duration: velocity.abs() / deceleration,
            elapsed: 0.0,
        }
    }

    /// Advance the curve by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    /// Sample the current position.
    ///
    /// Travel is clamped at the terminal distance so late samples can never
    /// round past [`final_position`](Self::final_position) and back.
    pub fn value(&self) -> f32 {
        let t = self.elapsed;
        let max_travel = self.velocity * self.velocity / (2.0 * self.deceleration);
        let travel = (self.velocity.abs() * t - 0.5 * self.deceleration * t * t).min(max_travel);
        self.start + travel * self.velocity.signum()
    }

    /// Signed velocity remaining at the current time.
    pub fn current_velocity(&self) -> f32 {
        let spent = self.deceleration * self.elapsed * self.velocity.signum();
        self.velocity - spent
    }

    /// The exact position the curve settles at, available before any frame
    /// has run.
    pub fn final_position(&self) -> f32 {
        let travel = self.velocity * self.velocity / (2.0 * self.deceleration);
        self.start + travel * self.velocity.signum()
    }

    /// Total time in seconds until the velocity decays to zero.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Whether the velocity has fully decayed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Force the curve to its terminal state.
    pub fn abort(&mut self) {
        self.elapsed = self.duration;
    }
}

//! Ceiling Animation System
//!
//! Fling physics and frame-driven scheduling for the ceiling container.
//!
//! # Features
//!
//! - **Fling curves**: constant-deceleration momentum with a closed-form
//!   terminal position, queryable before the first frame
//! - **Scheduler**: slotmap-keyed active curves, ticked once per host frame
//! - **Easing**: interpolation curves for marker travel animations
//!
//! Everything is cooperative: the host integration calls
//! [`AnimationScheduler::tick`] from its per-frame callback and nothing
//! blocks or spawns threads.

pub mod easing;
pub mod fling;
pub mod scheduler;

pub use easing::Easing;
pub use fling::{FlingConfig, FlingCurve};
pub use scheduler::{AnimationScheduler, FlingId};

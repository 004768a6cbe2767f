//! Interaction state machines
//!
//! Widget interaction states are small `Copy` enums that map `(state, event)`
//! pairs to transitions. The trait keeps the transition table next to the
//! state type and lets callers drive it with the event constants from
//! [`crate::events::event_types`].
//!
//! ```
//! use ceiling_core::events::event_types::*;
//! use ceiling_core::fsm::StateTransitions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum Gesture {
//!     #[default]
//!     Idle,
//!     Active,
//! }
//!
//! impl StateTransitions for Gesture {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Gesture::Idle, TOUCH_DOWN) => Some(Gesture::Active),
//!             (Gesture::Active, TOUCH_UP) => Some(Gesture::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut state = Gesture::Idle;
//! if let Some(next) = state.on_event(TOUCH_DOWN) {
//!     state = next;
//! }
//! assert_eq!(state, Gesture::Active);
//! ```

use std::hash::Hash;

use crate::events::EventType;

/// Trait for state types that handle event-driven transitions
///
/// Returning `None` means the event does not transition out of the current
/// state; callers keep the state unchanged.
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

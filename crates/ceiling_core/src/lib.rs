//! Ceiling Core
//!
//! Foundational primitives shared by the ceiling container crates:
//!
//! - **Event types**: touch/gesture event identifiers and payloads
//! - **State machines**: the `StateTransitions` trait interaction FSMs implement
//! - **Errors**: the fatal configuration-error taxonomy raised at measurement time

pub mod error;
pub mod events;
pub mod fsm;

pub use error::ConfigError;
pub use events::{EventType, PointerId, TouchEvent, TouchPhase};
pub use fsm::StateTransitions;

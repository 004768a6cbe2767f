//! Touch and gesture event types
//!
//! Event identifiers are plain `u32` constants so state machines can match
//! on them without depending on the full payload types.

/// Event type identifier
pub type EventType = u32;

/// Identifier of a touch pointer within a gesture (multi-touch)
pub type PointerId = i32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const TOUCH_DOWN: EventType = 1;
    pub const TOUCH_MOVE: EventType = 2;
    pub const TOUCH_UP: EventType = 3;
    pub const TOUCH_CANCEL: EventType = 4;
    /// A second (or later) pointer joined the gesture
    pub const POINTER_DOWN: EventType = 5;
    /// A non-final pointer left the gesture
    pub const POINTER_UP: EventType = 6;
    /// Accumulated movement crossed the touch slop
    pub const DRAG_START: EventType = 10;
    /// Drag session ended without a qualifying fling
    pub const DRAG_END: EventType = 11;
    /// A fling or linked fling session started
    pub const FLING_START: EventType = 12;
    /// The fling curve completed or was aborted
    pub const FLING_END: EventType = 13;
    pub const SCROLL: EventType = 30;
}

/// Phase of a touch event as delivered by the host integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single touch sample along the vertical axis
///
/// The ceiling container only arbitrates vertical scrolling, so events carry
/// the vertical coordinate and a millisecond timestamp for velocity tracking.
#[derive(Debug, Clone, Copy)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub pointer_id: PointerId,
    /// Vertical position in container-local pixels
    pub y: i32,
    /// Timestamp in milliseconds
    pub time_ms: f64,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, pointer_id: PointerId, y: i32, time_ms: f64) -> Self {
        Self {
            phase,
            pointer_id,
            y,
            time_ms,
        }
    }

    /// Event type constant for this phase
    pub fn event_type(&self) -> EventType {
        match self.phase {
            TouchPhase::Down => event_types::TOUCH_DOWN,
            TouchPhase::Move => event_types::TOUCH_MOVE,
            TouchPhase::Up => event_types::TOUCH_UP,
            TouchPhase::Cancel => event_types::TOUCH_CANCEL,
        }
    }
}

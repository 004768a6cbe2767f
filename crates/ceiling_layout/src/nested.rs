//! Nested-scroll protocol seams
//!
//! The ceiling container plays two roles: nested-scroll *parent* to its
//! descendant scrollable, and nested-scroll *child* of whatever ancestor
//! consumer sits above it. The ancestor side and the host view binding are
//! trait objects so the coordinator never touches a concrete view tree.

/// Horizontal scroll axis bit
pub const AXIS_HORIZONTAL: u32 = 1 << 0;
/// Vertical scroll axis bit
pub const AXIS_VERTICAL: u32 = 1 << 1;

/// Ancestor nested-scroll consumer
///
/// One scroll/fling session at a time: `start_session` declares intent,
/// `pre_*` offers input before the caller applies it, `post_*` reports what
/// the caller consumed and what is left over, `stop_session` closes out.
pub trait NestedScrollParent {
    /// Declare that a scroll along `axes` is starting. Returns whether an
    /// ancestor accepted the session.
    fn start_session(&mut self, axes: u32) -> bool;

    /// Offer a delta before the caller applies it; returns the portion the
    /// ancestor consumed.
    fn pre_scroll(&mut self, dx: i32, dy: i32) -> (i32, i32);

    /// Report an applied scroll step and its unconsumed remainder.
    fn post_scroll(
        &mut self,
        consumed_dx: i32,
        consumed_dy: i32,
        unconsumed_dx: i32,
        unconsumed_dy: i32,
    );

    /// Offer a fling before the caller acts on it; true means the ancestor
    /// consumed it outright.
    fn pre_fling(&mut self, vx: f32, vy: f32) -> bool;

    /// Notify of a fling the caller is acting on; `consumed` hints whether
    /// the caller can absorb any of it.
    fn post_fling(&mut self, vx: f32, vy: f32, consumed: bool) -> bool;

    /// Close the current session.
    fn stop_session(&mut self);
}

/// Parent stand-in when no ancestor participates in nested scrolling
#[derive(Debug, Default)]
pub struct DetachedParent;

impl NestedScrollParent for DetachedParent {
    fn start_session(&mut self, _axes: u32) -> bool {
        false
    }

    fn pre_scroll(&mut self, _dx: i32, _dy: i32) -> (i32, i32) {
        (0, 0)
    }

    fn post_scroll(&mut self, _cdx: i32, _cdy: i32, _udx: i32, _udy: i32) {}

    fn pre_fling(&mut self, _vx: f32, _vy: f32) -> bool {
        false
    }

    fn post_fling(&mut self, _vx: f32, _vy: f32, _consumed: bool) -> bool {
        false
    }

    fn stop_session(&mut self) {}
}

/// Host view binding
///
/// How the coordinator reaches back into whatever renders it: push the
/// visible offset, ask for a repaint, and request another animation frame.
pub trait HostBinding {
    /// Apply the container's vertical scroll offset to the rendered view.
    fn set_visible_offset(&mut self, offset: i32);

    /// Request a repaint at the current offset.
    fn request_redraw(&mut self);

    /// Request one more frame tick; the host calls back into
    /// `ScrollCoordinator::tick` on its next frame.
    fn request_frame(&mut self);
}

/// Host stand-in for headless operation and tests
#[derive(Debug, Default)]
pub struct NullHost;

impl HostBinding for NullHost {
    fn set_visible_offset(&mut self, _offset: i32) {}

    fn request_redraw(&mut self) {}

    fn request_frame(&mut self) {}
}

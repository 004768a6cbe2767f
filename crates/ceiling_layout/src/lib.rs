//! Sticky-header scroll container with nested-scroll coordination
//!
//! A vertical container whose children above a designated sticky child form
//! a collapsible header. Dragging or flinging scrolls the header away until
//! the sticky child pins at the top (the "ceiling"); scroll input is then
//! handed off to the nested scrollable below it, and the reverse hand-off
//! happens on the way back down.
//!
//! The crate is host-agnostic: rendering, raw event delivery and the frame
//! clock stay behind [`HostBinding`] and the
//! [`AnimationScheduler`](ceiling_animation::AnimationScheduler).
//!
//! # Quick start
//!
//! ```
//! use ceiling_layout::{CeilingConfig, CeilingLayout, ChildSpec};
//!
//! let mut layout = CeilingLayout::new(CeilingConfig::new(1));
//! let children = [ChildSpec::new(300), ChildSpec::new(48), ChildSpec::new(600)];
//! layout.measure(&children, 800)?;
//! assert_eq!(layout.scroll_range(), 300);
//! # Ok::<(), ceiling_core::ConfigError>(())
//! ```

pub mod config;
pub mod container;
pub mod coordinator;
pub mod measure;
pub mod nested;
pub mod resolver;
pub mod velocity;

pub use config::{CeilingConfig, TouchConfig};
pub use container::CeilingLayout;
pub use coordinator::{ceiling_progress, FlingDirection, ScrollCoordinator, TouchState};
pub use measure::{measure_ceiling, CeilingGeometry, ChildSpec};
pub use nested::{
    DetachedParent, HostBinding, NestedScrollParent, NullHost, AXIS_HORIZONTAL, AXIS_VERTICAL,
};
pub use resolver::{
    NestedTargetResolver, NodeId, OffsetStrategy, TargetKind, TargetNode, VirtualListState,
};
pub use velocity::VelocityTracker;

pub use ceiling_core::ConfigError;

//! Companion widget state for the ceiling container
//!
//! Currently one widget: the sliding tab-indicator marker that typically
//! sits inside the sticky child. Only geometry and animation state live
//! here; drawing belongs to the host.

pub mod slider;

pub use slider::{SliderIndicator, TabSlot};

//! Configuration errors
//!
//! These are programmer errors raised synchronously from the measurement
//! pass. They are not runtime conditions to recover from: an integrator who
//! hits one must fix the container configuration.

use thiserror::Error;

/// Fatal ceiling-container configuration errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The sticky child index does not reference a child of the container.
    #[error("sticky child index {index} is out of range for {child_count} children")]
    StickyIndexOutOfRange { index: i32, child_count: usize },

    /// Pinning the topmost child is meaningless: nothing scrolls above it.
    #[error("sticky child index must be greater than 0")]
    StickyIndexAtTop,

    /// Exactly one sibling must follow the sticky child; it receives the
    /// remaining height below the pinned region.
    #[error(
        "exactly one child must follow the sticky child (index {index}, {child_count} children)"
    )]
    TrailingChildCount { index: i32, child_count: usize },

    /// The configured offset allowance would leave a negative scroll range.
    #[error("offset allowance {allowance} exceeds the header height {header_height}")]
    AllowanceExceedsHeader { allowance: i32, header_height: i32 },
}

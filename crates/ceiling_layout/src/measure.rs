//! Ceiling measurement pass
//!
//! Runs once per layout pass: validates the sticky-child configuration,
//! sums the header region above the sticky child, derives the scroll range,
//! and re-measures the single trailing child to fill the height that remains
//! below the pinned region.
//!
//! All violations here are programmer errors surfaced as [`ConfigError`];
//! the container refuses to operate until the configuration is fixed.

use ceiling_core::ConfigError;

use crate::config::CeilingConfig;

/// Measured height and vertical margins of one child, as reported by the
/// host layout pass
#[derive(Debug, Clone, Copy)]
pub struct ChildSpec {
    pub height: i32,
    pub margin_top: i32,
    pub margin_bottom: i32,
    /// Hidden children contribute nothing to the header height
    pub visible: bool,
}

impl ChildSpec {
    pub fn new(height: i32) -> Self {
        Self {
            height,
            margin_top: 0,
            margin_bottom: 0,
            visible: true,
        }
    }

    pub fn margins(mut self, top: i32, bottom: i32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    fn outer_height(&self) -> i32 {
        self.height + self.margin_top + self.margin_bottom
    }
}

/// Result of the ceiling measurement pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CeilingGeometry {
    /// Sum of outer heights of visible children above the sticky child
    pub header_height: i32,
    /// How far the container itself may scroll before the ceiling locks
    pub scroll_range: i32,
    /// Measured height of the container, grown past the minimum when the
    /// header plus sticky child cannot fit
    pub measured_height: i32,
    /// Height assigned to the single trailing child below the sticky child
    pub trailing_fill_height: i32,
}

/// Validate the configuration and compute the ceiling geometry.
///
/// `min_height` is the height offered to the container by its own parent;
/// the measured height grows beyond it when the header and sticky child
/// alone exceed it.
pub fn measure_ceiling(
    children: &[ChildSpec],
    config: &CeilingConfig,
    min_height: i32,
) -> Result<CeilingGeometry, ConfigError> {
    let child_count = children.len();
    let index = config.sticky_child_index;
    if index < 0 || index as usize >= child_count {
        return Err(ConfigError::StickyIndexOutOfRange { index, child_count });
    }
    if index == 0 {
        return Err(ConfigError::StickyIndexAtTop);
    }
    if index as usize + 2 != child_count {
        return Err(ConfigError::TrailingChildCount { index, child_count });
    }

    let sticky = index as usize;
    let header_height: i32 = children[..sticky]
        .iter()
        .filter(|child| child.visible)
        .map(ChildSpec::outer_height)
        .sum();

    let scroll_range = header_height - config.offset_allowance;
    if scroll_range < 0 {
        return Err(ConfigError::AllowanceExceedsHeader {
            allowance: config.offset_allowance,
            header_height,
        });
    }

    let sticky_outer = children[sticky].outer_height();
    let measured_height = min_height.max(header_height + sticky_outer);
    let trailing_fill_height = measured_height - sticky_outer - config.offset_allowance;

    tracing::debug!(
        header_height,
        scroll_range,
        measured_height,
        trailing_fill_height,
        "ceiling measured"
    );

    Ok(CeilingGeometry {
        header_height,
        scroll_range,
        measured_height,
        trailing_fill_height,
    })
}

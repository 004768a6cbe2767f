//! Container and touch configuration

/// Configuration for the ceiling container
///
/// Immutable during a gesture; changing either field invalidates the current
/// measurement.
#[derive(Debug, Clone, Copy)]
pub struct CeilingConfig {
    /// Index of the child that pins at the top once its preceding siblings
    /// scroll past. -1 disables ceiling behavior entirely.
    pub sticky_child_index: i32,
    /// Pixels of header left visible above the pinned child.
    pub offset_allowance: i32,
}

impl Default for CeilingConfig {
    fn default() -> Self {
        Self {
            sticky_child_index: -1,
            offset_allowance: 0,
        }
    }
}

impl CeilingConfig {
    pub fn new(sticky_child_index: i32) -> Self {
        Self {
            sticky_child_index,
            ..Default::default()
        }
    }

    /// Set the offset allowance in pixels
    pub fn offset_allowance(mut self, allowance: i32) -> Self {
        self.offset_allowance = allowance;
        self
    }

    /// Whether ceiling behavior is enabled at all
    pub fn is_enabled(&self) -> bool {
        self.sticky_child_index != -1
    }
}

/// Touch-handling thresholds
///
/// The values the platform view-configuration would normally provide:
/// movement below the slop is not a drag, release velocities below the
/// minimum do not fling, and velocities above the maximum are clamped.
#[derive(Debug, Clone, Copy)]
pub struct TouchConfig {
    /// Movement threshold before a touch becomes a drag, in pixels
    pub touch_slop: i32,
    /// Minimum release velocity that starts a fling, in pixels/second
    pub min_fling_velocity: f32,
    /// Ceiling on fling velocity magnitude, in pixels/second
    pub max_fling_velocity: f32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_disabled() {
        let config = CeilingConfig::default();
        assert!(!config.is_enabled());
        assert_eq!(config.offset_allowance, 0);
    }

    #[test]
    fn builder_enables() {
        let config = CeilingConfig::new(2).offset_allowance(20);
        assert!(config.is_enabled());
        assert_eq!(config.sticky_child_index, 2);
        assert_eq!(config.offset_allowance, 20);
    }
}

//! Canvas configuration.

use crate::camera::DEFAULT_ZOOM_SENSITIVITY;
use crate::snap::{GRID_DOT_SIZE, GRID_SPACING, SnapMode};
use serde::{Deserialize, Serialize};

/// Tunables for grid, snapping and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Distance between grid dots in world units.
    pub grid_spacing: f64,
    /// Size of a grid dot in world units.
    pub grid_dot_size: f64,
    /// Scale change per unit of wheel delta.
    pub zoom_sensitivity: f64,
    /// How moved items are snapped.
    pub snap_mode: SnapMode,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid_spacing: GRID_SPACING,
            grid_dot_size: GRID_DOT_SIZE,
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            snap_mode: SnapMode::default(),
        }
    }
}

impl CanvasConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid spacing and dot size.
    pub fn with_grid(mut self, spacing: f64, dot_size: f64) -> Self {
        self.grid_spacing = spacing;
        self.grid_dot_size = dot_size;
        self
    }

    /// Set the wheel zoom sensitivity.
    pub fn with_zoom_sensitivity(mut self, sensitivity: f64) -> Self {
        self.zoom_sensitivity = sensitivity;
        self
    }

    /// Set the snap mode.
    pub fn with_snap_mode(mut self, mode: SnapMode) -> Self {
        self.snap_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CanvasConfig = serde_json::from_str(r#"{"grid_spacing": 25.0}"#).unwrap();
        assert!((config.grid_spacing - 25.0).abs() < f64::EPSILON);
        assert!((config.grid_dot_size - GRID_DOT_SIZE).abs() < f64::EPSILON);
        assert_eq!(config.snap_mode, SnapMode::Grid);
    }

    #[test]
    fn test_snap_mode_from_json() {
        let config: CanvasConfig = serde_json::from_str(r#"{"snap_mode": "none"}"#).unwrap();
        assert_eq!(config.snap_mode, SnapMode::None);
    }
}

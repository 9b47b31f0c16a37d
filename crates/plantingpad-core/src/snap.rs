//! Snap functionality for aligning layout items to the dot grid.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Grid spacing in world units (matches the visual grid).
pub const GRID_SPACING: f64 = 20.0;

/// Size of a grid dot in world units.
pub const GRID_DOT_SIZE: f64 = 2.0;

/// Snap mode for item moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapMode {
    /// No snapping; items follow the pointer exactly.
    None,
    /// Snap to grid dot centers.
    #[default]
    Grid,
}

impl SnapMode {
    /// Cycle to the next snap mode.
    pub fn next(self) -> Self {
        match self {
            SnapMode::None => SnapMode::Grid,
            SnapMode::Grid => SnapMode::None,
        }
    }

    /// Check if grid snapping is enabled.
    pub fn snaps_to_grid(self) -> bool {
        self == SnapMode::Grid
    }
}

/// Snap a single coordinate to the center of the nearest grid dot.
///
/// Returns `round(value / spacing) * spacing + dot_size / 2`. Rounding is
/// `f64::round`, so halfway values round away from zero (`-0.5` becomes `-1`).
/// A non-positive or non-finite spacing leaves the value untouched.
pub fn snap_value(value: f64, spacing: f64, dot_size: f64) -> f64 {
    if !(spacing.is_finite() && spacing > 0.0) {
        return value;
    }
    (value / spacing).round() * spacing + dot_size / 2.0
}

/// Snap a point to the nearest grid dot center, each axis independently.
pub fn snap_to_grid(point: Point, spacing: f64, dot_size: f64) -> Point {
    Point::new(
        snap_value(point.x, spacing, dot_size),
        snap_value(point.y, spacing, dot_size),
    )
}

/// Snap a point based on the current snap mode.
pub fn snap_point(point: Point, mode: SnapMode, spacing: f64, dot_size: f64) -> Point {
    match mode {
        SnapMode::None => point,
        SnapMode::Grid => snap_to_grid(point, spacing, dot_size),
    }
}

//! Viewport module for pan/zoom transforms and coordinate mapping.
//!
//! Three coordinate spaces are involved:
//! - **screen**: host pointer coordinates (e.g. client pixels of the window),
//! - **viewport**: pixels relative to the canvas top-left corner,
//! - **world**: the plane layout items live on, independent of pan and zoom.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::Serialize;

/// Minimum allowed scale. The world is never drawn smaller than 1:1.
pub const MIN_SCALE: f64 = 1.0;

/// Default scale change per unit of wheel delta.
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 0.001;

/// Viewport manages the view transform for the canvas.
///
/// The offset is kept in viewport pixels, so panning moves the world by exactly
/// the pointer delta regardless of the current scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    offset: Vec2,
    scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: MIN_SCALE,
        }
    }
}

impl Viewport {
    /// Create a viewport at the origin with a 1:1 scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport with an explicit offset and scale.
    ///
    /// The scale is raised to [`MIN_SCALE`] if it is below the floor or not finite.
    pub fn with_transform(offset: Vec2, scale: f64) -> Self {
        let scale = if scale.is_finite() { scale.max(MIN_SCALE) } else { MIN_SCALE };
        Self { offset, scale }
    }

    /// Current pan offset in viewport pixels.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Current scale factor (always `>= MIN_SCALE`).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to viewport coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts viewport coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a viewport point to world coordinates.
    pub fn viewport_to_world(&self, point: Point) -> Point {
        self.inverse_transform() * point
    }

    /// Convert a world point to viewport coordinates.
    pub fn world_to_viewport(&self, point: Point) -> Point {
        self.transform() * point
    }

    /// Pan by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom for a wheel event, keeping the world point under `anchor` fixed.
    ///
    /// `anchor` is in viewport coordinates. Positive wheel deltas zoom out,
    /// negative ones zoom in. Returns `false` when the scale did not change.
    pub fn zoom_at(&mut self, anchor: Point, wheel_delta: f64, sensitivity: f64) -> bool {
        let new_scale = (self.scale + wheel_delta * -sensitivity).max(MIN_SCALE);
        if !new_scale.is_finite() || (new_scale - self.scale).abs() < f64::EPSILON {
            return false;
        }

        let ratio = new_scale / self.scale;
        let anchor = anchor.to_vec2();
        self.offset = anchor - (anchor - self.offset) * ratio;
        self.scale = new_scale;
        true
    }

    /// The world-space rectangle visible through a canvas of `size` pixels.
    pub fn visible_world_rect(&self, size: Size) -> Rect {
        let top_left = self.viewport_to_world(Point::ZERO);
        let bottom_right = self.viewport_to_world(Point::new(size.width, size.height));
        Rect::from_points(top_left, bottom_right)
    }
}

/// Convert a screen point to canvas-relative viewport coordinates.
pub fn screen_to_viewport(screen_point: Point, canvas_origin: Point) -> Point {
    (screen_point - canvas_origin).to_point()
}

/// Convert a screen point to world coordinates.
///
/// `world = (screen - canvas_origin - offset) / scale`
pub fn screen_to_world(screen_point: Point, canvas_origin: Point, viewport: &Viewport) -> Point {
    viewport.viewport_to_world(screen_to_viewport(screen_point, canvas_origin))
}

/// Convert a world point to screen coordinates. Inverse of [`screen_to_world`].
pub fn world_to_screen(world_point: Point, canvas_origin: Point, viewport: &Viewport) -> Point {
    viewport.world_to_viewport(world_point) + canvas_origin.to_vec2()
}

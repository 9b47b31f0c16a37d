//! Layout items and hit testing.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Fill colour used when an item does not specify one.
pub const DEFAULT_FILL_COLOR: &str = "black";

fn default_fill_color() -> String {
    DEFAULT_FILL_COLOR.to_string()
}

/// A positioned rectangle on the canvas.
///
/// The bounding box shares the item's anchor but may be larger than the
/// visible rectangle; the extra margin pads the hit-test region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    /// Unique, stable identifier within a store.
    pub id: String,
    /// Anchor X in world coordinates.
    pub x: f64,
    /// Anchor Y in world coordinates.
    pub y: f64,
    /// Visible width.
    pub width: f64,
    /// Visible height.
    pub height: f64,
    /// Hit-test width (`>= width`).
    pub bounding_box_width: f64,
    /// Hit-test height (`>= height`).
    pub bounding_box_height: f64,
    /// CSS-style colour string.
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
    /// Fields the canvas never reads; carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LayoutItem {
    /// Create a new item with a fresh id and a bounding box equal to its size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            x,
            y,
            width,
            height,
            bounding_box_width: width,
            bounding_box_height: height,
            fill_color: default_fill_color(),
            extra: Map::new(),
        }
    }

    /// Set an explicit id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the hit-test bounding box. Never smaller than the visible size.
    pub fn with_bounding_box(mut self, width: f64, height: f64) -> Self {
        self.bounding_box_width = width;
        self.bounding_box_height = height;
        self.normalize();
        self
    }

    /// Set the fill colour.
    pub fn with_fill_color(mut self, color: impl Into<String>) -> Self {
        self.fill_color = color.into();
        self
    }

    /// Attach an extra field.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Grow the bounding box so it is at least as large as the visible rectangle.
    pub fn normalize(&mut self) {
        self.bounding_box_width = self.bounding_box_width.max(self.width);
        self.bounding_box_height = self.bounding_box_height.max(self.height);
    }

    /// Anchor position in world coordinates.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Move the anchor to `position`.
    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    /// The visible rectangle in world coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// The padded hit-test region, centered on the visible rectangle.
    pub fn padded_bounds(&self) -> Rect {
        let x0 = self.x - (self.bounding_box_width - self.width) / 2.0;
        let y0 = self.y - (self.bounding_box_height - self.height) / 2.0;
        Rect::new(
            x0,
            y0,
            x0 + self.bounding_box_width,
            y0 + self.bounding_box_height,
        )
    }

    /// Check whether `point` lies strictly inside the padded bounds.
    /// Points on the boundary do not count.
    pub fn hit_test(&self, point: Point) -> bool {
        let bounds = self.padded_bounds();
        bounds.x0 < point.x && point.x < bounds.x1 && bounds.y0 < point.y && point.y < bounds.y1
    }
}

/// Find the topmost item whose padded bounds contain `point` (world coordinates).
///
/// Items are painted in slice order, so the search runs back to front and the
/// last-drawn match wins.
pub fn find_topmost_item_at(point: Point, items: &[LayoutItem]) -> Option<&LayoutItem> {
    items.iter().rev().find(|item| item.hit_test(point))
}

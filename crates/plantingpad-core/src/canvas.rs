//! Canvas session state and event dispatch.

use crate::camera::{self, Viewport};
use crate::config::CanvasConfig;
use crate::input::{CanvasEvent, InteractionMode, InteractionState};
use crate::layout::find_topmost_item_at;
use crate::snap::snap_point;
use crate::storage::{LayoutItemStore, MemoryStore, StoreError};
use kurbo::{Point, Rect, Size};
use thiserror::Error;

/// Reasons an event was skipped. These are control-flow guards, never user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Skip {
    #[error("Precondition unmet: {0}")]
    PreconditionUnmet(&'static str),
    #[error("Layout item not found: {0}")]
    NotFound(String),
    #[error("No-op: {0}")]
    NoOp(&'static str),
}

impl From<StoreError> for Skip {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Skip::NotFound(id),
            StoreError::DuplicateId(_) => Skip::NoOp("replacement id already in use"),
        }
    }
}

/// Outcome of a handled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Visible state changed; a frame must be painted.
    Redraw,
    /// Only interaction state changed.
    Handled,
}

/// Canvas state: viewport, interaction and the layout items being edited.
#[derive(Debug, Clone)]
pub struct Canvas<S = MemoryStore> {
    /// View transform.
    pub viewport: Viewport,
    /// Grid, snap and zoom settings.
    pub config: CanvasConfig,
    interaction: InteractionState,
    store: S,
    viewport_size: Size,
    origin: Point,
}

impl<S: LayoutItemStore> Canvas<S> {
    /// Create a canvas over `store` with default configuration and no size yet.
    pub fn new(store: S) -> Self {
        Self {
            viewport: Viewport::new(),
            config: CanvasConfig::default(),
            interaction: InteractionState::new(),
            store,
            viewport_size: Size::ZERO,
            origin: Point::ZERO,
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: CanvasConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the canvas pixel size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }

    /// Set the canvas origin in screen coordinates.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// The layout item store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access for the external collaborator that owns the items.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Current interaction state.
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Canvas size in pixels.
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Canvas top-left corner in screen coordinates.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Convert a screen point to world coordinates using the current viewport.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        camera::screen_to_world(screen_point, self.origin, &self.viewport)
    }

    /// Convert a world point to screen coordinates using the current viewport.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        camera::world_to_screen(world_point, self.origin, &self.viewport)
    }

    /// The world-space rectangle currently visible through the canvas.
    pub fn visible_world_rect(&self) -> Rect {
        self.viewport.visible_world_rect(self.viewport_size)
    }

    /// Dispatch a host event.
    pub fn handle_event(&mut self, event: CanvasEvent) -> Result<EventResponse, Skip> {
        match event {
            CanvasEvent::PointerDown { position } => self.pointer_down(position),
            CanvasEvent::PointerMove { position } => self.pointer_move(position),
            CanvasEvent::PointerUp { .. } | CanvasEvent::PointerLeave => self.pointer_up(),
            CanvasEvent::Wheel { position, delta } => self.wheel(position, delta),
            CanvasEvent::Resize { size } => self.resize(size),
            CanvasEvent::Reposition { origin } => self.reposition(origin),
        }
    }

    /// Start moving the item under the pointer, or start panning if there is none.
    pub fn pointer_down(&mut self, position: Point) -> Result<EventResponse, Skip> {
        let world = self.screen_to_world(position);
        match find_topmost_item_at(world, self.store.items()) {
            Some(item) => {
                log::debug!("Selected item {} at world {:?}", item.id, world);
                let id = item.id.clone();
                self.interaction.begin_move(id, position);
            }
            None => {
                log::debug!("Panning from {:?}", position);
                self.interaction.begin_pan(position);
            }
        }
        Ok(EventResponse::Handled)
    }

    /// Pan the viewport or move the selected item, depending on the mode.
    pub fn pointer_move(&mut self, position: Point) -> Result<EventResponse, Skip> {
        match self.interaction.mode().clone() {
            InteractionMode::Idle => Err(Skip::NoOp("pointer move while idle")),
            InteractionMode::Panning => {
                let delta = self.interaction.track_pointer(position);
                self.viewport.pan(delta);
                Ok(EventResponse::Redraw)
            }
            InteractionMode::Moving(id) => {
                self.interaction.track_pointer(position);
                // Use the viewport as it is now, not as it was at pointer-down.
                let world = self.screen_to_world(position);
                let target = snap_point(
                    world,
                    self.config.snap_mode,
                    self.config.grid_spacing,
                    self.config.grid_dot_size,
                );

                let mut item = self
                    .store
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| Skip::NotFound(id.clone()))?;
                item.set_position(target);
                self.store.replace_item(&id, item)?;
                Ok(EventResponse::Redraw)
            }
        }
    }

    /// End any interaction and clear the selection.
    pub fn pointer_up(&mut self) -> Result<EventResponse, Skip> {
        match self.interaction.end() {
            InteractionMode::Idle => Err(Skip::NoOp("pointer released while idle")),
            ended => {
                log::debug!("Ended {} interaction", ended.name());
                Ok(EventResponse::Handled)
            }
        }
    }

    /// Zoom around the pointer. Independent of the interaction mode.
    pub fn wheel(&mut self, position: Point, delta: f64) -> Result<EventResponse, Skip> {
        let anchor = camera::screen_to_viewport(position, self.origin);
        if self.viewport.zoom_at(anchor, delta, self.config.zoom_sensitivity) {
            Ok(EventResponse::Redraw)
        } else {
            Err(Skip::NoOp("scale unchanged"))
        }
    }

    /// Record a new canvas pixel size.
    pub fn resize(&mut self, size: Size) -> Result<EventResponse, Skip> {
        if size == self.viewport_size {
            return Err(Skip::NoOp("canvas size unchanged"));
        }
        self.viewport_size = size;
        if size.width <= 0.0 || size.height <= 0.0 {
            return Err(Skip::PreconditionUnmet("canvas has zero area"));
        }
        Ok(EventResponse::Redraw)
    }

    /// Record a new canvas origin in screen coordinates.
    pub fn reposition(&mut self, origin: Point) -> Result<EventResponse, Skip> {
        if origin == self.origin {
            return Err(Skip::NoOp("canvas origin unchanged"));
        }
        self.origin = origin;
        Ok(EventResponse::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutItem;
    use crate::snap::SnapMode;
    use kurbo::Vec2;

    fn scenario_canvas() -> Canvas {
        let store = MemoryStore::from_items(vec![
            LayoutItem::new(51.0, 52.0, 50.0, 50.0)
                .with_id("bed-1")
                .with_bounding_box(60.0, 60.0),
        ])
        .unwrap();
        Canvas::new(store)
            .with_size(Size::new(1000.0, 1000.0))
            .with_config(CanvasConfig::new().with_grid(25.0, 2.0))
    }

    #[test]
    fn test_pointer_down_on_item_starts_move() {
        let mut canvas = scenario_canvas();
        let response = canvas.handle_event(CanvasEvent::PointerDown {
            position: Point::new(55.0, 55.0),
        });
        assert_eq!(response, Ok(EventResponse::Handled));
        assert_eq!(
            canvas.interaction().mode(),
            &InteractionMode::Moving("bed-1".to_string())
        );
    }

    #[test]
    fn test_drag_snaps_to_grid() {
        let mut canvas = scenario_canvas();
        canvas.pointer_down(Point::new(55.0, 55.0)).unwrap();
        let response = canvas.pointer_move(Point::new(123.0, 77.0));
        assert_eq!(response, Ok(EventResponse::Redraw));

        let item = canvas.store().get("bed-1").unwrap();
        assert_eq!(item.position(), Point::new(126.0, 76.0));
        assert!((item.width - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drag_without_snapping() {
        let mut canvas = scenario_canvas();
        canvas.config = canvas.config.with_snap_mode(SnapMode::None);
        canvas.pointer_down(Point::new(55.0, 55.0)).unwrap();
        canvas.pointer_move(Point::new(123.0, 77.0)).unwrap();
        assert_eq!(
            canvas.store().get("bed-1").unwrap().position(),
            Point::new(123.0, 77.0)
        );
    }

    #[test]
    fn test_drag_uses_current_viewport() {
        let mut canvas = scenario_canvas().with_origin(Point::new(10.0, 20.0));
        // world (55, 55) is at screen (65, 75) with the origin shift
        canvas.pointer_down(Point::new(65.0, 75.0)).unwrap();
        assert_eq!(canvas.interaction().selected_item(), Some("bed-1"));

        canvas.wheel(Point::new(10.0, 20.0), -1000.0).unwrap();
        // scale 2 anchored at the canvas origin: world = (screen - origin) / 2
        canvas.pointer_move(Point::new(260.0, 174.0)).unwrap();
        assert_eq!(
            canvas.store().get("bed-1").unwrap().position(),
            Point::new(126.0, 76.0)
        );
        assert_eq!(
            canvas.interaction().mode(),
            &InteractionMode::Moving("bed-1".to_string())
        );
    }

    #[test]
    fn test_pointer_down_on_empty_space_pans() {
        let mut canvas = scenario_canvas();
        canvas.pointer_down(Point::new(300.0, 300.0)).unwrap();
        assert_eq!(canvas.interaction().mode(), &InteractionMode::Panning);

        assert_eq!(
            canvas.pointer_move(Point::new(310.0, 295.0)),
            Ok(EventResponse::Redraw)
        );
        assert_eq!(canvas.viewport.offset(), Vec2::new(10.0, -5.0));

        canvas.pointer_move(Point::new(320.0, 300.0)).unwrap();
        assert_eq!(canvas.viewport.offset(), Vec2::new(20.0, 0.0));
        // Items stay put while panning.
        assert_eq!(
            canvas.store().get("bed-1").unwrap().position(),
            Point::new(51.0, 52.0)
        );
    }

    #[test]
    fn test_pan_then_hit_test_uses_offset() {
        let mut canvas = scenario_canvas();
        canvas.pointer_down(Point::new(300.0, 300.0)).unwrap();
        canvas.pointer_move(Point::new(400.0, 300.0)).unwrap();
        canvas.pointer_up().unwrap();

        // The item now appears 100px to the right.
        canvas.pointer_down(Point::new(155.0, 55.0)).unwrap();
        assert_eq!(canvas.interaction().selected_item(), Some("bed-1"));
    }

    #[test]
    fn test_move_while_idle_is_noop() {
        let mut canvas = scenario_canvas();
        let response = canvas.pointer_move(Point::new(10.0, 10.0));
        assert!(matches!(response, Err(Skip::NoOp(_))));
        assert_eq!(canvas.viewport, Viewport::new());
    }

    #[test]
    fn test_pointer_up_and_leave_return_to_idle() {
        let mut canvas = scenario_canvas();
        canvas.pointer_down(Point::new(55.0, 55.0)).unwrap();
        assert_eq!(
            canvas.handle_event(CanvasEvent::PointerUp {
                position: Point::new(55.0, 55.0)
            }),
            Ok(EventResponse::Handled)
        );
        assert!(canvas.interaction().is_idle());

        canvas.pointer_down(Point::new(300.0, 300.0)).unwrap();
        canvas.handle_event(CanvasEvent::PointerLeave).unwrap();
        assert!(canvas.interaction().is_idle());
        assert_eq!(canvas.interaction().selected_item(), None);

        assert!(matches!(canvas.pointer_up(), Err(Skip::NoOp(_))));
    }

    #[test]
    fn test_removed_item_keeps_moving_mode() {
        let mut canvas = scenario_canvas();
        canvas.pointer_down(Point::new(55.0, 55.0)).unwrap();
        canvas.store_mut().remove("bed-1");

        let response = canvas.pointer_move(Point::new(123.0, 77.0));
        assert_eq!(response, Err(Skip::NotFound("bed-1".to_string())));
        assert_eq!(canvas.interaction().selected_item(), Some("bed-1"));

        canvas.pointer_up().unwrap();
        assert!(canvas.interaction().is_idle());
    }

    #[test]
    fn test_wheel_does_not_change_mode() {
        let mut canvas = scenario_canvas();
        canvas.pointer_down(Point::new(300.0, 300.0)).unwrap();
        assert_eq!(
            canvas.wheel(Point::new(300.0, 300.0), -250.0),
            Ok(EventResponse::Redraw)
        );
        assert_eq!(canvas.interaction().mode(), &InteractionMode::Panning);
        assert!((canvas.viewport.scale() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_keeps_world_point_under_cursor() {
        let mut canvas = scenario_canvas().with_origin(Point::new(40.0, 30.0));
        let cursor = Point::new(240.0, 130.0);
        let before = canvas.screen_to_world(cursor);
        canvas.wheel(cursor, -700.0).unwrap();
        let after = canvas.screen_to_world(cursor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_never_below_floor() {
        let mut canvas = scenario_canvas();
        for _ in 0..20 {
            let _ = canvas.wheel(Point::new(500.0, 500.0), 1000.0);
            assert!(canvas.viewport.scale() >= crate::camera::MIN_SCALE);
        }
        assert_eq!(
            canvas.wheel(Point::new(500.0, 500.0), 1000.0),
            Err(Skip::NoOp("scale unchanged"))
        );
    }

    #[test]
    fn test_wheel_uses_configured_sensitivity() {
        let mut canvas = scenario_canvas();
        canvas.config = canvas.config.with_zoom_sensitivity(0.01);
        canvas.wheel(Point::new(0.0, 0.0), -100.0).unwrap();
        assert!((canvas.viewport.scale() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_resize_updates_visible_rect() {
        let mut canvas = scenario_canvas();
        assert_eq!(
            canvas.resize(Size::new(400.0, 300.0)),
            Ok(EventResponse::Redraw)
        );
        assert_eq!(canvas.visible_world_rect(), Rect::new(0.0, 0.0, 400.0, 300.0));
        assert!(matches!(
            canvas.resize(Size::new(400.0, 300.0)),
            Err(Skip::NoOp(_))
        ));
        assert!(matches!(
            canvas.resize(Size::new(0.0, 300.0)),
            Err(Skip::PreconditionUnmet(_))
        ));
        assert_eq!(canvas.viewport_size(), Size::new(0.0, 300.0));
    }

    #[test]
    fn test_reposition_shifts_screen_mapping() {
        let mut canvas = scenario_canvas();
        assert_eq!(
            canvas.reposition(Point::new(200.0, 0.0)),
            Ok(EventResponse::Handled)
        );
        assert_eq!(canvas.origin(), Point::new(200.0, 0.0));
        assert_eq!(
            canvas.screen_to_world(Point::new(255.0, 55.0)),
            Point::new(55.0, 55.0)
        );
    }

    #[test]
    fn test_store_errors_map_to_skips() {
        assert_eq!(
            Skip::from(StoreError::NotFound("a".to_string())),
            Skip::NotFound("a".to_string())
        );
        assert!(matches!(
            Skip::from(StoreError::DuplicateId("b".to_string())),
            Skip::NoOp(_)
        ));
    }

    #[test]
    fn test_empty_store_pans() {
        let mut canvas = Canvas::new(MemoryStore::new()).with_size(Size::new(100.0, 100.0));
        canvas.pointer_down(Point::new(10.0, 10.0)).unwrap();
        assert_eq!(canvas.interaction().mode(), &InteractionMode::Panning);
    }
}

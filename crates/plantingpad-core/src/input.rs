//! Host input events and pointer interaction state.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Input delivered by the host. Positions are in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CanvasEvent {
    PointerDown {
        position: Point,
    },
    PointerMove {
        position: Point,
    },
    PointerUp {
        position: Point,
    },
    PointerLeave,
    Wheel {
        position: Point,
        delta: f64,
    },
    /// The canvas element changed pixel size.
    Resize {
        size: Size,
    },
    /// The canvas element moved within the host (page scroll or layout change).
    Reposition {
        origin: Point,
    },
}

/// What the pointer is currently doing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
    /// Dragging the item with this id.
    Moving(String),
}

impl InteractionMode {
    /// Short label for logging.
    pub fn name(&self) -> &'static str {
        match self {
            InteractionMode::Idle => "idle",
            InteractionMode::Panning => "panning",
            InteractionMode::Moving(_) => "moving",
        }
    }
}

/// Tracks the interaction mode and the last pointer position.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    /// Reference point for pan deltas, in screen coordinates.
    last_pointer: Point,
}

impl InteractionState {
    /// Create a new idle interaction state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    /// Id of the item being moved, if any.
    pub fn selected_item(&self) -> Option<&str> {
        match &self.mode {
            InteractionMode::Moving(id) => Some(id),
            _ => None,
        }
    }

    /// Last recorded pointer position.
    pub fn last_pointer(&self) -> Point {
        self.last_pointer
    }

    /// Check if no interaction is in progress.
    pub fn is_idle(&self) -> bool {
        self.mode == InteractionMode::Idle
    }

    /// Start panning from `position`.
    pub fn begin_pan(&mut self, position: Point) {
        self.mode = InteractionMode::Panning;
        self.last_pointer = position;
    }

    /// Start moving the item `id` from `position`.
    pub fn begin_move(&mut self, id: impl Into<String>, position: Point) {
        self.mode = InteractionMode::Moving(id.into());
        self.last_pointer = position;
    }

    /// Record a new pointer position, returning the delta from the previous one.
    pub fn track_pointer(&mut self, position: Point) -> Vec2 {
        let delta = position - self.last_pointer;
        self.last_pointer = position;
        delta
    }

    /// Return to idle and drop the selection. Returns the mode that ended.
    pub fn end(&mut self) -> InteractionMode {
        std::mem::take(&mut self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let state = InteractionState::new();
        assert!(state.is_idle());
        assert_eq!(state.selected_item(), None);
    }

    #[test]
    fn test_pan_tracking() {
        let mut state = InteractionState::new();
        state.begin_pan(Point::new(100.0, 100.0));
        assert_eq!(state.mode(), &InteractionMode::Panning);

        let delta = state.track_pointer(Point::new(150.0, 120.0));
        assert_eq!(delta, Vec2::new(50.0, 20.0));
        let delta = state.track_pointer(Point::new(140.0, 120.0));
        assert_eq!(delta, Vec2::new(-10.0, 0.0));
    }

    #[test]
    fn test_move_and_end() {
        let mut state = InteractionState::new();
        state.begin_move("bed-1", Point::new(55.0, 55.0));
        assert_eq!(state.selected_item(), Some("bed-1"));

        let ended = state.end();
        assert_eq!(ended, InteractionMode::Moving("bed-1".to_string()));
        assert!(state.is_idle());
        assert_eq!(state.selected_item(), None);
    }

    #[test]
    fn test_event_json_shape() {
        let event: CanvasEvent =
            serde_json::from_str(r#"{"type": "wheel", "position": {"x": 1.0, "y": 2.0}, "delta": -100.0}"#)
                .unwrap();
        assert_eq!(
            event,
            CanvasEvent::Wheel {
                position: Point::new(1.0, 2.0),
                delta: -100.0
            }
        );

        let event: CanvasEvent = serde_json::from_str(r#"{"type": "pointer_leave"}"#).unwrap();
        assert_eq!(event, CanvasEvent::PointerLeave);
    }
}

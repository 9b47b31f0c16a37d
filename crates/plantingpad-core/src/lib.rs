//! PlantingPad Core Library
//!
//! Platform-agnostic viewport, hit-testing and interaction logic for the
//! PlantingPad layout canvas.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod input;
pub mod layout;
pub mod snap;
pub mod storage;

pub use camera::{MIN_SCALE, Viewport, screen_to_world, world_to_screen};
pub use canvas::{Canvas, EventResponse, Skip};
pub use config::CanvasConfig;
pub use input::{CanvasEvent, InteractionMode, InteractionState};
pub use layout::{LayoutItem, find_topmost_item_at};
pub use snap::{GRID_DOT_SIZE, GRID_SPACING, SnapMode, snap_point, snap_to_grid, snap_value};
pub use storage::{LayoutItemStore, MemoryStore, StoreError, StoreResult};

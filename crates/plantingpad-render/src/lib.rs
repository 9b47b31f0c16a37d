//! PlantingPad Render Library
//!
//! Renderer boundary for PlantingPad: the drawing-surface capability, frame
//! painting, and the session that keeps a surface in sync with canvas state.

pub mod recording;
mod renderer;
mod session;

pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{
    DrawSurface, FrameStats, MIN_GRID_PITCH, RenderResult, RenderStyle, RendererError,
    parse_fill_color, render_frame,
};
pub use session::Session;

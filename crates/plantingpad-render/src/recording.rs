//! Display-list surface that records draw calls instead of rasterizing them.

use crate::renderer::DrawSurface;
use kurbo::Rect;
use peniko::Color;

/// A recorded draw call.
#[derive(Debug, Clone, Copy)]
pub enum DrawCommand {
    Clear,
    FillRect { rect: Rect, color: Color },
}

/// Surface that keeps every draw call of the current frame.
///
/// `clear` drops the previous frame, so after a render the list holds exactly
/// one frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl RecordingSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the last frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Rectangles filled in the last frame, in paint order.
    pub fn fill_rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                DrawCommand::Clear => None,
            })
            .collect()
    }

    /// Number of frames started (times `clear` was called).
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }
}

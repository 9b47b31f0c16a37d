//! Long-lived canvas session tying state, events and the drawing surface together.

use crate::renderer::{
    DrawSurface, FrameStats, RenderResult, RenderStyle, RendererError, render_frame,
};
use plantingpad_core::canvas::{Canvas, EventResponse, Skip};
use plantingpad_core::input::CanvasEvent;
use plantingpad_core::storage::{LayoutItemStore, MemoryStore};

/// One interactive canvas: owns the canvas state and at most one subscribed surface.
///
/// Every event that changes visible state repaints the surface before
/// [`Session::dispatch`] returns.
#[derive(Debug)]
pub struct Session<D, S = MemoryStore> {
    canvas: Canvas<S>,
    style: RenderStyle,
    surface: Option<D>,
}

impl<D: DrawSurface, S: LayoutItemStore> Session<D, S> {
    /// Create a session with no surface subscribed.
    pub fn new(canvas: Canvas<S>) -> Self {
        Self {
            canvas,
            style: RenderStyle::default(),
            surface: None,
        }
    }

    /// Set the render style.
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// The canvas state.
    pub fn canvas(&self) -> &Canvas<S> {
        &self.canvas
    }

    /// Mutable canvas access. Call [`Session::render`] after changing items.
    pub fn canvas_mut(&mut self) -> &mut Canvas<S> {
        &mut self.canvas
    }

    /// The subscribed surface, if any.
    pub fn surface(&self) -> Option<&D> {
        self.surface.as_ref()
    }

    /// Check if a surface is subscribed.
    pub fn is_subscribed(&self) -> bool {
        self.surface.is_some()
    }

    /// Attach `surface` and paint the first frame.
    ///
    /// A session holds a single subscription; any previous surface is
    /// detached and returned.
    pub fn subscribe(&mut self, surface: D) -> Option<D> {
        let previous = self.surface.replace(surface);
        if previous.is_some() {
            log::debug!("Replacing subscribed surface");
        }
        if let Err(err) = self.render() {
            log::debug!("Initial frame skipped: {}", err);
        }
        previous
    }

    /// Detach the surface. Events still update state but nothing is painted.
    pub fn unsubscribe(&mut self) -> Option<D> {
        self.surface.take()
    }

    /// Handle a host event, repainting synchronously when needed.
    pub fn dispatch(&mut self, event: CanvasEvent) -> Result<EventResponse, Skip> {
        let response = self.canvas.handle_event(event);
        match &response {
            Ok(EventResponse::Redraw) => {
                if let Err(err) = self.render() {
                    log::debug!("Frame skipped: {}", err);
                }
            }
            Ok(EventResponse::Handled) => {}
            Err(skip) => log::debug!("Event skipped: {}", skip),
        }
        response
    }

    /// Paint a frame onto the subscribed surface.
    pub fn render(&mut self) -> RenderResult<FrameStats> {
        let surface = self.surface.as_mut().ok_or(RendererError::NoSurface)?;
        render_frame(&self.canvas, &self.style, surface)
    }
}

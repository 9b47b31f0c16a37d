//! Replay of recorded host event scripts.

use kurbo::{Point, Size};
use plantingpad_core::camera::Viewport;
use plantingpad_core::canvas::Canvas;
use plantingpad_core::config::CanvasConfig;
use plantingpad_core::input::CanvasEvent;
use plantingpad_core::layout::LayoutItem;
use plantingpad_core::storage::{LayoutItemStore, MemoryStore, StoreError};
use plantingpad_render::{RecordingSurface, Session};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid layout items: {0}")]
    Store(#[from] StoreError),
}

fn default_size() -> Size {
    Size::new(1000.0, 1000.0)
}

/// A canvas setup plus the host events to feed it.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: CanvasConfig,
    #[serde(default = "default_size")]
    pub size: Size,
    #[serde(default)]
    pub origin: Point,
    /// Items to start with; the two default beds when absent.
    #[serde(default)]
    pub items: Option<Vec<LayoutItem>>,
    #[serde(default)]
    pub events: Vec<CanvasEvent>,
}

impl Script {
    /// Read a script from a JSON file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a script from JSON text.
    pub fn from_json(text: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Final state after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub frames: usize,
    pub handled: usize,
    pub skipped: usize,
    pub mode: &'static str,
    pub viewport: Viewport,
    pub items: Vec<LayoutItem>,
}

/// Run every event of `script` through a session backed by a recording surface.
pub fn replay(script: Script) -> Result<ReplaySummary, AppError> {
    let store = match script.items {
        Some(items) => MemoryStore::from_items(items)?,
        None => MemoryStore::with_defaults(),
    };
    let canvas = Canvas::new(store)
        .with_config(script.config)
        .with_size(script.size)
        .with_origin(script.origin);

    let mut session = Session::new(canvas);
    session.subscribe(RecordingSurface::new());

    let mut handled = 0;
    let mut skipped = 0;
    for event in script.events {
        match session.dispatch(event) {
            Ok(_) => handled += 1,
            Err(_) => skipped += 1,
        }
    }
    log::info!("Replayed {} events ({} skipped)", handled + skipped, skipped);

    let frames = session.surface().map_or(0, RecordingSurface::frames);
    let canvas = session.canvas();
    Ok(ReplaySummary {
        frames,
        handled,
        skipped,
        mode: canvas.interaction().mode().name(),
        viewport: canvas.viewport,
        items: canvas.store().items().to_vec(),
    })
}

//! Frame painting onto a host-owned drawing surface.

use kurbo::{Affine, Rect};
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use plantingpad_core::canvas::Canvas;
use plantingpad_core::storage::LayoutItemStore;
use thiserror::Error;

/// Smallest on-screen distance between grid dots, in pixels. Denser grids are
/// not painted.
pub const MIN_GRID_PITCH: f64 = 2.0;

/// Renderer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RendererError {
    #[error("No drawing surface subscribed")]
    NoSurface,
    #[error("Canvas has zero area: {0}x{1}")]
    EmptyViewport(u32, u32),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// A 2D drawing surface owned by the host.
///
/// Coordinates are canvas pixels with the origin at the top-left corner.
pub trait DrawSurface {
    /// Clear the whole surface.
    fn clear(&mut self);

    /// Fill `rect` with a solid colour.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Colours used when painting a frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    /// Canvas background.
    pub background_color: Color,
    /// Grid dot colour.
    pub grid_color: Color,
    /// Used for items whose fill colour cannot be parsed.
    pub fallback_item_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgba8(219, 244, 216, 255), // #dbf4d8
            grid_color: Color::from_rgba8(47, 92, 47, 255),          // #2f5c2f
            fallback_item_color: Color::from_rgba8(0, 0, 0, 255),
        }
    }
}

impl RenderStyle {
    /// Set the background colour.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid dot colour.
    pub fn with_grid_color(mut self, color: Color) -> Self {
        self.grid_color = color;
        self
    }
}

/// Counts of what a frame painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub grid_dots: usize,
    pub items: usize,
}

/// Parse a CSS colour string such as `"red"` or `"#2f5c2f"`.
pub fn parse_fill_color(color: &str) -> Option<Color> {
    parse_color(color)
        .ok()
        .map(|color| color.to_alpha_color::<Srgb>())
}

/// Paint one frame of `canvas` onto `surface`.
///
/// Draws, in order: clear, the background across the visible world rect, the
/// grid dots inside it, then every item in store order so later items cover
/// earlier ones.
pub fn render_frame<S, D>(
    canvas: &Canvas<S>,
    style: &RenderStyle,
    surface: &mut D,
) -> RenderResult<FrameStats>
where
    S: LayoutItemStore,
    D: DrawSurface + ?Sized,
{
    let size = canvas.viewport_size();
    if !(size.width > 0.0 && size.height > 0.0) {
        return Err(RendererError::EmptyViewport(
            size.width.max(0.0) as u32,
            size.height.max(0.0) as u32,
        ));
    }

    let transform = canvas.viewport.transform();
    let visible = canvas.visible_world_rect();
    let mut stats = FrameStats::default();

    surface.clear();
    surface.fill_rect(transform.transform_rect_bbox(visible), style.background_color);

    stats.grid_dots = render_grid(
        surface,
        visible,
        transform,
        canvas.viewport.scale(),
        canvas.config.grid_spacing,
        canvas.config.grid_dot_size,
        style.grid_color,
    );

    for item in canvas.store().items() {
        let color = parse_fill_color(&item.fill_color).unwrap_or_else(|| {
            log::warn!("Unparsable fill colour {:?} on item {}", item.fill_color, item.id);
            style.fallback_item_color
        });
        surface.fill_rect(transform.transform_rect_bbox(item.rect()), color);
        stats.items += 1;
    }

    Ok(stats)
}

/// Paint a dot at every multiple of `spacing` inside `visible` (world units).
fn render_grid<D: DrawSurface + ?Sized>(
    surface: &mut D,
    visible: Rect,
    transform: Affine,
    scale: f64,
    spacing: f64,
    dot_size: f64,
    color: Color,
) -> usize {
    if !(spacing.is_finite() && spacing > 0.0) || dot_size <= 0.0 {
        return 0;
    }
    if spacing * scale < MIN_GRID_PITCH {
        log::debug!(
            "Grid skipped: {} px between dots is below {} px",
            spacing * scale,
            MIN_GRID_PITCH
        );
        return 0;
    }

    let first_col = (visible.x0 / spacing).ceil() as i64;
    let last_col = (visible.x1 / spacing).floor() as i64;
    let first_row = (visible.y0 / spacing).ceil() as i64;
    let last_row = (visible.y1 / spacing).floor() as i64;

    let mut count = 0;
    for col in first_col..=last_col {
        let x = col as f64 * spacing;
        for row in first_row..=last_row {
            let y = row as f64 * spacing;
            let dot = Rect::new(x, y, x + dot_size, y + dot_size);
            surface.fill_rect(transform.transform_rect_bbox(dot), color);
            count += 1;
        }
    }
    count
}

//! Canvas sizing and pointer-to-cell mapping.
//!
//! Two coordinate spaces are in play. *Display space* is CSS pixels, the space
//! pointer events arrive in. *Backing space* is the physical pixel buffer,
//! `display_size * dpr` on each edge. Hit-testing works in display space off
//! the measured client rect; only the renderer works in backing space.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{
    DESKTOP_MAX_DPR, DESKTOP_PADDING, DESKTOP_SUBGRID_MIN_PITCH, MAX_DISPLAY_SIZE, MOBILE_BREAKPOINT, MOBILE_MAX_DPR,
    MOBILE_PADDING, MOBILE_SUBGRID_MIN_PITCH,
};
use crate::grid::{Cell, GridSize};
use crate::theme::Environment;

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The canvas element's client rect (as from `getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rect anchored at the origin with the given square edge.
    #[must_use]
    pub fn square(edge: f64) -> Self {
        Self::new(0.0, 0.0, edge, edge)
    }
}

/// Resolved canvas geometry for one container size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// On-screen edge in CSS pixels.
    pub display_size: f64,
    /// Effective (capped) device pixel ratio.
    pub dpr: f64,
    /// Physical buffer edge in pixels.
    pub backing_size: u32,
    pub mobile: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self::fixed(MAX_DISPLAY_SIZE, 1.0)
    }
}

impl Layout {
    /// Fit the canvas into a container of the given width.
    #[must_use]
    pub fn fit(container_width: f64, env: &dyn Environment) -> Self {
        let mobile = env.viewport_width() < MOBILE_BREAKPOINT;
        let padding = if mobile { MOBILE_PADDING } else { DESKTOP_PADDING };
        let cap = if mobile { MOBILE_MAX_DPR } else { DESKTOP_MAX_DPR };
        let display_size = (container_width - padding).min(MAX_DISPLAY_SIZE).max(1.0);
        Self::build(display_size, sanitize_dpr(env.device_pixel_ratio()).min(cap), mobile)
    }

    /// A desktop layout with an explicit display size and uncapped ratio.
    #[must_use]
    pub fn fixed(display_size: f64, dpr: f64) -> Self {
        Self::build(display_size.max(1.0), sanitize_dpr(dpr), false)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn build(display_size: f64, dpr: f64, mobile: bool) -> Self {
        let backing_size = ((display_size * dpr).floor() as u32).max(1);
        Self { display_size, dpr, backing_size, mobile }
    }

    /// Display-space size of one cell.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_pitch(&self, size: GridSize) -> f64 {
        self.display_size / size.max_edge() as f64
    }

    /// Whether the half-cell guide lines are legible at this pitch.
    #[must_use]
    pub fn shows_sub_grid(&self, pitch: f64) -> bool {
        let min = if self.mobile { MOBILE_SUBGRID_MIN_PITCH } else { DESKTOP_SUBGRID_MIN_PITCH };
        pitch > min
    }
}

/// Map a pointer position to the cell under it.
///
/// `rect` is the surface as measured at event time, so both origin and pitch
/// follow scrolling and CSS scaling. Points outside the drawn grid yield
/// `None`; anything inside is clamped so rounding at the far edge never
/// produces an out-of-range cell.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn client_to_cell(client: Point, rect: Rect, size: GridSize) -> Option<Cell> {
    let local = Point::new(client.x - rect.x, client.y - rect.y);
    let pitch = rect.width.min(rect.height) / size.max_edge() as f64;
    let extent_x = size.width as f64 * pitch;
    let extent_y = size.height as f64 * pitch;
    if !(pitch > 0.0 && local.x >= 0.0 && local.y >= 0.0 && local.x < extent_x && local.y < extent_y) {
        return None;
    }
    let col = ((local.x / pitch).floor() as usize).min(size.width - 1);
    let row = ((local.y / pitch).floor() as usize).min(size.height - 1);
    Some(Cell::new(row, col))
}

fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

//! Rendering: projects the grid onto a flat draw list.
//!
//! [`draw`] is a pure function of grid, theme and layout. It produces a
//! [`Scene`] in display-space (CSS pixel) coordinates plus the scale factor to
//! reach the backing buffer. Backends only replay the list: the software
//! rasterizer in [`crate::raster`] and, in the browser, the 2D context in
//! `crate::web`. Nothing here mutates state, so rendering twice yields the same
//! scene.
//!
//! Layer order is fixed: background, cell fills, sub-grid, grid lines, border.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::color::Rgba;
use crate::consts::LINE_WIDTH;
use crate::grid::Grid;
use crate::theme::Theme;
use crate::viewport::Layout;

/// One drawing primitive, in display-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    /// Solid rectangle.
    FillRect { x: f64, y: f64, w: f64, h: f64, color: Rgba },
    /// Horizontal line of `width` centered on `y`.
    HLine { y: f64, x0: f64, x1: f64, width: f64, color: Rgba },
    /// Vertical line of `width` centered on `x`.
    VLine { x: f64, y0: f64, y1: f64, width: f64, color: Rgba },
    /// Rectangle outline of `width` centered on its edges.
    StrokeRect { x: f64, y: f64, w: f64, h: f64, width: f64, color: Rgba },
}

/// A complete frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Edge of the drawable area in CSS pixels.
    pub display_size: f64,
    /// CSS-to-backing scale (the effective device pixel ratio).
    pub scale: f64,
    /// Edge of the backing buffer in physical pixels.
    pub backing_size: u32,
    pub ops: Vec<DrawOp>,
}

/// Build the full scene for `grid`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn draw(grid: &Grid, theme: Theme, layout: &Layout) -> Scene {
    let size = layout.display_size;
    let pitch = layout.cell_pitch(grid.size());
    let grid_w = grid.width() as f64 * pitch;
    let grid_h = grid.height() as f64 * pitch;
    let mut ops = Vec::with_capacity(grid.painted_count() + 2 * (grid.width() + grid.height()) + 4);

    // Layer 1: background doubles as the fill for empty cells.
    ops.push(DrawOp::FillRect { x: 0.0, y: 0.0, w: size, h: size, color: theme.background().opaque() });

    // Layer 2: painted cells.
    for (cell, color) in grid.iter() {
        if let Some(color) = color {
            ops.push(DrawOp::FillRect {
                x: cell.col as f64 * pitch,
                y: cell.row as f64 * pitch,
                w: pitch,
                h: pitch,
                color: color.opaque(),
            });
        }
    }

    // Layer 3: half-cell guides, only when cells are large enough to read them.
    if layout.shows_sub_grid(pitch) {
        let color = theme.sub_grid_line();
        for i in 0..grid.width() {
            let x = crisp((i as f64 + 0.5) * pitch);
            ops.push(DrawOp::VLine { x, y0: 0.0, y1: grid_h, width: LINE_WIDTH, color });
        }
        for i in 0..grid.height() {
            let y = crisp((i as f64 + 0.5) * pitch);
            ops.push(DrawOp::HLine { y, x0: 0.0, x1: grid_w, width: LINE_WIDTH, color });
        }
    }

    // Layer 4: one line per cell boundary.
    let color = theme.grid_line();
    for i in 0..=grid.width() {
        let x = crisp(i as f64 * pitch);
        ops.push(DrawOp::VLine { x, y0: 0.0, y1: grid_h, width: LINE_WIDTH, color });
    }
    for i in 0..=grid.height() {
        let y = crisp(i as f64 * pitch);
        ops.push(DrawOp::HLine { y, x0: 0.0, x1: grid_w, width: LINE_WIDTH, color });
    }

    // Layer 5: border.
    ops.push(DrawOp::StrokeRect {
        x: 0.5,
        y: 0.5,
        w: size - 1.0,
        h: size - 1.0,
        width: LINE_WIDTH,
        color: theme.border(),
    });

    Scene { display_size: size, scale: layout.dpr, backing_size: layout.backing_size, ops }
}

/// Snap a line position to a pixel center.
fn crisp(pos: f64) -> f64 {
    pos.round() + 0.5
}

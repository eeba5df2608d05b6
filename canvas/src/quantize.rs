//! Image import: map a grid-sized RGBA buffer onto the active palette.
//!
//! Downsampling happens in the host (browser `drawImage`, or the `image`
//! crate natively). This module only sees the final `width x height` pixels.

#[cfg(test)]
#[path = "quantize_test.rs"]
mod quantize_test;

use crate::color::Rgb;
use crate::error::{CanvasError, Result};
use crate::grid::{Grid, GridSize};
use crate::palette::Palette;

/// Accept any `image/*` MIME type.
///
/// # Errors
///
/// [`CanvasError::InvalidImageType`] for anything else.
pub fn validate_mime(mime: &str) -> Result<()> {
    let essence = mime.trim().to_ascii_lowercase();
    match essence.split_once('/') {
        Some(("image", sub)) if !sub.is_empty() => Ok(()),
        _ => Err(CanvasError::InvalidImageType(mime.to_owned())),
    }
}

/// Build a new grid whose cell `(r, c)` is the palette entry nearest pixel `(c, r)`.
///
/// Alpha is ignored: every cell of the result is painted.
///
/// # Errors
///
/// [`CanvasError::PixelBufferSize`] when `pixels` is not `width * height * 4` bytes.
pub fn quantize_rgba(pixels: &[u8], size: GridSize, palette: &Palette) -> Result<Grid> {
    let expected = size.total() * 4;
    if pixels.len() != expected {
        return Err(CanvasError::PixelBufferSize { expected, actual: pixels.len() });
    }
    let cells = pixels
        .chunks_exact(4)
        .map(|px| Some(palette.nearest(Rgb::new(px[0], px[1], px[2]))))
        .collect();
    Grid::from_cells(size, cells)
}

/// Mean squared RGB error between a source buffer and a quantized grid.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn quantization_error(pixels: &[u8], grid: &Grid) -> f64 {
    let n = grid.total().min(pixels.len() / 4);
    if n == 0 {
        return 0.0;
    }
    let sum: u64 = pixels
        .chunks_exact(4)
        .zip(grid.cells())
        .map(|(px, cell)| cell.map_or(0, |c| u64::from(c.distance_sq(Rgb::new(px[0], px[1], px[2])))))
        .sum();
    sum as f64 / n as f64
}

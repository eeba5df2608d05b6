#![allow(clippy::float_cmp)]

use super::*;
use crate::palette::PaletteCatalog;

fn solid(size: GridSize, color: Rgb, alpha: u8) -> Vec<u8> {
    (0..size.total()).flat_map(|_| [color.r, color.g, color.b, alpha]).collect()
}

fn size10() -> GridSize {
    GridSize::square(10).unwrap()
}

// =============================================================
// MIME validation
// =============================================================

#[test]
fn image_types_are_accepted() {
    for mime in ["image/png", "image/jpeg", "IMAGE/WebP", "image/svg+xml"] {
        assert!(validate_mime(mime).is_ok(), "{mime}");
    }
}

#[test]
fn non_image_types_are_rejected() {
    for mime in ["text/plain", "application/pdf", "image", "image/", "", "imagex/png"] {
        assert!(matches!(validate_mime(mime), Err(CanvasError::InvalidImageType(_))), "{mime}");
    }
}

// =============================================================
// Quantization
// =============================================================

#[test]
fn exact_palette_colors_quantize_without_error() {
    let palette = PaletteCatalog::builtin().get("calm-1").unwrap();
    let size = size10();
    let pixels: Vec<u8> = (0..size.total())
        .flat_map(|i| {
            let c = palette.colors()[i % palette.len()];
            [c.r, c.g, c.b, 255]
        })
        .collect();
    let grid = quantize_rgba(&pixels, size, &palette).unwrap();
    assert_eq!(quantization_error(&pixels, &grid), 0.0);
    assert_eq!(grid.get(0, 1), Some(palette.colors()[1]));
}

#[test]
fn white_and_black_map_to_fixed_entries() {
    let catalog = PaletteCatalog::builtin();
    let palette = catalog.get("energy-1").unwrap();
    let white = quantize_rgba(&solid(size10(), Rgb::WHITE, 255), size10(), &palette).unwrap();
    let black = quantize_rgba(&solid(size10(), Rgb::BLACK, 255), size10(), &palette).unwrap();
    assert!(white.cells().iter().all(|c| *c == Some(Rgb::new(0xfd, 0xe0, 0x47))));
    assert!(black.cells().iter().all(|c| *c == Some(Rgb::new(0xa1, 0x62, 0x07))));
}

#[test]
fn alpha_is_ignored_and_every_cell_is_painted() {
    let palette = PaletteCatalog::builtin().get("designer").unwrap();
    let grid = quantize_rgba(&solid(size10(), Rgb::BLACK, 0), size10(), &palette).unwrap();
    assert_eq!(grid.painted_count(), 100);
    assert_eq!(grid.get(9, 9), Rgb::parse_hex("#45B7D1"));
}

#[test]
fn pixel_position_maps_to_row_and_column() {
    let palette = Palette::new([Rgb::BLACK, Rgb::WHITE]).unwrap();
    let size = GridSize::new(15, 10).unwrap();
    let mut pixels = solid(size, Rgb::BLACK, 255);
    // pixel (x = 4, y = 2)
    let i = (2 * 15 + 4) * 4;
    pixels[i..i + 3].copy_from_slice(&[250, 250, 250]);
    let grid = quantize_rgba(&pixels, size, &palette).unwrap();
    assert_eq!(grid.get(2, 4), Some(Rgb::WHITE));
    assert_eq!(grid.get(4, 2), Some(Rgb::BLACK));
}

#[test]
fn wrong_buffer_length_is_rejected() {
    let palette = PaletteCatalog::builtin().get("session").unwrap();
    let err = quantize_rgba(&[0; 12], size10(), &palette).unwrap_err();
    assert!(matches!(err, CanvasError::PixelBufferSize { expected: 400, actual: 12 }));
}

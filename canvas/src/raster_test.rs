use super::*;
use crate::grid::{Grid, GridSize};
use crate::render::draw;
use crate::theme::Theme;
use crate::viewport::Layout;

const RED: Rgb = Rgb::new(255, 0, 0);

fn grid(edge: usize) -> Grid {
    Grid::new(GridSize::square(edge).unwrap())
}

// =============================================================
// Primitive coverage
// =============================================================

#[test]
fn new_surface_is_transparent() {
    let s = RasterSurface::new(4, 3);
    assert_eq!(s.pixels().len(), 48);
    assert_eq!(s.pixel(3, 2), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(4, 0), None);
}

#[test]
fn zero_area_surface_is_empty() {
    let s = RasterSurface::from_scene(&Scene { display_size: 0.0, scale: 1.0, backing_size: 0, ops: Vec::new() });
    assert!(s.pixels().is_empty());
    assert_eq!(s.pixel(0, 0), None);
}

#[test]
fn opaque_fill_overwrites() {
    let scene = Scene {
        display_size: 4.0,
        scale: 1.0,
        backing_size: 4,
        ops: vec![DrawOp::FillRect { x: 1.0, y: 1.0, w: 2.0, h: 2.0, color: RED.opaque() }],
    };
    let s = RasterSurface::from_scene(&scene);
    assert_eq!(s.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(2, 2), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn translucent_line_blends_over_white() {
    let scene = Scene {
        display_size: 4.0,
        scale: 1.0,
        backing_size: 4,
        ops: vec![
            DrawOp::FillRect { x: 0.0, y: 0.0, w: 4.0, h: 4.0, color: Rgb::WHITE.opaque() },
            DrawOp::VLine { x: 1.5, y0: 0.0, y1: 4.0, width: 1.0, color: Rgba::new(0, 0, 0, 0.2) },
        ],
    };
    let s = RasterSurface::from_scene(&scene);
    // 255 * 0.8 = 204
    assert_eq!(s.pixel(1, 0), Some([204, 204, 204, 255]));
    assert_eq!(s.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(2, 0), Some([255, 255, 255, 255]));
}

#[test]
fn stroke_rect_corners_blend_once() {
    let scene = Scene {
        display_size: 8.0,
        scale: 1.0,
        backing_size: 8,
        ops: vec![
            DrawOp::FillRect { x: 0.0, y: 0.0, w: 8.0, h: 8.0, color: Rgb::WHITE.opaque() },
            DrawOp::StrokeRect { x: 0.5, y: 0.5, w: 7.0, h: 7.0, width: 1.0, color: Rgba::new(0, 0, 0, 0.5) },
        ],
    };
    let s = RasterSurface::from_scene(&scene);
    let edge = s.pixel(3, 0);
    assert_eq!(s.pixel(0, 0), edge);
    assert_eq!(s.pixel(7, 7), edge);
    assert_eq!(s.pixel(0, 4), edge);
    assert_eq!(s.pixel(3, 3), Some([255, 255, 255, 255]));
}

#[test]
fn scale_maps_display_to_backing() {
    let scene = Scene {
        display_size: 2.0,
        scale: 2.0,
        backing_size: 4,
        ops: vec![DrawOp::FillRect { x: 1.0, y: 0.0, w: 1.0, h: 1.0, color: RED.opaque() }],
    };
    let s = RasterSurface::from_scene(&scene);
    assert_eq!(s.rgb(2, 0), Some(RED));
    assert_eq!(s.rgb(3, 1), Some(RED));
    assert_eq!(s.pixel(1, 0), Some([0, 0, 0, 0]));
}

// =============================================================
// Whole scenes
// =============================================================

#[test]
fn painted_cell_center_shows_palette_color() {
    let mut g = grid(10);
    g.set_cell(4, 7, Some(RED)).unwrap();
    let s = RasterSurface::from_scene(&draw(&g, Theme::Light, &Layout::fixed(100.0, 1.0)));
    assert_eq!(s.pixel(75, 45), Some([255, 0, 0, 255]));
    assert_eq!(s.rgb(25, 25), Some(Rgb::WHITE));
}

#[test]
fn dark_background_fills_empty_cells() {
    let s = RasterSurface::from_scene(&draw(&grid(10), Theme::Dark, &Layout::fixed(100.0, 1.0)));
    assert_eq!(s.rgb(55, 55), Some(Theme::Dark.background()));
}

#[test]
fn replay_is_deterministic() {
    let mut g = grid(20);
    g.flood_fill(3, 3, Some(RED)).unwrap();
    let scene = draw(&g, Theme::Dark, &Layout::fixed(200.0, 1.5));
    assert_eq!(RasterSurface::from_scene(&scene), RasterSurface::from_scene(&scene));
}

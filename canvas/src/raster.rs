//! Software rasterizer: replays a [`Scene`] into a `tiny_skia` pixmap.
//!
//! Used for PNG export, for the sampled progress estimate, and by native hosts
//! that have no browser canvas. Fills are aliased so every edge snaps to whole
//! pixels the way the browser's crisp-line offsets intend; translucent lines
//! blend source-over.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use tiny_skia::{Color, Paint, Pixmap, Transform};

use crate::color::{Rgb, Rgba};
use crate::render::{DrawOp, Scene};

#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    /// `None` for a zero-area surface, which `tiny_skia` cannot allocate.
    pixmap: Option<Pixmap>,
}

impl RasterSurface {
    /// A fully transparent surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixmap: Pixmap::new(width, height) }
    }

    /// Rasterize a scene onto a fresh surface of its backing size.
    #[must_use]
    pub fn from_scene(scene: &Scene) -> Self {
        let mut surface = Self::new(scene.backing_size, scene.backing_size);
        surface.replay(scene);
        surface
    }

    /// Execute every op of `scene` in order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn replay(&mut self, scene: &Scene) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let s = scene.scale as f32;
        let transform = Transform::from_scale(s, s);
        for op in &scene.ops {
            match *op {
                DrawOp::FillRect { x, y, w, h, color } => {
                    fill(pixmap, transform, x, y, x + w, y + h, color);
                }
                DrawOp::HLine { y, x0, x1, width, color } => {
                    let hw = width / 2.0;
                    fill(pixmap, transform, x0, y - hw, x1, y + hw, color);
                }
                DrawOp::VLine { x, y0, y1, width, color } => {
                    let hw = width / 2.0;
                    fill(pixmap, transform, x - hw, y0, x + hw, y1, color);
                }
                DrawOp::StrokeRect { x, y, w, h, width, color } => {
                    let hw = width / 2.0;
                    let (l, t, r, b) = (x - hw, y - hw, x + w + hw, y + h + hw);
                    // Edges split so corners are covered once.
                    fill(pixmap, transform, l, t, r, y + hw, color);
                    fill(pixmap, transform, l, y + h - hw, r, b, color);
                    fill(pixmap, transform, l, y + hw, x + hw, y + h - hw, color);
                    fill(pixmap, transform, x + w - hw, y + hw, r, y + h - hw, color);
                }
            }
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Straight-alpha RGBA8 bytes, row-major.
    #[must_use]
    pub fn pixels(&self) -> Vec<u8> {
        let Some(pixmap) = &self.pixmap else {
            return Vec::new();
        };
        pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// RGBA at `(x, y)`, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Color at `(x, y)` ignoring alpha.
    #[must_use]
    pub fn rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        self.pixel(x, y).map(|[r, g, b, _]| Rgb::new(r, g, b))
    }
}

/// Fill the display-space box `[x0, x1) x [y0, y1)`. Empty boxes draw nothing.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fill(pixmap: &mut Pixmap, transform: Transform, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba) {
    let Some(rect) = tiny_skia::Rect::from_ltrb(x0 as f32, y0 as f32, x1 as f32, y1 as f32) else {
        return;
    };
    let alpha = (color.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(color.rgb.r, color.rgb.g, color.rgb.b, alpha));
    paint.anti_alias = false;
    pixmap.fill_rect(rect, &paint, transform, None);
}

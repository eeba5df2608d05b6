//! Browser bindings: the canvas element, `localStorage` and environment probes.
//!
//! This module is the only place that touches `web_sys`. It adapts the
//! browser to the traits [`EngineCore`] is written against and replays
//! [`Scene`]s onto a [`CanvasRenderingContext2d`]. All fallible `Canvas2D`
//! calls propagate errors via `Result<(), JsValue>`.

use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Storage, Window};

use crate::consts::MAX_DISPLAY_SIZE;
use crate::engine::{Action, EngineCore, SessionConfig};
use crate::input::{Button, PointerKind};
use crate::persist::KeyValueStore;
use crate::render::{DrawOp, Scene};
use crate::theme::Environment;
use crate::viewport::{Point, Rect};

/// Route `log` output to the browser console.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: log::Level) {
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already installed: {e}")));
    }
}

// =============================================================
// Environment
// =============================================================

/// Live window probes: color scheme, viewport width, pixel ratio.
pub struct BrowserEnvironment {
    window: Option<Window>,
}

impl Default for BrowserEnvironment {
    fn default() -> Self {
        Self { window: web_sys::window() }
    }
}

impl Environment for BrowserEnvironment {
    fn prefers_dark(&self) -> bool {
        let Some(window) = &self.window else {
            return false;
        };
        match window.match_media("(prefers-color-scheme: dark)") {
            Ok(Some(query)) => query.matches(),
            Ok(None) => false,
            Err(e) => {
                warn!("web: matchMedia failed: {e:?}");
                false
            }
        }
    }

    fn viewport_width(&self) -> f64 {
        let Some(window) = &self.window else {
            return MAX_DISPLAY_SIZE;
        };
        match window.inner_width() {
            Ok(width) => width.as_f64().unwrap_or(MAX_DISPLAY_SIZE),
            Err(e) => {
                warn!("web: innerWidth unavailable: {e:?}");
                MAX_DISPLAY_SIZE
            }
        }
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.as_ref().map_or(1.0, Window::device_pixel_ratio)
    }
}

// =============================================================
// Storage
// =============================================================

/// `window.localStorage`. Quota and privacy-mode failures are logged and dropped.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl Default for LocalStorage {
    fn default() -> Self {
        let storage = match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(storage)) => storage,
            Some(Err(e)) => {
                warn!("web: localStorage unavailable: {e:?}");
                None
            }
            None => None,
        };
        Self { storage }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("web: read of {key} failed: {e:?}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                warn!("web: write of {key} failed: {e:?}");
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.remove_item(key) {
                warn!("web: remove of {key} failed: {e:?}");
            }
        }
    }
}

// =============================================================
// Drawing
// =============================================================

/// Replay a draw list. The context is scaled by the scene's pixel ratio so
/// every coordinate stays in CSS pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn replay(ctx: &CanvasRenderingContext2d, scene: &Scene) -> Result<(), JsValue> {
    ctx.set_transform(scene.scale, 0.0, 0.0, scene.scale, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, scene.display_size, scene.display_size);

    for op in &scene.ops {
        match op {
            DrawOp::FillRect { x, y, w, h, color } => {
                ctx.set_fill_style_str(&color.css());
                ctx.fill_rect(*x, *y, *w, *h);
            }
            DrawOp::HLine { y, x0, x1, width, color } => {
                stroke_segment(ctx, (*x0, *y), (*x1, *y), *width, &color.css());
            }
            DrawOp::VLine { x, y0, y1, width, color } => {
                stroke_segment(ctx, (*x, *y0), (*x, *y1), *width, &color.css());
            }
            DrawOp::StrokeRect { x, y, w, h, width, color } => {
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(*width);
                ctx.stroke_rect(*x, *y, *w, *h);
            }
        }
    }
    Ok(())
}

fn stroke_segment(ctx: &CanvasRenderingContext2d, from: (f64, f64), to: (f64, f64), width: f64, css: &str) {
    ctx.set_stroke_style_str(css);
    ctx.set_line_width(width);
    ctx.begin_path();
    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);
    ctx.stroke();
}

// =============================================================
// Engine
// =============================================================

/// The full engine. Wraps [`EngineCore`] and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`, hydrated from `localStorage`.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: SessionConfig) -> Self {
        let core = EngineCore::new(config, Box::new(LocalStorage::default()), Box::new(BrowserEnvironment::default()));
        Self { canvas, core }
    }

    /// Size the canvas for `container_width` and start accepting input.
    pub fn attach(&mut self, container_width: f64) -> Vec<Action> {
        let actions = self.core.attach(container_width, self.client_rect());
        self.sync_surface();
        actions
    }

    pub fn teardown(&mut self) {
        self.core.teardown();
    }

    pub fn on_resize(&mut self, container_width: f64, now_ms: f64) {
        self.core.on_resize(container_width, self.client_rect(), now_ms);
    }

    /// Advance timers; re-sizes the backing store after a settled resize.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        let before = self.core.layout;
        let actions = self.core.tick(now_ms);
        if self.core.layout != before {
            self.sync_surface();
        }
        actions
    }

    // --- Input events ---

    // The client rect is re-measured per event: scrolling and CSS scaling
    // move the canvas without a resize.

    pub fn on_pointer_down(&mut self, client: Point, button: i16, pointer_type: &str, now_ms: f64) -> Vec<Action> {
        self.core.set_surface_rect(self.client_rect());
        self.core.on_pointer_down(client, Button::from_dom(button), PointerKind::from_dom(pointer_type), now_ms)
    }

    pub fn on_pointer_move(&mut self, client: Point, now_ms: f64) -> Vec<Action> {
        self.core.set_surface_rect(self.client_rect());
        self.core.on_pointer_move(client, now_ms)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.core.on_pointer_cancel()
    }

    pub fn on_context_menu(&mut self, client: Point, now_ms: f64) -> Vec<Action> {
        self.core.set_surface_rect(self.client_rect());
        self.core.on_context_menu(client, now_ms)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        if self.core.refresh_theme() {
            debug!("web: color scheme changed to {:?}", self.core.theme);
        }
        replay(&self.context()?, &self.core.scene())
    }

    /// Save using the pixels already on the canvas.
    pub fn save(&mut self) -> Vec<Action> {
        let url = match self.render().and_then(|()| self.canvas.to_data_url()) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("web: canvas export failed: {e:?}");
                None
            }
        };
        self.core.save_with_data_url(url.as_deref())
    }

    fn context(&self) -> Result<CanvasRenderingContext2d, JsValue> {
        self.canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)
    }

    fn client_rect(&self) -> Rect {
        let bounds = self.canvas.get_bounding_client_rect();
        Rect::new(bounds.left(), bounds.top(), bounds.width(), bounds.height())
    }

    /// Match the backing store to the layout, then re-measure.
    fn sync_surface(&mut self) {
        let layout = self.core.layout;
        self.canvas.set_width(layout.backing_size);
        self.canvas.set_height(layout.backing_size);
        let css = format!("{}px", layout.display_size);
        let style = self.canvas.style();
        for property in ["width", "height"] {
            if let Err(e) = style.set_property(property, &css) {
                warn!("web: could not set canvas {property}: {e:?}");
            }
        }
        self.core.set_surface_rect(self.client_rect());
    }
}

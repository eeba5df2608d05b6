//! Session engine: one activity view, from pointer events to persisted state.
//!
//! [`EngineCore`] owns the grid, palette, gesture state, progress tracker,
//! timers, layout and persistence for a single activity. Every handler
//! returns a list of [`Action`]s for the host to act on (redraw, toast,
//! confirmation dialog). Time always comes from the caller as monotonic
//! milliseconds; the engine never reads a clock.
//!
//! The core has no browser dependencies so it can be driven from tests and
//! native hosts. `crate::web::Engine` binds it to a canvas element.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use log::{debug, info, warn};

use crate::activity::{Activity, CompletionReport};
use crate::color::Rgb;
use crate::consts::COMPLETE_PERCENT;
use crate::error::{CanvasError, Result};
use crate::export::{self, SharePayload};
use crate::grid::{Cell, Grid, GridSize};
use crate::input::{Button, GestureState, PointerKind, Tool, UiState};
use crate::palette::{Palette, PaletteCatalog};
use crate::persist::{self, KeyValueStore, PersistedSession};
use crate::progress::{ProgressState, ProgressTracker, Scoring};
use crate::quantize;
use crate::raster::RasterSurface;
use crate::render::{self, Scene};
use crate::theme::{Environment, Theme};
use crate::timer::{Debounce, LongPress, SessionClock};
use crate::viewport::{self, Layout, Point, Rect};

pub const MSG_COMPLETED: &str = "Congratulations! You've completed the activity!";
pub const MSG_RESET: &str = "Canvas has been reset";
pub const MSG_SAVED: &str = "Progress saved successfully!";
pub const MSG_SAVE_FAILED: &str = "Failed to save progress";
pub const MSG_IMPORTED: &str = "Image imported successfully!";
pub const MSG_INVALID_IMAGE: &str = "Please select a valid image file";
pub const MSG_IMPORT_FAILED: &str = "Failed to import image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Destructive operations awaiting the user's confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Reset,
    Resize(GridSize),
    Import,
}

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    ProgressChanged(ProgressState),
    /// Emitted once, the first time the session reaches completion.
    Completed,
    ElapsedChanged(u64),
    ColorChanged(Rgb),
    PlayStateChanged(bool),
    Toast { kind: ToastKind, message: String },
    ConfirmRequested(Confirm),
}

impl Action {
    fn success(message: &str) -> Self {
        Self::Toast { kind: ToastKind::Success, message: message.to_owned() }
    }

    fn error(message: &str) -> Self {
        Self::Toast { kind: ToastKind::Error, message: message.to_owned() }
    }
}

/// Everything the engine needs to know about the session up front.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub activity: Activity,
    pub palette: Palette,
    /// Size of a fresh grid. A saved snapshot's size takes precedence.
    pub grid_size: GridSize,
    /// Fixed theme; `None` follows the environment's preference.
    pub theme: Option<Theme>,
    pub scoring: Scoring,
}

impl SessionConfig {
    /// Config for `activity` with its palette resolved through `catalog`.
    ///
    /// # Errors
    ///
    /// [`CanvasError::EmptyPalette`] when no palette can be found.
    pub fn new(activity: Activity, catalog: &PaletteCatalog) -> Result<Self> {
        let palette = activity.palette(catalog).ok_or(CanvasError::EmptyPalette)?;
        Ok(Self { activity, palette, grid_size: GridSize::default(), theme: None, scoring: Scoring::default() })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Pending {
    Reset,
    Resize(GridSize),
    Import(Grid),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
pub struct EngineCore {
    pub activity: Activity,
    pub palette: Palette,
    pub grid: Grid,
    pub ui: UiState,
    pub gesture: GestureState,
    pub progress: ProgressTracker,
    pub layout: Layout,
    pub theme: Theme,
    pub clock: SessionClock,
    theme_fixed: bool,
    rect: Option<Rect>,
    next_container: f64,
    next_rect: Option<Rect>,
    resize: Debounce,
    long_press: LongPress,
    stroke_dirty: bool,
    paused: bool,
    pending: Option<Pending>,
    store: Box<dyn KeyValueStore>,
    env: Box<dyn Environment>,
}

impl EngineCore {
    /// Build the engine and hydrate it from `store`.
    #[must_use]
    pub fn new(config: SessionConfig, store: Box<dyn KeyValueStore>, env: Box<dyn Environment>) -> Self {
        let SessionConfig { activity, palette, grid_size, theme, scoring } = config;
        let mut progress = ProgressTracker::new(activity.level, scoring);
        let mut grid = Grid::new(grid_size);
        let mut clock = SessionClock::default();

        let legacy = persist::load_legacy_progress(store.as_ref(), &activity.id);
        if let Some(restored) = persist::load_session(store.as_ref(), &activity.id) {
            debug!("engine: restored {} ({} painted)", activity.id, restored.grid.painted_count());
            grid = restored.grid;
            clock = SessionClock::with_elapsed(restored.elapsed_secs);
            progress.evaluate(&grid);
            let complete = restored.complete
                || restored.progress.is_some_and(|p| p >= COMPLETE_PERCENT)
                || legacy.is_some_and(|p| p >= COMPLETE_PERCENT);
            progress.restore(progress.state().adjusted_percent, complete);
        } else if let Some(pct) = legacy {
            progress.restore(pct, false);
        }

        let resolved = theme.unwrap_or_else(|| Theme::detect(env.as_ref()));
        let ui = UiState { tool: Tool::default(), color: palette.first() };

        Self {
            activity,
            palette,
            grid,
            ui,
            gesture: GestureState::Idle,
            progress,
            layout: Layout::default(),
            theme: resolved,
            clock,
            theme_fixed: theme.is_some(),
            rect: None,
            next_container: 0.0,
            next_rect: None,
            resize: Debounce::default(),
            long_press: LongPress::default(),
            stroke_dirty: false,
            paused: false,
            pending: None,
            store,
            env,
        }
    }

    // --- Lifecycle ---

    /// Bind to a drawing surface of the given container width and client rect.
    pub fn attach(&mut self, container_width: f64, rect: Rect) -> Vec<Action> {
        self.apply_layout(container_width, rect);
        let mut actions = vec![Action::RenderNeeded];
        actions.extend(self.recompute(true));
        actions
    }

    /// Bind with an explicit layout (native hosts, export).
    pub fn attach_fixed(&mut self, layout: Layout) -> Vec<Action> {
        self.layout = layout;
        self.rect = Some(Rect::square(layout.display_size));
        let mut actions = vec![Action::RenderNeeded];
        actions.extend(self.recompute(true));
        actions
    }

    /// Cancel every pending timer and drop the surface.
    pub fn teardown(&mut self) {
        self.resize.cancel();
        self.long_press.cancel();
        self.clock.stop();
        self.gesture = GestureState::Idle;
        self.stroke_dirty = false;
        self.rect = None;
        self.next_rect = None;
        debug!("engine: teardown {}", self.activity.id);
    }

    /// Re-measure the surface after the host restyled it. Ignored while detached.
    pub fn set_surface_rect(&mut self, rect: Rect) {
        if self.rect.is_some() {
            self.rect = Some(rect);
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.rect.is_some()
    }

    /// Record a resize; layout is recomputed once the burst settles.
    pub fn on_resize(&mut self, container_width: f64, rect: Rect, now_ms: f64) {
        self.next_container = container_width;
        self.next_rect = Some(rect);
        self.resize.trigger(now_ms);
    }

    /// Advance timers.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        let mut actions = Vec::new();

        if self.resize.poll(now_ms) {
            if let Some(rect) = self.next_rect.take() {
                self.apply_layout(self.next_container, rect);
                debug!("engine: relayout to {}px @{}x", self.layout.display_size, self.layout.dpr);
                actions.push(Action::RenderNeeded);
            }
        }

        if let Some(cell) = self.long_press.poll(now_ms) {
            debug!("engine: long press at ({}, {})", cell.row, cell.col);
            if self.write(cell, None, now_ms) {
                actions.push(Action::RenderNeeded);
            }
            self.gesture = GestureState::Inert { pointer: PointerKind::Touch };
        }

        if self.clock.tick(now_ms) {
            actions.push(Action::ElapsedChanged(self.clock.elapsed_secs()));
        }

        actions
    }

    fn apply_layout(&mut self, container_width: f64, rect: Rect) {
        self.layout = Layout::fit(container_width, self.env.as_ref());
        self.rect = Some(rect);
        self.refresh_theme();
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, client: Point, button: Button, pointer: PointerKind, now_ms: f64) -> Vec<Action> {
        if button != Button::Primary || !self.gesture.is_idle() {
            return Vec::new();
        }
        let Some(cell) = self.hit(client) else {
            return Vec::new();
        };

        match self.ui.tool {
            Tool::Diamond | Tool::Eraser => {
                let value = if self.ui.tool == Tool::Eraser { None } else { Some(self.ui.color) };
                self.gesture = GestureState::Pressing { cell, pointer, value };
                if pointer == PointerKind::Touch {
                    self.long_press.start(now_ms, cell);
                }
                if self.write(cell, value, now_ms) { vec![Action::RenderNeeded] } else { Vec::new() }
            }
            Tool::Fill => {
                self.gesture = GestureState::Inert { pointer };
                match self.grid.flood_fill(cell.row, cell.col, Some(self.ui.color)) {
                    Ok(0) => Vec::new(),
                    Ok(n) => {
                        debug!("engine: filled {n} cells");
                        self.after_mutation(now_ms);
                        vec![Action::RenderNeeded]
                    }
                    Err(e) => {
                        warn!("engine: fill dropped: {e}");
                        Vec::new()
                    }
                }
            }
            Tool::Picker => {
                self.gesture = GestureState::Inert { pointer };
                match self.grid.get(cell.row, cell.col) {
                    Some(color) if self.palette.contains(color) => {
                        self.ui.color = color;
                        self.ui.tool = Tool::Diamond;
                        vec![Action::ColorChanged(color)]
                    }
                    _ => Vec::new(),
                }
            }
        }
    }

    pub fn on_pointer_move(&mut self, client: Point, now_ms: f64) -> Vec<Action> {
        if self.gesture.is_idle() {
            return Vec::new();
        }
        self.long_press.cancel();
        let Some(cell) = self.hit(client) else {
            return Vec::new();
        };
        let Some(value) = self.gesture.enter(cell) else {
            return Vec::new();
        };
        if self.write(cell, value, now_ms) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// End the gesture. Progress is recomputed here, once per stroke.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.long_press.cancel();
        if self.gesture.is_idle() {
            return Vec::new();
        }
        self.gesture = GestureState::Idle;
        if std::mem::take(&mut self.stroke_dirty) { self.recompute(false) } else { Vec::new() }
    }

    /// Pointer left the page or the browser took over the gesture.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    /// Right-click / context menu: clear the cell under the pointer regardless of tool.
    pub fn on_context_menu(&mut self, client: Point, now_ms: f64) -> Vec<Action> {
        let Some(cell) = self.hit(client) else {
            return Vec::new();
        };
        if !self.write(cell, None, now_ms) {
            return Vec::new();
        }
        let mut actions = vec![Action::RenderNeeded];
        if self.gesture.is_idle() {
            self.stroke_dirty = false;
            actions.extend(self.recompute(false));
        }
        actions
    }

    fn hit(&self, client: Point) -> Option<Cell> {
        let rect = self.rect?;
        viewport::client_to_cell(client, rect, self.grid.size())
    }

    /// Write one cell. Returns whether it changed.
    fn write(&mut self, cell: Cell, value: Option<Rgb>, now_ms: f64) -> bool {
        match self.grid.set_cell(cell.row, cell.col, value) {
            Ok(true) => {
                self.after_mutation(now_ms);
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!("engine: write dropped: {e}");
                false
            }
        }
    }

    fn after_mutation(&mut self, now_ms: f64) {
        self.stroke_dirty = true;
        if !self.paused {
            self.clock.start(now_ms);
        }
        self.persist();
    }

    fn persist(&mut self) {
        let state = self.progress.state();
        let session =
            PersistedSession::capture(&self.grid, self.clock.elapsed_secs(), state.adjusted_percent, state.complete);
        if let Err(e) = persist::save_session(self.store.as_mut(), &self.activity.id, &session) {
            warn!("engine: save failed for {}: {e}", self.activity.id);
        }
    }

    /// Re-evaluate progress. Skipped while no surface is attached.
    fn recompute(&mut self, force_report: bool) -> Vec<Action> {
        if self.rect.is_none() {
            return Vec::new();
        }
        let eval = self.progress.evaluate(&self.grid);
        let state = self.progress.state();
        debug!("engine: progress {}% (raw {:.3})", state.adjusted_percent, state.raw_fraction);

        if eval.changed {
            self.persist();
        }

        let mut actions = Vec::new();
        if eval.changed || force_report {
            actions.push(Action::ProgressChanged(state));
        }
        if eval.completed_now {
            info!("engine: {} complete", self.activity.id);
            actions.push(Action::Completed);
            actions.push(Action::success(MSG_COMPLETED));
        }
        actions
    }

    // --- Tool / color ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Switch between the diamond and eraser tools.
    pub fn toggle_eraser(&mut self) {
        self.ui.tool = if self.ui.tool == Tool::Eraser { Tool::Diamond } else { Tool::Eraser };
    }

    /// Make `color` current. Colors outside the palette are refused.
    pub fn select_color(&mut self, color: Rgb) -> Vec<Action> {
        if !self.palette.contains(color) {
            warn!("engine: {color} is not in the palette");
            return Vec::new();
        }
        self.ui.color = color;
        if self.ui.tool == Tool::Eraser {
            self.ui.tool = Tool::Diamond;
        }
        vec![Action::ColorChanged(color)]
    }

    /// Re-read the color-scheme preference unless the theme is fixed.
    /// Returns whether the theme changed.
    pub fn refresh_theme(&mut self) -> bool {
        if self.theme_fixed {
            return false;
        }
        let detected = Theme::detect(self.env.as_ref());
        let changed = detected != self.theme;
        self.theme = detected;
        changed
    }

    /// Use a fixed theme, or follow the environment again with `None`.
    pub fn set_theme(&mut self, theme: Option<Theme>) -> Vec<Action> {
        self.theme_fixed = theme.is_some();
        self.theme = theme.unwrap_or_else(|| Theme::detect(self.env.as_ref()));
        vec![Action::RenderNeeded]
    }

    // --- Destructive operations ---

    /// Change grid size. Discards the painting, so painted grids ask first.
    pub fn set_grid_size(&mut self, size: GridSize) -> Vec<Action> {
        if size == self.grid.size() {
            return Vec::new();
        }
        if self.grid.is_blank() {
            return self.apply_resize(size);
        }
        self.pending = Some(Pending::Resize(size));
        vec![Action::ConfirmRequested(Confirm::Resize(size))]
    }

    pub fn request_reset(&mut self) -> Vec<Action> {
        self.pending = Some(Pending::Reset);
        vec![Action::ConfirmRequested(Confirm::Reset)]
    }

    /// Import an image already downsampled to [`EngineCore::import_size`].
    pub fn import_image(&mut self, mime: &str, pixels: &[u8]) -> Vec<Action> {
        if let Err(e) = quantize::validate_mime(mime) {
            warn!("engine: import rejected: {e}");
            return vec![Action::error(MSG_INVALID_IMAGE)];
        }
        let imported = match quantize::quantize_rgba(pixels, self.grid.size(), &self.palette) {
            Ok(grid) => grid,
            Err(e) => {
                warn!("engine: import failed: {e}");
                return vec![Action::error(MSG_IMPORT_FAILED)];
            }
        };
        if self.grid.is_blank() {
            return self.apply_import(imported);
        }
        self.pending = Some(Pending::Import(imported));
        vec![Action::ConfirmRequested(Confirm::Import)]
    }

    /// Grid size the host must downsample imports to.
    #[must_use]
    pub fn import_size(&self) -> GridSize {
        self.grid.size()
    }

    /// Carry out the pending destructive operation.
    pub fn confirm(&mut self) -> Vec<Action> {
        match self.pending.take() {
            Some(Pending::Reset) => self.apply_reset(),
            Some(Pending::Resize(size)) => self.apply_resize(size),
            Some(Pending::Import(grid)) => self.apply_import(grid),
            None => Vec::new(),
        }
    }

    /// Drop the pending operation; nothing changes.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn pending_confirmation(&self) -> Option<Confirm> {
        self.pending.as_ref().map(|p| match p {
            Pending::Reset => Confirm::Reset,
            Pending::Resize(size) => Confirm::Resize(*size),
            Pending::Import(_) => Confirm::Import,
        })
    }

    fn apply_reset(&mut self) -> Vec<Action> {
        self.grid.clear();
        self.gesture = GestureState::Idle;
        self.long_press.cancel();
        self.stroke_dirty = false;
        self.clock.reset();
        self.progress.reset();
        persist::clear_session(self.store.as_mut(), &self.activity.id);
        info!("engine: {} reset", self.activity.id);
        vec![
            Action::RenderNeeded,
            Action::ProgressChanged(self.progress.state()),
            Action::ElapsedChanged(0),
            Action::success(MSG_RESET),
        ]
    }

    fn apply_resize(&mut self, size: GridSize) -> Vec<Action> {
        self.grid = Grid::new(size);
        self.gesture = GestureState::Idle;
        self.long_press.cancel();
        self.persist();
        debug!("engine: grid resized to {}x{}", size.width, size.height);
        let mut actions = vec![Action::RenderNeeded];
        actions.extend(self.recompute(false));
        actions
    }

    fn apply_import(&mut self, grid: Grid) -> Vec<Action> {
        self.grid = grid;
        self.gesture = GestureState::Idle;
        self.persist();
        info!("engine: imported image into {}", self.activity.id);
        let mut actions = vec![Action::RenderNeeded];
        actions.extend(self.recompute(false));
        actions.push(Action::success(MSG_IMPORTED));
        actions
    }

    // --- Session ---

    /// Explicit save: snapshot plus the legacy image/percent pair.
    ///
    /// The image is rasterized here; browser hosts that already hold the
    /// pixels use [`EngineCore::save_with_data_url`] instead.
    pub fn save(&mut self) -> Vec<Action> {
        match self.export_data_url() {
            Ok(url) => self.save_with_data_url(Some(&url)),
            Err(e) => {
                warn!("engine: export during save failed: {e}");
                self.save_with_data_url(None)
            }
        }
    }

    /// Save with an image the host produced. `None` means the host could not
    /// export one; the snapshot is still written.
    pub fn save_with_data_url(&mut self, url: Option<&str>) -> Vec<Action> {
        self.persist();
        let Some(url) = url else {
            return vec![Action::error(MSG_SAVE_FAILED)];
        };
        let pct = self.progress.state().adjusted_percent;
        persist::save_legacy(self.store.as_mut(), &self.activity.id, url, pct);
        vec![Action::success(MSG_SAVED)]
    }

    /// Pause or resume the elapsed-time clock.
    pub fn toggle_play(&mut self, now_ms: f64) -> Vec<Action> {
        if self.paused {
            self.paused = false;
            if !self.grid.is_blank() {
                self.clock.start(now_ms);
            }
        } else {
            self.paused = true;
            self.clock.pause(now_ms);
        }
        vec![Action::PlayStateChanged(!self.paused), Action::ElapsedChanged(self.clock.elapsed_secs())]
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        !self.paused
    }

    // --- Queries ---

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Give the store back, e.g. to flush it.
    #[must_use]
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    #[must_use]
    pub fn progress(&self) -> ProgressState {
        self.progress.state()
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }

    #[must_use]
    pub fn scene(&self) -> Scene {
        render::draw(&self.grid, self.theme, &self.layout)
    }

    #[must_use]
    pub fn render_raster(&self) -> RasterSurface {
        RasterSurface::from_scene(&self.scene())
    }

    /// # Errors
    ///
    /// Fails when PNG encoding fails.
    pub fn export_png(&self) -> Result<Vec<u8>> {
        export::encode_png(&self.render_raster())
    }

    /// # Errors
    ///
    /// See [`EngineCore::export_png`].
    pub fn export_data_url(&self) -> Result<String> {
        export::surface_data_url(&self.render_raster())
    }

    #[must_use]
    pub fn download_file_name(&self) -> String {
        export::download_file_name(&self.activity.id)
    }

    #[must_use]
    pub fn share_payload(&self, url: &str) -> SharePayload {
        SharePayload::new(&self.activity, url)
    }

    /// # Errors
    ///
    /// [`CanvasError::InvalidMood`] for ratings outside `1..=5`.
    pub fn completion_report(&self, mood_before: u8, mood_after: u8, notes: Option<String>) -> Result<CompletionReport> {
        CompletionReport::new(self.activity.id.clone(), mood_before, mood_after, self.clock.elapsed_secs(), notes)
    }
}

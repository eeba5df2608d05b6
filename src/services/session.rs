//! Headless sessions: the canvas engine driven from the command line.
//!
//! DESIGN
//! ======
//! Every command opens the file store, builds an `EngineCore` over it the same
//! way the browser does (same keys, same restore path), attaches it to a fixed
//! layout so progress is scored, performs one operation, then takes the store
//! back and flushes it. Nothing here duplicates engine rules; a painting saved
//! from the command line reopens identically in the browser.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;

use canvas::activity::Activity;
use canvas::engine::{Action, Confirm, EngineCore, SessionConfig};
use canvas::grid::GridSize;
use canvas::palette::PaletteCatalog;
use canvas::persist::KeyValueStore;
use canvas::progress::{self, Level, Scoring};
use canvas::theme::{StaticEnvironment, Theme};
use canvas::timer::format_elapsed;
use canvas::viewport::Layout;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::CliError;

/// How to build the engine for one command.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub level: Level,
    /// Catalog key (activity id or mood) overriding the activity's palette.
    pub palette: Option<String>,
    /// Size for a fresh grid; a stored snapshot keeps its own.
    pub grid_size: Option<GridSize>,
    pub theme: Option<Theme>,
    pub scoring: Scoring,
    pub env: StaticEnvironment,
    pub layout: Layout,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            level: Level::default(),
            palette: None,
            grid_size: None,
            theme: None,
            scoring: Scoring::default(),
            env: StaticEnvironment::default(),
            layout: Layout::default(),
        }
    }
}

/// Catalog activities keep their title and mood; anything else is a bare id.
pub fn resolve_activity(catalog: &PaletteCatalog, id: &str, level: Level) -> Activity {
    match catalog.entry(id) {
        Some(entry) if entry.key == id => Activity::from_entry(entry, level),
        _ => Activity::new(id, level),
    }
}

/// Build an attached engine over `store`.
pub fn open(store: Box<dyn KeyValueStore>, activity_id: &str, options: &SessionOptions) -> Result<EngineCore, CliError> {
    let catalog = PaletteCatalog::builtin();
    let activity = resolve_activity(&catalog, activity_id, options.level);
    let mut config = SessionConfig::new(activity, &catalog)?;
    if let Some(key) = &options.palette {
        config.palette = catalog.get(key).ok_or_else(|| CliError::UnknownActivity(key.clone()))?;
    }
    if let Some(size) = options.grid_size {
        config.grid_size = size;
    }
    config.theme = options.theme;
    config.scoring = options.scoring;

    let mut core = EngineCore::new(config, store, Box::new(options.env));
    let attached = core.attach_fixed(options.layout);
    debug!(activity = activity_id, actions = attached.len(), "session opened");
    Ok(core)
}

/// Hand the store back and make its writes durable.
pub fn close(core: EngineCore) -> Result<(), CliError> {
    let mut store = core.into_store();
    store.flush()?;
    Ok(())
}

/// Whether a snapshot exists for `activity_id`.
pub fn has_session(store: &dyn KeyValueStore, activity_id: &str) -> bool {
    store.get(&canvas::persist::session_key(activity_id)).is_some()
}

/// Status line data for one activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub activity_id: String,
    pub title: String,
    pub level: Level,
    pub width: usize,
    pub height: usize,
    pub painted: usize,
    pub total: usize,
    pub raw_fraction: f64,
    pub adjusted_percent: u8,
    pub complete: bool,
    pub elapsed_secs: u64,
    /// Painted fraction estimated from rendered pixels.
    pub sampled_fraction: f64,
}

impl Status {
    pub fn of(core: &EngineCore) -> Self {
        let state = core.progress();
        let size = core.grid.size();
        let raster = core.render_raster();
        Self {
            activity_id: core.activity.id.clone(),
            title: core.activity.display_title().to_owned(),
            level: core.progress.level(),
            width: size.width,
            height: size.height,
            painted: core.grid.painted_count(),
            total: core.grid.total(),
            raw_fraction: state.raw_fraction,
            adjusted_percent: state.adjusted_percent,
            complete: state.complete,
            elapsed_secs: core.elapsed_secs(),
            sampled_fraction: progress::sample_raster(&raster, core.theme.background(), size),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.title, self.activity_id)?;
        writeln!(f, "  grid:     {}x{} ({})", self.width, self.height, self.level.as_str())?;
        writeln!(f, "  painted:  {}/{} ({:.1}%)", self.painted, self.total, self.raw_fraction * 100.0)?;
        writeln!(f, "  sampled:  {:.1}%", self.sampled_fraction * 100.0)?;
        writeln!(f, "  progress: {}%{}", self.adjusted_percent, if self.complete { " (complete)" } else { "" })?;
        write!(f, "  elapsed:  {}", format_elapsed(self.elapsed_secs))
    }
}

/// Render the session to PNG bytes.
pub fn render_png(core: &EngineCore) -> Result<Vec<u8>, CliError> {
    Ok(core.export_png()?)
}

/// Change the grid size, discarding a painting only when `overwrite` is set.
pub fn resize(core: &mut EngineCore, size: GridSize, overwrite: bool) -> Result<(), CliError> {
    let actions = core.set_grid_size(size);
    confirm_or_refuse(core, &actions, Confirm::Resize(size), overwrite)
}

/// Clear the painting, clock, progress and stored keys.
pub fn reset(core: &mut EngineCore) {
    core.request_reset();
    let actions = core.confirm();
    info!(activity = %core.activity.id, actions = actions.len(), "session reset");
}

/// Answer a confirmation the engine asked for.
pub(crate) fn confirm_or_refuse(
    core: &mut EngineCore,
    actions: &[Action],
    expected: Confirm,
    overwrite: bool,
) -> Result<(), CliError> {
    if !actions.contains(&Action::ConfirmRequested(expected)) {
        return Ok(());
    }
    if overwrite {
        core.confirm();
        Ok(())
    } else {
        core.cancel();
        Err(CliError::WouldOverwrite(core.activity.id.clone()))
    }
}

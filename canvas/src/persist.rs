//! Session persistence over a string key-value store.
//!
//! Three keys per activity:
//!
//! | Key | Value |
//! |-----|-------|
//! | `diamond-art-<id>` | JSON [`PersistedSession`] |
//! | `canvas_<id>` | PNG data URL of the last explicit save |
//! | `progress_<id>` | Adjusted percent as a decimal integer |
//!
//! Writes are fire-and-forget. A missing or unreadable snapshot is the same as
//! no saved state.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::{Grid, GridSize, Rows};

/// Minimal string store (browser `localStorage`, a JSON file, a map).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);

    /// Make buffered writes durable. Write-through stores keep the default.
    ///
    /// # Errors
    ///
    /// Whatever the backing medium reports.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Saved state of one activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub grid: Rows,
    pub grid_size: GridSize,
    /// Whole seconds.
    pub elapsed_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default)]
    pub complete: bool,
}

impl PersistedSession {
    #[must_use]
    pub fn capture(grid: &Grid, elapsed_secs: u64, progress: u8, complete: bool) -> Self {
        Self {
            grid: grid.to_rows(),
            grid_size: grid.size(),
            elapsed_time: elapsed_secs,
            progress: Some(progress),
            complete,
        }
    }

    /// Rebuild the grid, checking the rows against the recorded size.
    ///
    /// # Errors
    ///
    /// [`crate::CanvasError::SnapshotShape`] when they disagree.
    pub fn to_grid(&self) -> Result<Grid> {
        Grid::from_rows(self.grid_size, &self.grid)
    }
}

/// A snapshot that decoded cleanly.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    pub grid: Grid,
    pub elapsed_secs: u64,
    pub progress: Option<u8>,
    pub complete: bool,
}

#[must_use]
pub fn session_key(activity_id: &str) -> String {
    format!("diamond-art-{activity_id}")
}

#[must_use]
pub fn canvas_key(activity_id: &str) -> String {
    format!("canvas_{activity_id}")
}

#[must_use]
pub fn progress_key(activity_id: &str) -> String {
    format!("progress_{activity_id}")
}

/// Read the snapshot for `activity_id`. Corrupt data is logged and treated as absent.
pub fn load_session(store: &dyn KeyValueStore, activity_id: &str) -> Option<Restored> {
    let raw = store.get(&session_key(activity_id))?;
    let session: PersistedSession = match serde_json::from_str(&raw) {
        Ok(session) => session,
        Err(e) => {
            warn!("persist: failed to load saved state for {activity_id}: {e}");
            return None;
        }
    };
    match session.to_grid() {
        Ok(grid) => Some(Restored {
            grid,
            elapsed_secs: session.elapsed_time,
            progress: session.progress,
            complete: session.complete,
        }),
        Err(e) => {
            warn!("persist: failed to load saved state for {activity_id}: {e}");
            None
        }
    }
}

/// Write the snapshot for `activity_id`.
///
/// # Errors
///
/// Only if serialization fails.
pub fn save_session(store: &mut dyn KeyValueStore, activity_id: &str, session: &PersistedSession) -> Result<()> {
    let json = serde_json::to_string(session)?;
    store.set(&session_key(activity_id), &json);
    Ok(())
}

/// Write the legacy image/percent pair.
pub fn save_legacy(store: &mut dyn KeyValueStore, activity_id: &str, data_url: &str, percent: u8) {
    store.set(&canvas_key(activity_id), data_url);
    store.set(&progress_key(activity_id), &percent.to_string());
}

#[must_use]
pub fn load_legacy_progress(store: &dyn KeyValueStore, activity_id: &str) -> Option<u8> {
    let raw = store.get(&progress_key(activity_id))?;
    match raw.trim().parse::<u8>() {
        Ok(pct) => Some(pct.min(100)),
        Err(e) => {
            warn!("persist: ignoring unreadable progress for {activity_id}: {e}");
            None
        }
    }
}

#[must_use]
pub fn load_legacy_canvas(store: &dyn KeyValueStore, activity_id: &str) -> Option<String> {
    store.get(&canvas_key(activity_id))
}

/// Remove every key belonging to `activity_id`.
pub fn clear_session(store: &mut dyn KeyValueStore, activity_id: &str) {
    store.remove(&session_key(activity_id));
    store.remove(&canvas_key(activity_id));
    store.remove(&progress_key(activity_id));
}

//! Activity descriptors (consumed) and completion reports (produced).

#[cfg(test)]
#[path = "activity_test.rs"]
mod activity_test;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{CanvasError, Result};
use crate::palette::{Palette, PaletteCatalog, PaletteEntry};
use crate::progress::Level;

/// An activity as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reference_image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<Rgb>>,
}

impl Activity {
    #[must_use]
    pub fn new(id: impl Into<String>, level: Level) -> Self {
        Self {
            id: id.into(),
            level,
            title: String::new(),
            description: String::new(),
            reference_image_url: String::new(),
            mood: None,
            colors: None,
        }
    }

    /// Descriptor for one of the stock catalog activities.
    #[must_use]
    pub fn from_entry(entry: &PaletteEntry, level: Level) -> Self {
        let mut activity = Self::new(entry.key, level);
        activity.title = entry.title.to_owned();
        activity.mood = entry.mood.map(str::to_owned);
        activity
    }

    /// Palette for this activity: its own colors, then the catalog entry for
    /// its id, then its mood, then the generic session palette.
    #[must_use]
    pub fn palette(&self, catalog: &PaletteCatalog) -> Option<Palette> {
        self.colors
            .as_ref()
            .and_then(|colors| Palette::from_colors(colors.iter().copied()))
            .or_else(|| catalog.get(&self.id))
            .or_else(|| self.mood.as_deref().and_then(|mood| catalog.get(mood)))
            .or_else(|| catalog.get("session"))
    }

    /// Title used in share text; falls back to the id.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { &self.id } else { &self.title }
    }
}

/// Mood ratings run from 1 (low) to 5 (high).
pub const MOOD_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Body of `POST /auth/activities/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub activity_id: String,
    pub mood_before: u8,
    pub mood_after: u8,
    /// Minutes, rounded up.
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CompletionReport {
    /// # Errors
    ///
    /// [`CanvasError::InvalidMood`] for a rating outside `1..=5`.
    pub fn new(
        activity_id: impl Into<String>,
        mood_before: u8,
        mood_after: u8,
        elapsed_secs: u64,
        notes: Option<String>,
    ) -> Result<Self> {
        for mood in [mood_before, mood_after] {
            if !MOOD_RANGE.contains(&mood) {
                return Err(CanvasError::InvalidMood(mood));
            }
        }
        Ok(Self {
            activity_id: activity_id.into(),
            mood_before,
            mood_after,
            duration: elapsed_secs.div_ceil(60),
            notes: notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

//! Palettes and the built-in palette catalog.
//!
//! A [`Palette`] is the small ordered set of colors a session paints with.
//! Order matters: the first entry is the default current color and wins ties
//! in nearest-color matching. The [`PaletteCatalog`] is constructed
//! explicitly by the host and holds the mood palettes of the stock activities
//! plus the generic session and designer palettes.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{CanvasError, Result};

/// Ordered, de-duplicated, non-empty set of colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette, dropping repeated colors while keeping first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::EmptyPalette`] when no colors remain.
    pub fn new(colors: impl IntoIterator<Item = Rgb>) -> Result<Self> {
        Self::from_colors(colors).ok_or(CanvasError::EmptyPalette)
    }

    /// Like [`Palette::new`] but yields `None` instead of an error.
    #[must_use]
    pub fn from_colors(colors: impl IntoIterator<Item = Rgb>) -> Option<Self> {
        let mut unique: Vec<Rgb> = Vec::new();
        for color in colors {
            if !unique.contains(&color) {
                unique.push(color);
            }
        }
        if unique.is_empty() { None } else { Some(Self { colors: unique }) }
    }

    /// Parse a list of `#rgb` / `#rrggbb` strings.
    ///
    /// # Errors
    ///
    /// Fails on the first unparseable entry, or when the list is empty.
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self> {
        let colors = hex.iter().map(|s| s.as_ref().parse::<Rgb>()).collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The default current color.
    #[must_use]
    pub fn first(&self) -> Rgb {
        self.colors.first().copied().unwrap_or(Rgb::BLACK)
    }

    #[must_use]
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Closest entry by Euclidean RGB distance. Ties go to the earlier entry.
    #[must_use]
    pub fn nearest(&self, color: Rgb) -> Rgb {
        let mut best = self.first();
        let mut best_dist = u32::MAX;
        for &candidate in &self.colors {
            let dist = candidate.distance_sq(color);
            if dist < best_dist {
                best = candidate;
                best_dist = dist;
            }
        }
        best
    }
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = CanvasError;

    fn try_from(value: Vec<Rgb>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(value: Palette) -> Self {
        value.colors
    }
}

// ── Catalog ─────────────────────────────────────────────────────

/// One named palette in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Activity id (`calm-1`) or a generic key (`session`, `designer`).
    pub key: &'static str,
    pub title: &'static str,
    pub mood: Option<&'static str>,
    pub colors: &'static [&'static str],
}

impl PaletteEntry {
    #[must_use]
    pub fn palette(&self) -> Option<Palette> {
        Palette::from_colors(self.colors.iter().filter_map(|hex| Rgb::parse_hex(hex)))
    }
}

const SESSION_COLORS: &[&str] =
    &["#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316"];

const DESIGNER_COLORS: &[&str] = &[
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD", "#D4A373", "#FEFAE0", "#E9EDC9", "#CCD5AE", "#FAEDCD",
];

const BUILTIN: &[PaletteEntry] = &[
    PaletteEntry {
        key: "calm-1",
        title: "Ocean Wave Diamond Art",
        mood: Some("calm"),
        colors: &["#06b6d4", "#0ea5e9", "#3b82f6", "#6366f1", "#8b5cf6"],
    },
    PaletteEntry {
        key: "calm-2",
        title: "Serene Landscape",
        mood: Some("calm"),
        colors: &["#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d"],
    },
    PaletteEntry {
        key: "energy-1",
        title: "Electric Dreams",
        mood: Some("energetic"),
        colors: &["#fde047", "#facc15", "#eab308", "#ca8a04", "#a16207"],
    },
    PaletteEntry {
        key: "energy-2",
        title: "Dance Party",
        mood: Some("energetic"),
        colors: &["#f87171", "#ef4444", "#dc2626", "#b91c1c", "#991b1b"],
    },
    PaletteEntry {
        key: "focused-1",
        title: "Geometric Patterns",
        mood: Some("focused"),
        colors: &["#7c3aed", "#6d28d9", "#5b21b6", "#4c1d95", "#3b0764"],
    },
    PaletteEntry {
        key: "focused-2",
        title: "Mandalas",
        mood: Some("focused"),
        colors: &["#8b5cf6", "#7c3aed", "#6d28d9", "#5b21b6", "#4c1d95"],
    },
    PaletteEntry {
        key: "creative-1",
        title: "Abstract Expression",
        mood: Some("creative"),
        colors: &["#ec4899", "#db2777", "#be185d", "#9d174d", "#831843"],
    },
    PaletteEntry {
        key: "creative-2",
        title: "Color Splash",
        mood: Some("creative"),
        colors: &["#f472b6", "#ec4899", "#db2777", "#be185d", "#9d174d"],
    },
    PaletteEntry {
        key: "stressed-1",
        title: "Tranquil Garden",
        mood: Some("stressed"),
        colors: &["#10b981", "#059669", "#047857", "#065f46", "#064e3b"],
    },
    PaletteEntry {
        key: "stressed-2",
        title: "Ocean Sunset",
        mood: Some("stressed"),
        colors: &["#0ea5e9", "#0284c7", "#0369a1", "#075985", "#0c4a6e"],
    },
    PaletteEntry {
        key: "happy-1",
        title: "Rainbow Unicorn",
        mood: Some("happy"),
        colors: &["#f472b6", "#f97316", "#eab308", "#84cc16", "#10b981", "#06b6d4", "#8b5cf6"],
    },
    PaletteEntry {
        key: "happy-2",
        title: "Tropical Paradise",
        mood: Some("happy"),
        colors: &["#f97316", "#f59e0b", "#84cc16", "#10b981", "#0ea5e9", "#8b5cf6", "#ec4899"],
    },
    PaletteEntry { key: "session", title: "Activity Session", mood: None, colors: SESSION_COLORS },
    PaletteEntry { key: "designer", title: "Design Creator", mood: None, colors: DESIGNER_COLORS },
];

/// Lookup table of named palettes.
#[derive(Debug, Clone, Default)]
pub struct PaletteCatalog {
    entries: Vec<PaletteEntry>,
}

impl PaletteCatalog {
    /// Catalog with the stock activity palettes, `session` and `designer`.
    #[must_use]
    pub fn builtin() -> Self {
        Self { entries: BUILTIN.to_vec() }
    }

    pub fn insert(&mut self, entry: PaletteEntry) {
        self.entries.retain(|e| e.key != entry.key);
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Look up by exact key first, then by mood (first entry with that mood).
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&PaletteEntry> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .or_else(|| self.entries.iter().find(|e| e.mood == Some(key)))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Palette> {
        self.entry(key).and_then(PaletteEntry::palette)
    }

    /// Palette for `key`, or the generic session palette when the key is unknown.
    #[must_use]
    pub fn get_or_session(&self, key: &str) -> Option<Palette> {
        self.get(key).or_else(|| self.get("session"))
    }
}

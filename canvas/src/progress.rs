//! Progress and completion evaluation.
//!
//! Progress is the painted fraction of the grid scaled by a level multiplier.
//! Completion latches: once `complete` is set only [`ProgressTracker::reset`]
//! clears it, so erasing after finishing never revokes the celebration.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::COMPLETE_PERCENT;
use crate::grid::{Grid, GridSize};
use crate::raster::RasterSurface;

/// Activity difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Level {
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Beginner => 0.5,
            Self::Intermediate => 0.65,
            Self::Advanced => 0.8,
            Self::Expert => 0.9,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            other => Err(format!("unknown level `{other}`")),
        }
    }
}

/// How the raw fraction becomes a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scoring {
    /// Scale by the activity level's multiplier.
    #[default]
    ByLevel,
    /// Report the painted fraction as-is.
    Unadjusted,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressState {
    /// Painted cells over total cells, in `[0, 1]`.
    pub raw_fraction: f64,
    /// Derived display percentage, in `[0, 100]`.
    pub adjusted_percent: u8,
    pub complete: bool,
}

/// Result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// The adjusted percentage differs from the previous evaluation.
    pub changed: bool,
    /// This evaluation is the one that crossed into completion.
    pub completed_now: bool,
}

/// `min(100, round(raw * multiplier * 100))`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn adjusted_percent(raw_fraction: f64, multiplier: f64) -> u8 {
    let pct = (raw_fraction.clamp(0.0, 1.0) * multiplier * 100.0).round();
    pct.clamp(0.0, f64::from(COMPLETE_PERCENT)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressTracker {
    level: Level,
    scoring: Scoring,
    state: ProgressState,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(level: Level, scoring: Scoring) -> Self {
        Self { level, scoring, state: ProgressState::default() }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn multiplier(&self) -> f64 {
        match self.scoring {
            Scoring::ByLevel => self.level.multiplier(),
            Scoring::Unadjusted => 1.0,
        }
    }

    #[must_use]
    pub fn state(&self) -> ProgressState {
        self.state
    }

    /// Recompute from the grid's painted count.
    #[allow(clippy::cast_precision_loss)]
    pub fn evaluate(&mut self, grid: &Grid) -> Evaluation {
        let total = grid.total();
        let raw = if total == 0 { 0.0 } else { grid.painted_count() as f64 / total as f64 };
        self.evaluate_fraction(raw)
    }

    pub fn evaluate_fraction(&mut self, raw_fraction: f64) -> Evaluation {
        let raw = raw_fraction.clamp(0.0, 1.0);
        let pct = adjusted_percent(raw, self.multiplier());
        let changed = pct != self.state.adjusted_percent;
        let completed_now = !self.state.complete && pct >= COMPLETE_PERCENT;
        self.state.raw_fraction = raw;
        self.state.adjusted_percent = pct;
        if completed_now {
            self.state.complete = true;
        }
        Evaluation { changed, completed_now }
    }

    /// Adopt previously persisted progress without emitting a completion.
    /// A stored 100 counts as complete.
    pub fn restore(&mut self, percent: u8, complete: bool) {
        self.state.adjusted_percent = percent.min(COMPLETE_PERCENT);
        self.state.complete = complete || percent >= COMPLETE_PERCENT;
    }

    /// Clear progress and the completion latch.
    pub fn reset(&mut self) {
        self.state = ProgressState::default();
    }
}

/// Estimate the painted fraction from pixels instead of the grid.
///
/// Takes one sample per cell, a quarter pitch in from its top-left corner so
/// neither the cell boundary line nor the half-cell guide is hit. A sample
/// counts as painted when it is opaque and its color differs from
/// `background`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sample_raster(surface: &RasterSurface, background: Rgb, size: GridSize) -> f64 {
    let total = size.total();
    if total == 0 || surface.width() == 0 {
        return 0.0;
    }
    let pitch = f64::from(surface.width()) / size.max_edge() as f64;
    let mut painted = 0usize;
    for row in 0..size.height {
        for col in 0..size.width {
            let x = ((col as f64 + 0.25) * pitch).floor() as u32;
            let y = ((row as f64 + 0.25) * pitch).floor() as u32;
            if let Some([r, g, b, a]) = surface.pixel(x, y) {
                if a == u8::MAX && Rgb::new(r, g, b) != background {
                    painted += 1;
                }
            }
        }
    }
    painted as f64 / total as f64
}

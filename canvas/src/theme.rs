//! Color theme and the host environment capability.
//!
//! The engine never reads browser globals directly. Everything it needs from
//! the host (color-scheme preference, viewport width, pixel ratio) comes
//! through an [`Environment`] handed to it at construction.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Theme matching the host's color-scheme preference.
    #[must_use]
    pub fn detect(env: &dyn Environment) -> Self {
        if env.prefers_dark() { Self::Dark } else { Self::Light }
    }

    /// Fill for the canvas and for empty cells.
    #[must_use]
    pub fn background(self) -> Rgb {
        match self {
            Self::Light => Rgb::new(0xff, 0xff, 0xff),
            Self::Dark => Rgb::new(0x1a, 0x1a, 0x1a),
        }
    }

    /// One-per-cell grid lines.
    #[must_use]
    pub fn grid_line(self) -> Rgba {
        match self {
            Self::Light => Rgba::new(0, 0, 0, 0.2),
            Self::Dark => Rgba::new(255, 255, 255, 0.3),
        }
    }

    /// Half-cell guide lines.
    #[must_use]
    pub fn sub_grid_line(self) -> Rgba {
        match self {
            Self::Light => Rgba::new(0, 0, 0, 0.1),
            Self::Dark => Rgba::new(255, 255, 255, 0.1),
        }
    }

    #[must_use]
    pub fn border(self) -> Rgba {
        match self {
            Self::Light => Rgba::new(0, 0, 0, 0.3),
            Self::Dark => Rgba::new(255, 255, 255, 0.3),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme `{other}`")),
        }
    }
}

/// Read-only view of the host the engine runs in.
pub trait Environment {
    /// Whether the host prefers a dark color scheme.
    fn prefers_dark(&self) -> bool;
    /// Window width in CSS pixels.
    fn viewport_width(&self) -> f64;
    /// Physical pixels per CSS pixel.
    fn device_pixel_ratio(&self) -> f64;
}

/// Fixed environment for tests and native hosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticEnvironment {
    pub dark: bool,
    pub viewport_width: f64,
    pub dpr: f64,
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self { dark: false, viewport_width: 1024.0, dpr: 1.0 }
    }
}

impl Environment for StaticEnvironment {
    fn prefers_dark(&self) -> bool {
        self.dark
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }
}

//! Shared numeric constants for the canvas crate.

// ── Timing ──────────────────────────────────────────────────────

/// Touch hold duration that erases the pressed cell, in milliseconds.
pub const LONG_PRESS_MS: f64 = 500.0;

/// Quiet period after the last resize event before re-layout, in milliseconds.
pub const RESIZE_DEBOUNCE_MS: f64 = 100.0;

/// Elapsed-time clock resolution, in milliseconds.
pub const CLOCK_TICK_MS: f64 = 1000.0;

// ── Layout ──────────────────────────────────────────────────────

/// Largest on-screen canvas edge in CSS pixels.
pub const MAX_DISPLAY_SIZE: f64 = 600.0;

/// Viewports narrower than this are treated as mobile.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

pub const MOBILE_PADDING: f64 = 20.0;
pub const DESKTOP_PADDING: f64 = 40.0;

/// Device pixel ratio caps for the backing buffer.
pub const MOBILE_MAX_DPR: f64 = 2.0;
pub const DESKTOP_MAX_DPR: f64 = 3.0;

// ── Overlay ─────────────────────────────────────────────────────

/// Sub-grid lines are drawn only above these cell pitches (CSS pixels).
pub const DESKTOP_SUBGRID_MIN_PITCH: f64 = 15.0;
pub const MOBILE_SUBGRID_MIN_PITCH: f64 = 25.0;

/// Overlay line width in CSS pixels.
pub const LINE_WIDTH: f64 = 1.0;

// ── Completion ──────────────────────────────────────────────────

pub const COMPLETE_PERCENT: u8 = 100;

//! Deadline-based timers driven by host time.
//!
//! Nothing here reads a clock. The host passes monotonic milliseconds
//! (`performance.now()` in the browser) into `schedule` and `poll`, so every
//! timer is deterministic under test and cancelling is just clearing a field.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use crate::consts::{CLOCK_TICK_MS, LONG_PRESS_MS, RESIZE_DEBOUNCE_MS};
use crate::grid::Cell;

/// A one-shot timer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    deadline: Option<f64>,
}

impl Timer {
    /// Arm (or re-arm) the timer to fire `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64) {
        self.deadline = Some(now_ms + delay_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Fire if the deadline has passed. A fired timer disarms itself.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Collapses a burst of triggers into one firing, `delay_ms` after the last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debounce {
    delay_ms: f64,
    timer: Timer,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

impl Debounce {
    #[must_use]
    pub fn new(delay_ms: f64) -> Self {
        Self { delay_ms, timer: Timer::default() }
    }

    /// Cancel any pending firing and reschedule from `now_ms`.
    pub fn trigger(&mut self, now_ms: f64) {
        self.timer.schedule(now_ms, self.delay_ms);
    }

    pub fn poll(&mut self, now_ms: f64) -> bool {
        self.timer.poll(now_ms)
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }
}

/// Touch hold detector for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LongPress {
    timer: Timer,
    cell: Option<Cell>,
}

impl LongPress {
    pub fn start(&mut self, now_ms: f64, cell: Cell) {
        self.timer.schedule(now_ms, LONG_PRESS_MS);
        self.cell = Some(cell);
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.cell = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// The held cell once the hold has lasted long enough.
    pub fn poll(&mut self, now_ms: f64) -> Option<Cell> {
        if self.timer.poll(now_ms) { self.cell.take() } else { None }
    }
}

/// Whole-second elapsed-time counter that only advances while running.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionClock {
    elapsed_secs: u64,
    carry_ms: f64,
    last_ms: Option<f64>,
}

impl SessionClock {
    /// A paused clock that already shows `elapsed_secs`.
    #[must_use]
    pub fn with_elapsed(elapsed_secs: u64) -> Self {
        Self { elapsed_secs, ..Self::default() }
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.last_ms.is_some()
    }

    pub fn start(&mut self, now_ms: f64) {
        if self.last_ms.is_none() {
            self.last_ms = Some(now_ms);
        }
    }

    pub fn pause(&mut self, now_ms: f64) {
        self.tick(now_ms);
        self.last_ms = None;
    }

    /// Stop without counting the time since the last tick.
    pub fn stop(&mut self) {
        self.last_ms = None;
    }

    /// Advance by the time since the previous tick. Returns whether the
    /// displayed second count changed.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(last) = self.last_ms else {
            return false;
        };
        self.last_ms = Some(now_ms);
        self.carry_ms += (now_ms - last).max(0.0);
        let whole = (self.carry_ms / CLOCK_TICK_MS).floor();
        if whole < 1.0 {
            return false;
        }
        self.carry_ms -= whole * CLOCK_TICK_MS;
        self.elapsed_secs += whole as u64;
        true
    }

    /// Zero the counter and stop.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Format seconds as `m:ss`.
#[must_use]
pub fn format_elapsed(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

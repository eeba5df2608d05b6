//! Input model: tools, pointer kinds, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `UiState` capture what a press will do. `GestureState` tracks a
//! single press from pointer-down to pointer-up: a press paints at once, a
//! drag paints every newly entered cell, and release ends the stroke.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::grid::Cell;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Place diamonds in the current color (default).
    #[default]
    Diamond,
    /// Clear cells.
    Eraser,
    /// Flood fill the connected region under the pointer.
    Fill,
    /// Adopt the pressed cell's color as the current color.
    #[serde(rename = "color-picker")]
    Picker,
}

impl Tool {
    /// Whether dragging with this tool keeps mutating cells.
    #[must_use]
    pub fn strokes(self) -> bool {
        matches!(self, Self::Diamond | Self::Eraser)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Diamond => "diamond",
            Self::Eraser => "eraser",
            Self::Fill => "fill",
            Self::Picker => "color-picker",
        }
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "diamond" => Ok(Self::Diamond),
            "eraser" => Ok(Self::Eraser),
            "fill" => Ok(Self::Fill),
            "color-picker" | "picker" => Ok(Self::Picker),
            other => Err(format!("unknown tool `{other}`")),
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button, pen contact or a finger.
    Primary,
    Middle,
    /// Right mouse button; always erases.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Source device of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Map a DOM `PointerEvent.pointerType` string.
    #[must_use]
    pub fn from_dom(kind: &str) -> Self {
        match kind {
            "touch" => Self::Touch,
            "pen" => Self::Pen,
            _ => Self::Mouse,
        }
    }
}

/// Persistent UI state visible to the renderer and the host toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub tool: Tool,
    /// Current paint color; always a member of the active palette.
    pub color: Rgb,
}

/// The active gesture between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No pointer is down.
    #[default]
    Idle,
    /// Pointer is down and has not left the pressed cell.
    Pressing {
        cell: Cell,
        pointer: PointerKind,
        /// What the stroke writes: a color, or `None` to erase.
        value: Option<Rgb>,
    },
    /// Pointer has moved to at least one other cell while held.
    Dragging { last: Cell, pointer: PointerKind, value: Option<Rgb> },
    /// Pointer is down but further movement is ignored (fill, picker, or a
    /// fired long-press).
    Inert { pointer: PointerKind },
}

impl GestureState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The cell the stroke last wrote, if it is still writing.
    #[must_use]
    pub fn stroke(&self) -> Option<(Cell, Option<Rgb>)> {
        match *self {
            Self::Pressing { cell, value, .. } => Some((cell, value)),
            Self::Dragging { last, value, .. } => Some((last, value)),
            Self::Idle | Self::Inert { .. } => None,
        }
    }

    /// Advance a writing stroke into `cell`. Returns the value to write when
    /// the cell differs from the last one written.
    #[allow(clippy::option_option)]
    pub fn enter(&mut self, cell: Cell) -> Option<Option<Rgb>> {
        let (last, pointer, value) = match *self {
            Self::Pressing { cell: pressed, pointer, value } => (pressed, pointer, value),
            Self::Dragging { last, pointer, value } => (last, pointer, value),
            Self::Idle | Self::Inert { .. } => return None,
        };
        if last == cell {
            return None;
        }
        *self = Self::Dragging { last: cell, pointer, value };
        Some(value)
    }
}

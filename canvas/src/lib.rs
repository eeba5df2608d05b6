//! Canvas engine for the Diamond Art grid painter.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and is also
//! linked natively by the `diamond-art` CLI. It owns the full lifecycle of one
//! activity canvas: translating raw pointer events into cell writes, scoring
//! progress, persisting the session, and producing a draw list that the host
//! replays onto a 2D context. The host JavaScript layer only wires DOM events
//! to the engine and acts on the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] session state machine |
//! | [`web`] | Browser bindings: canvas element, `localStorage`, media queries |
//! | [`grid`] | Cell grid, supported sizes, flood fill |
//! | [`color`] | Hex colors and CSS color strings |
//! | [`palette`] | Palettes and the built-in activity catalog |
//! | [`activity`] | Activity metadata and completion reports |
//! | [`input`] | Tools, pointer kinds and the stroke gesture state machine |
//! | [`viewport`] | Canvas sizing and pointer-to-cell mapping |
//! | [`theme`] | Light/dark colors and the environment probe trait |
//! | [`render`] | Grid to draw-list projection |
//! | [`raster`] | Software replay of a draw list into RGBA pixels |
//! | [`progress`] | Level multipliers and completion tracking |
//! | [`quantize`] | Image import onto a palette |
//! | [`persist`] | Session snapshots over a key-value store |
//! | [`export`] | PNG encoding, data URLs, share text |
//! | [`timer`] | Host-driven debounce, long press and session clock |
//! | [`consts`] | Shared numeric constants |
//! | [`error`] | Crate error type |

pub mod activity;
pub mod color;
pub mod consts;
pub mod engine;
pub mod error;
pub mod export;
pub mod grid;
pub mod input;
pub mod palette;
pub mod persist;
pub mod progress;
pub mod quantize;
pub mod raster;
pub mod render;
pub mod theme;
pub mod timer;
pub mod viewport;
pub mod web;

pub use error::{CanvasError, Result};

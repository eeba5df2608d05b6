//! Command implementations over the canvas engine.

pub mod import;
pub mod report;
pub mod session;

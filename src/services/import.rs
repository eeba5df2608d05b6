//! Image import: decode, downsample to the grid, snap onto the palette.

#[cfg(test)]
#[path = "import_test.rs"]
mod import_test;

use std::path::Path;

use canvas::engine::{Action, Confirm, EngineCore, ToastKind};
use canvas::grid::GridSize;
use image::imageops::FilterType;
use tracing::info;

use crate::error::CliError;
use crate::services::session;

/// MIME type for an image file, judged by extension.
pub fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Decode `bytes` and resample to one RGBA pixel per cell.
#[allow(clippy::cast_possible_truncation)]
pub fn downsample(bytes: &[u8], size: GridSize) -> Result<Vec<u8>, CliError> {
    let decoded = image::load_from_memory(bytes)?;
    let resized = decoded.resize_exact(size.width as u32, size.height as u32, FilterType::Triangle);
    Ok(resized.to_rgba8().into_raw())
}

/// Summary of a finished import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Imported {
    pub painted: usize,
    pub adjusted_percent: u8,
}

/// Import `bytes` into the session, replacing a painting only when `overwrite` is set.
pub fn import(core: &mut EngineCore, mime: &str, bytes: &[u8], overwrite: bool) -> Result<Imported, CliError> {
    if canvas::quantize::validate_mime(mime).is_err() {
        return Err(CliError::UnsupportedImage(mime.to_owned()));
    }
    let pixels = downsample(bytes, core.import_size())?;
    let actions = core.import_image(mime, &pixels);
    if let Some(message) = error_toast(&actions) {
        return Err(CliError::UnsupportedImage(format!("{mime}: {message}")));
    }
    session::confirm_or_refuse(core, &actions, Confirm::Import, overwrite)?;

    let imported = Imported { painted: core.grid.painted_count(), adjusted_percent: core.progress().adjusted_percent };
    info!(activity = %core.activity.id, painted = imported.painted, "image imported");
    Ok(imported)
}

fn error_toast(actions: &[Action]) -> Option<&str> {
    actions.iter().find_map(|action| match action {
        Action::Toast { kind: ToastKind::Error, message } => Some(message.as_str()),
        _ => None,
    })
}

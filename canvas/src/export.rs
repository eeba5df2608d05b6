//! Export: PNG encoding, data URLs, download names and share text.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::io::Cursor;

use base64::Engine;
use serde::Serialize;

use crate::activity::Activity;
use crate::error::Result;
use crate::raster::RasterSurface;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode the surface as an 8-bit RGBA PNG.
///
/// # Errors
///
/// Propagates encoder failures.
pub fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(Cursor::new(&mut png_data), surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&surface.pixels())?;
        writer.finish()?;
    }
    Ok(png_data)
}

/// `data:image/png;base64,...` for already-encoded PNG bytes.
#[must_use]
pub fn data_url(png_bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes);
    format!("{DATA_URL_PREFIX}{encoded}")
}

/// Decode a PNG data URL back to bytes. `None` for anything else.
#[must_use]
pub fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    let payload = url.strip_prefix(DATA_URL_PREFIX)?;
    match base64::engine::general_purpose::STANDARD.decode(payload) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("export: bad data url payload: {e}");
            None
        }
    }
}

/// Encode and wrap in one step.
///
/// # Errors
///
/// See [`encode_png`].
pub fn surface_data_url(surface: &RasterSurface) -> Result<String> {
    encode_png(surface).map(|bytes| data_url(&bytes))
}

#[must_use]
pub fn download_file_name(activity_id: &str) -> String {
    format!("diamond-art-{activity_id}.png")
}

/// Payload for `navigator.share`; hosts without it copy `url` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    #[must_use]
    pub fn new(activity: &Activity, url: impl Into<String>) -> Self {
        let title = activity.display_title();
        Self {
            title: format!("Check out my Diamond Art: {title}"),
            text: format!("I just completed the {title} activity on Diamond Art!"),
            url: url.into(),
        }
    }

    /// Text placed on the clipboard when native sharing is unavailable.
    #[must_use]
    pub fn clipboard_text(&self) -> &str {
        &self.url
    }
}

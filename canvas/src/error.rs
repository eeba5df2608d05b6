//! Error type shared by every fallible canvas operation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds { row: usize, col: usize, width: usize, height: usize },

    #[error("unsupported grid size {0}")]
    UnsupportedGridSize(usize),

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("`{0}` is not an image type")]
    InvalidImageType(String),

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferSize { expected: usize, actual: usize },

    #[error("snapshot rows do not match a {width}x{height} grid")]
    SnapshotShape { width: usize, height: usize },

    #[error("mood rating {0} is outside 1..=5")]
    InvalidMood(u8),

    #[error("store io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("png encode failed: {0}")]
    Png(#[from] png::EncodingError),
}

pub type Result<T> = std::result::Result<T, CanvasError>;

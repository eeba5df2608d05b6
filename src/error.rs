use canvas::CanvasError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing API token; pass --token or set DIAMOND_ART_TOKEN")]
    MissingToken,
    #[error("unknown activity or palette `{0}`")]
    UnknownActivity(String),
    #[error("no saved session for `{0}`")]
    NoSession(String),
    #[error("`{0}` already has a painting; pass --yes to replace it")]
    WouldOverwrite(String),
    #[error("refusing to reset `{0}` without --yes")]
    NotConfirmed(String),
    #[error("`{0}` is not complete yet ({1}%)")]
    NotComplete(String, u8),
    #[error("unsupported image type `{0}`")]
    UnsupportedImage(String),
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("io error on {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("canvas error: {0}")]
    Canvas(#[from] CanvasError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl CliError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), source }
    }
}

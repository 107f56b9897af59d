use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("failed to load palette from {path}: {reason}")]
    PaletteLoad { path: PathBuf, reason: String },

    #[error("invalid palette: {0}")]
    PaletteInvalid(String),

    #[error("failed to load layout from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    LayoutInvalid(String),

    #[error("invalid asset name '{0}': must be non-empty and contain no path separators")]
    InvalidAsset(String),

    #[error("unknown preset '{name}'. Available: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("output file {0} already exists (use --force to overwrite)")]
    OutputExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

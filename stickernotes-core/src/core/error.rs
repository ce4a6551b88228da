//! Error types for the Sticker Notes core library.

use thiserror::Error;

/// All errors that can occur within the Sticker Notes core library.
#[derive(Debug, Error)]
pub enum StickernotesError {
    /// An I/O operation on the save file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored note data could not be serialized or deserialized as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A color string was not a parseable `#rrggbb` value.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Convenience alias that pins the error type to [`StickernotesError`].
pub type Result<T> = std::result::Result<T, StickernotesError>;

impl StickernotesError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(_) => "The saved notes file could not be read. A new file will be created on the next save.".to_string(),
            Self::InvalidColor(value) => format!("Not a valid color: {value}"),
        }
    }
}

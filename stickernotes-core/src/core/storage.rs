//! The JSON save file backing a note store.

use crate::{NoteData, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Handle to the save file.
///
/// The file holds a single JSON array of note records, 2-space indented,
/// UTF-8 with non-ASCII characters emitted literally. Writes go to a
/// temporary file in the same directory which is then renamed over the
/// target, so a crash mid-write leaves the previous save intact.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the save file as raw JSON values, one per note record.
    ///
    /// Records are returned undecoded so the caller can restore each one
    /// independently and skip individually bad records instead of losing the
    /// whole file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StickernotesError::Io`] if the file cannot be read
    /// and [`crate::StickernotesError::Json`] if its contents are not a JSON
    /// array.
    pub fn read(&self) -> Result<Vec<serde_json::Value>> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Overwrites the save file with `records`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StickernotesError::Json`] if serialization fails and
    /// [`crate::StickernotesError::Io`] if the temporary file cannot be
    /// written or renamed into place.
    pub fn write(&self, records: &[NoteData]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

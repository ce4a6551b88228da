//! Application settings persistence for Sticker Notes.
//!
//! Stores user preferences (currently the save file location) in a JSON file
//! at an OS-appropriate location.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Persisted application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Path of the JSON file notes are saved to. Relative paths resolve
    /// against the working directory.
    pub data_file: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_file: "stickers_data.json".to_string(),
        }
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/stickernotes/settings.json`
/// - Windows: `%APPDATA%/Stickernotes/settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("Stickernotes").join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("stickernotes").join("settings.json")
    }
}

/// Loads settings from disk; returns defaults if the file is missing or
/// corrupt. On first run the defaults are written back so the file is
/// discoverable and editable.
pub fn load_settings() -> AppSettings {
    let path = settings_file_path();
    match fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => {
            let settings = AppSettings::default();
            if let Err(e) = save_settings(&settings) {
                log::warn!("could not write default settings: {e}");
            }
            settings
        }
    }
}

/// Saves settings to disk, creating parent directories as needed.
pub fn save_settings(settings: &AppSettings) -> Result<(), String> {
    let path = settings_file_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create settings directory: {e}"))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(&path, json).map_err(|e| format!("Failed to write settings: {e}"))?;
    Ok(())
}

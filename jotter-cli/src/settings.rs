//! Application settings persistence for Jotter.
//!
//! Stores user preferences (data directory, autosave timing) in a JSON file
//! at an OS-appropriate location.

use jotter_core::AutosaveConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the notes database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "jotter.db";

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Directory holding the notes database.
    pub data_directory: String,
    /// Quiet period before an edit is autosaved.
    pub autosave_delay_ms: u64,
    /// Extra wait before a committed autosave is written.
    pub save_latency_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        let autosave = AutosaveConfig::default();
        Self {
            data_directory: default_data_directory().to_string_lossy().to_string(),
            autosave_delay_ms: autosave.delay.as_millis() as u64,
            save_latency_ms: autosave.save_latency.as_millis() as u64,
        }
    }
}

impl AppSettings {
    pub fn autosave_config(&self) -> AutosaveConfig {
        AutosaveConfig {
            delay: Duration::from_millis(self.autosave_delay_ms),
            save_latency: Duration::from_millis(self.save_latency_ms),
        }
    }

    /// Full path of the notes database.
    pub fn database_path(&self) -> PathBuf {
        Path::new(&self.data_directory).join(DATABASE_FILE_NAME)
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/jotter/settings.json`
/// - Windows: `%APPDATA%/Jotter/settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("Jotter").join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("jotter").join("settings.json")
    }
}

/// Returns the default data directory, e.g. `~/.local/share/jotter`.
pub fn default_data_directory() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        })
        .join("jotter")
}

/// Loads settings from the default location.
pub fn load_settings() -> AppSettings {
    load_settings_from(&settings_file_path())
}

/// Loads settings from `path`; returns defaults if the file is missing or corrupt.
pub fn load_settings_from(path: &Path) -> AppSettings {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable settings file {}: {e}", path.display());
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Saves settings to `path`, creating parent directories as needed.
pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create settings directory: {e}"))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, json).map_err(|e| format!("Failed to write settings: {e}"))?;
    Ok(())
}

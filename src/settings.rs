//! Player preferences
//!
//! Persisted separately from the save file as JSON.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure reading or writing a JSON config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a JSON file, `Ok(None)` when it does not exist
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub music_enabled: bool,
    pub muted: bool,
    /// Player opt-out for the laser hazard
    pub lasers_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            music_enabled: true,
            muted: false,
            lasers_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match read_json(path)? {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}

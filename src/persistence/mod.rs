//! Save/load of banked progress
//!
//! The save file is a flat JSON record: `{ "points": n, "upgrades": { key: tier } }`.
//! Writes go to a temp file first and are renamed into place.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save file I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("save file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything that survives between sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default)]
    pub points: u64,
    /// Raw tiers; range checking happens when the upgrade manager reads them
    #[serde(default)]
    pub upgrades: BTreeMap<String, i64>,
}

impl SaveData {
    /// Read a save; a missing file is a first run
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No save at {}, starting fresh", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let data: SaveData =
            serde_json::from_str(&text).map_err(|source| PersistenceError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!(
            "Loaded save: {} points, {} upgrade entries",
            data.points,
            data.upgrades.len()
        );
        Ok(data)
    }

    /// Like `load`, but any failure is logged and treated as a first run
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("{}; starting fresh", err);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let io_err = |source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| PersistenceError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        log::debug!("Saved progress ({} points)", self.points);
        Ok(())
    }
}

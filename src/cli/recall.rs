//! Remembered call signs — the "last used" convenience of the UI layer.
//!
//! A small JSON file under the user config directory. Strictly a CLI
//! collaborator: the core takes call signs as plain strings and knows
//! nothing about persistence. Load and save failures are non-fatal; a
//! query never breaks because the state file is unreadable.

use std::fs;
use std::path::{Path, PathBuf};

use crate::manifest::CallSigns;

/// File-backed store for the last used call signs.
pub struct RecallStore {
    path: PathBuf,
}

impl RecallStore {
    /// Store under the platform config directory
    /// (`<config>/portside/recall.json`), or `None` when no config
    /// directory exists on this platform.
    pub fn default_store() -> Option<Self> {
        let dir = dirs::config_dir()?.join("portside");
        Some(Self {
            path: dir.join("recall.json"),
        })
    }

    /// Store at an explicit path.
    pub fn at_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Last saved call signs, or empty defaults when the file is
    /// missing or corrupt.
    pub fn load(&self) -> CallSigns {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return CallSigns::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::debug!("recall file unreadable, ignoring: {e}");
            CallSigns::default()
        })
    }

    /// Persist `signs`, best-effort.
    pub fn save(&self, signs: &CallSigns) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let body = serde_json::to_string_pretty(signs)?;
            fs::write(&self.path, body)
        };
        if let Err(e) = write() {
            tracing::debug!("could not save recall file: {e}");
        }
    }

    /// Delete the saved call signs, best-effort.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!("could not clear recall file: {e}");
            }
        }
    }
}

//! Note file and config locations.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use margin_modal::ModalConfig;
use tracing::{info, warn};

use crate::error::{AppError, Result};

/// `<data_dir>/margin`, home of the default note and the log file.
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("margin"))
        .ok_or(AppError::NoDataDir)
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("margin").join("config.toml"))
}

/// Load the user's config, falling back to defaults when it is missing or
/// invalid.
pub fn load_config() -> ModalConfig {
    let Some(path) = config_path() else {
        return ModalConfig::default();
    };
    match ModalConfig::load(&path) {
        Ok(config) => {
            info!(path = %path.display(), "loaded config");
            config
        }
        Err(margin_modal::ModalError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            ModalConfig::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring invalid config");
            ModalConfig::default()
        }
    }
}

/// The note being edited, backed by a plain-text file.
#[derive(Debug, Clone)]
pub struct NoteFile {
    path: PathBuf,
}

impl NoteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the note; a missing file is an empty note.
    pub fn read(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn write(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

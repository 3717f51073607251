//! Configuration for modal sessions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::key_handler::KeyEvent;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Maximum number of undo snapshots kept per session
    pub undo_limit: usize,
    /// Extra key that leaves insert and visual mode, besides Escape
    pub escape_chord: KeyEvent,
    /// Block cursor settings
    pub cursor: CursorConfig,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            undo_limit: 100,
            escape_chord: KeyEvent::ctrl('['),
            cursor: CursorConfig::default(),
        }
    }
}

/// Block cursor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Glyph width as a fraction of font size (fixed-width approximation)
    pub char_width_ratio: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.6,
        }
    }
}

impl ModalConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.undo_limit == 0 {
            return Err(ConfigError::OutOfRange(
                "undo_limit must be at least 1".to_string(),
            ));
        }

        let ratio = self.cursor.char_width_ratio;
        if !(ratio > 0.0 && ratio <= 4.0) {
            return Err(ConfigError::OutOfRange(
                "cursor.char_width_ratio must be in (0, 4]".to_string(),
            ));
        }

        // A plain printable chord would make that letter impossible to type.
        let chord = self.escape_chord;
        if !chord.ctrl && !chord.alt && !chord.key.is_control() {
            return Err(ConfigError::InvalidEscapeChord(chord.display()));
        }

        Ok(())
    }
}

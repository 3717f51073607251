//! Error types for margin-modal
//!
//! Editing itself never fails: out-of-range requests clamp and impossible
//! ones are no-ops. Errors only come from loading configuration.

use thiserror::Error;

/// Result type alias for margin-modal operations
pub type Result<T> = std::result::Result<T, ModalError>;

/// Main error type
#[derive(Error, Debug)]
pub enum ModalError {
    /// Configuration failed validation
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML configuration could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON configuration could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Escape chord would shadow a command key
    #[error("Invalid escape chord: {0}")]
    InvalidEscapeChord(String),
}

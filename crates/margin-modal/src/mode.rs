//! Editing modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The editing mode of a modal session.
///
/// Exactly one mode is active at a time. A fresh session always starts in
/// [`EditorMode::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditorMode {
    /// Command mode: the surface is read-only and keys are commands.
    #[default]
    Normal,
    /// Text entry: the surface is editable and keys pass through.
    Insert,
    /// Selection mode, character-wise or line-wise.
    Visual {
        /// Whether the selection snaps to whole lines.
        linewise: bool,
    },
}

impl EditorMode {
    /// Returns the display name shown by mode indicators.
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorMode::Normal => "NORMAL",
            EditorMode::Insert => "INSERT",
            EditorMode::Visual { linewise: false } => "VISUAL",
            EditorMode::Visual { linewise: true } => "VISUAL LINE",
        }
    }

    /// Whether the surface accepts native typing in this mode.
    pub fn is_editable(&self) -> bool {
        matches!(self, EditorMode::Insert)
    }

    /// Whether this is either flavour of visual mode.
    pub fn is_visual(&self) -> bool {
        matches!(self, EditorMode::Visual { .. })
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode() {
        assert_eq!(EditorMode::default(), EditorMode::Normal);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(EditorMode::Normal.display_name(), "NORMAL");
        assert_eq!(EditorMode::Insert.display_name(), "INSERT");
        assert_eq!(EditorMode::Visual { linewise: false }.display_name(), "VISUAL");
        assert_eq!(
            EditorMode::Visual { linewise: true }.to_string(),
            "VISUAL LINE"
        );
    }

    #[test]
    fn test_only_insert_is_editable() {
        assert!(EditorMode::Insert.is_editable());
        assert!(!EditorMode::Normal.is_editable());
        assert!(!EditorMode::Visual { linewise: true }.is_editable());
    }
}

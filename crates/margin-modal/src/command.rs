//! Modal editing commands.

use crate::motion::Motion;

/// Which side of the caret (or current line) an insertion goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// After the caret / below the line.
    After,
    /// Before the caret / above the line.
    Before,
}

/// A fully resolved command, produced by the key handler and executed by the
/// controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalCommand {
    // Mode changes
    /// Leave insert or visual mode.
    EnterNormalMode,
    /// Enter insert mode at the caret.
    InsertAtCursor,
    /// Advance the caret one position, then enter insert mode.
    AppendAfterCursor,
    /// Open an empty line below and enter insert mode.
    OpenLineBelow,
    /// Open an empty line above and enter insert mode.
    OpenLineAbove,
    /// Enter visual mode, character-wise or line-wise.
    EnterVisualMode { linewise: bool },

    // Movement
    /// Move the caret (or the visual head).
    Move(Motion),

    // Editing
    /// Delete the character under the caret.
    DeleteChar,
    /// Delete the current line into the register.
    DeleteLine,
    /// Copy the current line into the register.
    YankLine,
    /// Paste the register next to the caret.
    Paste(Placement),
    /// Copy the visual selection and return to normal mode.
    YankSelection,
    /// Delete the visual selection and return to normal mode.
    DeleteSelection,

    // History
    /// Undo the last change.
    Undo,
    /// Redo the last undone change.
    Redo,
}

impl ModalCommand {
    /// Whether the command changes content and therefore snapshots history.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            ModalCommand::OpenLineBelow
                | ModalCommand::OpenLineAbove
                | ModalCommand::DeleteChar
                | ModalCommand::DeleteLine
                | ModalCommand::Paste(_)
                | ModalCommand::DeleteSelection
        )
    }

    /// Short human-readable description, for logs and help overlays.
    pub fn description(&self) -> &'static str {
        match self {
            ModalCommand::EnterNormalMode => "normal mode",
            ModalCommand::InsertAtCursor => "insert",
            ModalCommand::AppendAfterCursor => "append",
            ModalCommand::OpenLineBelow => "open line below",
            ModalCommand::OpenLineAbove => "open line above",
            ModalCommand::EnterVisualMode { linewise: false } => "visual",
            ModalCommand::EnterVisualMode { linewise: true } => "visual line",
            ModalCommand::Move(_) => "move",
            ModalCommand::DeleteChar => "delete character",
            ModalCommand::DeleteLine => "delete line",
            ModalCommand::YankLine => "yank line",
            ModalCommand::Paste(Placement::After) => "paste after",
            ModalCommand::Paste(Placement::Before) => "paste before",
            ModalCommand::YankSelection => "yank selection",
            ModalCommand::DeleteSelection => "delete selection",
            ModalCommand::Undo => "undo",
            ModalCommand::Redo => "redo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_mutating() {
        assert!(ModalCommand::DeleteLine.is_mutating());
        assert!(ModalCommand::Paste(Placement::Before).is_mutating());
        assert!(ModalCommand::OpenLineAbove.is_mutating());

        assert!(!ModalCommand::YankLine.is_mutating());
        assert!(!ModalCommand::Move(Motion::WordForward).is_mutating());
        assert!(!ModalCommand::Undo.is_mutating());
    }

    #[test]
    fn test_description() {
        assert_eq!(ModalCommand::DeleteLine.description(), "delete line");
        assert_eq!(
            ModalCommand::EnterVisualMode { linewise: true }.description(),
            "visual line"
        );
    }
}

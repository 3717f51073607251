//! Key-to-command translation.
//!
//! Keys arrive one at a time. Most resolve to a command immediately; `d`,
//! `y` and `g` in normal mode wait for a second key (`dd`, `yy`, `gg`).

use serde::{Deserialize, Serialize};

use crate::command::{ModalCommand, Placement};
use crate::motion::Motion;
use crate::EditorMode;

/// The escape character.
pub const ESCAPE: char = '\x1b';

/// A key press as delivered by the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The key character (or control character such as [`ESCAPE`]).
    pub key: char,
    /// Whether control is held.
    #[serde(default)]
    pub ctrl: bool,
    /// Whether alt/option is held.
    #[serde(default)]
    pub alt: bool,
}

impl KeyEvent {
    /// A key with no modifiers.
    pub fn new(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
        }
    }

    /// A key with control held.
    pub fn ctrl(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            alt: false,
        }
    }

    /// The escape key.
    pub fn escape() -> Self {
        Self::new(ESCAPE)
    }

    fn is_plain(&self) -> bool {
        !self.ctrl && !self.alt
    }

    /// Returns a display string for this key (e.g., "C-r", "Esc").
    pub fn display(&self) -> String {
        let mut result = String::new();
        if self.ctrl {
            result.push_str("C-");
        }
        if self.alt {
            result.push_str("A-");
        }
        match self.key {
            ESCAPE => result.push_str("Esc"),
            ' ' => result.push_str("Space"),
            '\n' | '\r' => result.push_str("Enter"),
            c => result.push(c),
        }
        result
    }
}

impl From<char> for KeyEvent {
    fn from(key: char) -> Self {
        KeyEvent::new(key)
    }
}

/// First key of a two-key command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixKey {
    /// `d`
    Delete,
    /// `y`
    Yank,
    /// `g`
    Goto,
}

impl PrefixKey {
    pub fn from_char(key: char) -> Option<Self> {
        match key {
            'd' => Some(PrefixKey::Delete),
            'y' => Some(PrefixKey::Yank),
            'g' => Some(PrefixKey::Goto),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            PrefixKey::Delete => 'd',
            PrefixKey::Yank => 'y',
            PrefixKey::Goto => 'g',
        }
    }

    /// The command produced when `key` completes this prefix.
    pub fn complete(&self, key: char) -> Option<ModalCommand> {
        match (self, key) {
            (PrefixKey::Delete, 'd') => Some(ModalCommand::DeleteLine),
            (PrefixKey::Yank, 'y') => Some(ModalCommand::YankLine),
            (PrefixKey::Goto, 'g') => Some(ModalCommand::Move(Motion::DocumentStart)),
            _ => None,
        }
    }
}

/// Multi-key command state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingPrefix {
    #[default]
    None,
    WaitingForSecondKey(PrefixKey),
}

/// Result of handling a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// A command was produced.
    Command(ModalCommand),
    /// The key started a two-key command.
    Pending,
    /// The key was swallowed without effect.
    Consumed,
    /// The key belongs to the surface's native input handling.
    PassThrough,
}

/// Translates keys into commands for the current mode.
#[derive(Debug, Clone)]
pub struct ModalKeyHandler {
    pending: PendingPrefix,
    escape_chord: KeyEvent,
}

impl ModalKeyHandler {
    /// Create a handler that also treats `escape_chord` as Escape.
    pub fn new(escape_chord: KeyEvent) -> Self {
        Self {
            pending: PendingPrefix::None,
            escape_chord,
        }
    }

    /// Drop any pending prefix.
    pub fn reset(&mut self) {
        self.pending = PendingPrefix::None;
    }

    /// The pending prefix, for status display.
    pub fn pending(&self) -> PendingPrefix {
        self.pending
    }

    /// The pending prefix key, if any.
    pub fn pending_key(&self) -> Option<char> {
        match self.pending {
            PendingPrefix::None => None,
            PendingPrefix::WaitingForSecondKey(prefix) => Some(prefix.as_char()),
        }
    }

    fn is_escape(&self, key: &KeyEvent) -> bool {
        (key.key == ESCAPE && key.is_plain()) || *key == self.escape_chord
    }

    /// Handle a key press in the given mode.
    pub fn handle_key(&mut self, key: &KeyEvent, mode: EditorMode) -> KeyResult {
        if mode == EditorMode::Insert {
            if self.is_escape(key) {
                return KeyResult::Command(ModalCommand::EnterNormalMode);
            }
            return KeyResult::PassThrough;
        }

        if self.is_escape(key) {
            self.reset();
            return match mode {
                EditorMode::Visual { .. } => KeyResult::Command(ModalCommand::EnterNormalMode),
                _ => KeyResult::Consumed,
            };
        }

        if let PendingPrefix::WaitingForSecondKey(prefix) = std::mem::take(&mut self.pending) {
            if key.is_plain() {
                if let Some(command) = prefix.complete(key.key) {
                    return KeyResult::Command(command);
                }
            }
            // Not a known pair: dispatch the key on its own.
        }

        if key.is_plain() {
            if let Some(prefix) = PrefixKey::from_char(key.key) {
                if Self::is_prefix_in(prefix, mode) {
                    self.pending = PendingPrefix::WaitingForSecondKey(prefix);
                    return KeyResult::Pending;
                }
            }
        }

        let command = match mode {
            EditorMode::Visual { linewise } => Self::visual_command(key, linewise),
            _ => Self::normal_command(key),
        };
        command.map_or(KeyResult::Consumed, KeyResult::Command)
    }

    fn is_prefix_in(prefix: PrefixKey, mode: EditorMode) -> bool {
        match mode {
            EditorMode::Normal => true,
            // d and y act on the selection immediately.
            EditorMode::Visual { .. } => prefix == PrefixKey::Goto,
            EditorMode::Insert => false,
        }
    }

    fn motion_for(key: char) -> Option<Motion> {
        match key {
            'h' => Some(Motion::Left),
            'l' => Some(Motion::Right),
            'k' => Some(Motion::Up),
            'j' => Some(Motion::Down),
            'w' => Some(Motion::WordForward),
            'b' => Some(Motion::WordBackward),
            '0' => Some(Motion::LineStart),
            '$' => Some(Motion::LineEnd),
            'G' => Some(Motion::DocumentEnd),
            _ => None,
        }
    }

    fn normal_command(key: &KeyEvent) -> Option<ModalCommand> {
        if key.ctrl && !key.alt && key.key == 'r' {
            return Some(ModalCommand::Redo);
        }
        if !key.is_plain() {
            return None;
        }
        if let Some(motion) = Self::motion_for(key.key) {
            return Some(ModalCommand::Move(motion));
        }
        match key.key {
            'i' => Some(ModalCommand::InsertAtCursor),
            'a' => Some(ModalCommand::AppendAfterCursor),
            'o' => Some(ModalCommand::OpenLineBelow),
            'O' => Some(ModalCommand::OpenLineAbove),
            'v' => Some(ModalCommand::EnterVisualMode { linewise: false }),
            'V' => Some(ModalCommand::EnterVisualMode { linewise: true }),
            'x' => Some(ModalCommand::DeleteChar),
            'p' => Some(ModalCommand::Paste(Placement::After)),
            'P' => Some(ModalCommand::Paste(Placement::Before)),
            'u' => Some(ModalCommand::Undo),
            _ => None,
        }
    }

    fn visual_command(key: &KeyEvent, linewise: bool) -> Option<ModalCommand> {
        if !key.is_plain() {
            return None;
        }
        if let Some(motion) = Self::motion_for(key.key) {
            return Some(ModalCommand::Move(motion));
        }
        match key.key {
            'y' => Some(ModalCommand::YankSelection),
            'd' | 'x' => Some(ModalCommand::DeleteSelection),
            'v' if !linewise => Some(ModalCommand::EnterNormalMode),
            'V' if linewise => Some(ModalCommand::EnterNormalMode),
            'v' => Some(ModalCommand::EnterVisualMode { linewise: false }),
            'V' => Some(ModalCommand::EnterVisualMode { linewise: true }),
            _ => None,
        }
    }
}

impl Default for ModalKeyHandler {
    fn default() -> Self {
        Self::new(KeyEvent::ctrl('['))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMAL: EditorMode = EditorMode::Normal;
    const VISUAL: EditorMode = EditorMode::Visual { linewise: false };

    fn press(handler: &mut ModalKeyHandler, keys: &str, mode: EditorMode) -> Vec<KeyResult> {
        keys.chars()
            .map(|c| handler.handle_key(&KeyEvent::new(c), mode))
            .collect()
    }

    #[test]
    fn test_single_key_commands() {
        let mut handler = ModalKeyHandler::default();
        assert_eq!(
            handler.handle_key(&'w'.into(), NORMAL),
            KeyResult::Command(ModalCommand::Move(Motion::WordForward))
        );
        assert_eq!(
            handler.handle_key(&'P'.into(), NORMAL),
            KeyResult::Command(ModalCommand::Paste(Placement::Before))
        );
        assert_eq!(
            handler.handle_key(&KeyEvent::ctrl('r'), NORMAL),
            KeyResult::Command(ModalCommand::Redo)
        );
    }

    #[test]
    fn test_two_key_commands() {
        let mut handler = ModalKeyHandler::default();
        assert_eq!(
            press(&mut handler, "dd", NORMAL),
            vec![KeyResult::Pending, KeyResult::Command(ModalCommand::DeleteLine)]
        );
        assert_eq!(
            press(&mut handler, "yy", NORMAL)[1],
            KeyResult::Command(ModalCommand::YankLine)
        );
        assert_eq!(
            press(&mut handler, "gg", NORMAL)[1],
            KeyResult::Command(ModalCommand::Move(Motion::DocumentStart))
        );
        assert_eq!(handler.pending(), PendingPrefix::None);
    }

    #[test]
    fn test_non_completing_key_runs_on_its_own() {
        let mut handler = ModalKeyHandler::default();
        handler.handle_key(&'d'.into(), NORMAL);
        assert_eq!(handler.pending_key(), Some('d'));

        assert_eq!(
            handler.handle_key(&'j'.into(), NORMAL),
            KeyResult::Command(ModalCommand::Move(Motion::Down))
        );
        assert_eq!(handler.pending(), PendingPrefix::None);
    }

    #[test]
    fn test_other_prefix_replaces_pending_one() {
        let mut handler = ModalKeyHandler::default();
        assert_eq!(
            press(&mut handler, "dy", NORMAL),
            vec![KeyResult::Pending, KeyResult::Pending]
        );
        assert_eq!(handler.pending_key(), Some('y'));
    }

    #[test]
    fn test_unknown_keys_are_consumed() {
        let mut handler = ModalKeyHandler::default();
        assert_eq!(handler.handle_key(&'z'.into(), NORMAL), KeyResult::Consumed);
        handler.handle_key(&'g'.into(), NORMAL);
        assert_eq!(handler.handle_key(&'z'.into(), NORMAL), KeyResult::Consumed);
        assert_eq!(handler.pending(), PendingPrefix::None);
    }

    #[test]
    fn test_escape_clears_prefix() {
        let mut handler = ModalKeyHandler::default();
        handler.handle_key(&'d'.into(), NORMAL);
        assert_eq!(
            handler.handle_key(&KeyEvent::escape(), NORMAL),
            KeyResult::Consumed
        );
        assert_eq!(handler.pending(), PendingPrefix::None);
    }

    #[test]
    fn test_insert_mode_passes_through() {
        let mut handler = ModalKeyHandler::default();
        assert_eq!(
            handler.handle_key(&'d'.into(), EditorMode::Insert),
            KeyResult::PassThrough
        );
        assert_eq!(
            handler.handle_key(&KeyEvent::escape(), EditorMode::Insert),
            KeyResult::Command(ModalCommand::EnterNormalMode)
        );
        assert_eq!(
            handler.handle_key(&KeyEvent::ctrl('['), EditorMode::Insert),
            KeyResult::Command(ModalCommand::EnterNormalMode)
        );
    }

    #[test]
    fn test_custom_escape_chord() {
        let mut handler = ModalKeyHandler::new(KeyEvent::ctrl('c'));
        assert_eq!(
            handler.handle_key(&KeyEvent::ctrl('c'), EditorMode::Insert),
            KeyResult::Command(ModalCommand::EnterNormalMode)
        );
        assert_eq!(
            handler.handle_key(&KeyEvent::ctrl('['), EditorMode::Insert),
            KeyResult::PassThrough
        );
    }

    #[test]
    fn test_visual_mode_keys() {
        let mut handler = ModalKeyHandler::default();
        assert_eq!(
            handler.handle_key(&'d'.into(), VISUAL),
            KeyResult::Command(ModalCommand::DeleteSelection)
        );
        assert_eq!(
            handler.handle_key(&'y'.into(), VISUAL),
            KeyResult::Command(ModalCommand::YankSelection)
        );
        assert_eq!(
            press(&mut handler, "gg", VISUAL)[1],
            KeyResult::Command(ModalCommand::Move(Motion::DocumentStart))
        );
        assert_eq!(
            handler.handle_key(&'v'.into(), VISUAL),
            KeyResult::Command(ModalCommand::EnterNormalMode)
        );
        assert_eq!(
            handler.handle_key(&'V'.into(), VISUAL),
            KeyResult::Command(ModalCommand::EnterVisualMode { linewise: true })
        );
        assert_eq!(
            handler.handle_key(&KeyEvent::escape(), VISUAL),
            KeyResult::Command(ModalCommand::EnterNormalMode)
        );
    }

    #[test]
    fn test_key_display() {
        assert_eq!(KeyEvent::ctrl('r').display(), "C-r");
        assert_eq!(KeyEvent::escape().display(), "Esc");
    }
}

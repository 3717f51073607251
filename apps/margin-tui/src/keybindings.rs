//! Keybinding definitions

use crossterm::event::{KeyCode, KeyModifiers};
use margin_modal::{EditorMode, KeyEvent, Motion};

/// Application-level action, handled before the modal engine sees a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Enable or disable modal editing
    ToggleModal,
}

/// Native editing applied directly to the note pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEdit {
    Insert(char),
    Backspace,
    Delete,
    Move(Motion),
}

/// Get the application action for a key, in any mode
pub fn global_action(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if !modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('e') => Some(Action::ToggleModal),
        _ => None,
    }
}

/// Translate a terminal key for the modal engine.
///
/// Arrow keys become `h`/`j`/`k`/`l` outside insert mode; in insert mode
/// they stay native.
pub fn modal_key(code: KeyCode, modifiers: KeyModifiers, mode: EditorMode) -> Option<KeyEvent> {
    let key = match code {
        KeyCode::Esc => return Some(KeyEvent::escape()),
        KeyCode::Char(c) => c,
        KeyCode::Left if mode != EditorMode::Insert => 'h',
        KeyCode::Down if mode != EditorMode::Insert => 'j',
        KeyCode::Up if mode != EditorMode::Insert => 'k',
        KeyCode::Right if mode != EditorMode::Insert => 'l',
        _ => return None,
    };
    Some(KeyEvent {
        key,
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
    })
}

/// Get the native edit for a key typed into an editable pad
pub fn native_edit(code: KeyCode, modifiers: KeyModifiers) -> Option<NativeEdit> {
    if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match code {
        KeyCode::Char(c) => Some(NativeEdit::Insert(c)),
        KeyCode::Enter => Some(NativeEdit::Insert('\n')),
        KeyCode::Tab => Some(NativeEdit::Insert('\t')),
        KeyCode::Backspace => Some(NativeEdit::Backspace),
        KeyCode::Delete => Some(NativeEdit::Delete),
        KeyCode::Left => Some(NativeEdit::Move(Motion::Left)),
        KeyCode::Right => Some(NativeEdit::Move(Motion::Right)),
        KeyCode::Up => Some(NativeEdit::Move(Motion::Up)),
        KeyCode::Down => Some(NativeEdit::Move(Motion::Down)),
        KeyCode::Home => Some(NativeEdit::Move(Motion::LineStart)),
        KeyCode::End => Some(NativeEdit::Move(Motion::LineEnd)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_actions_need_ctrl() {
        assert_eq!(
            global_action(KeyCode::Char('q'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
        assert_eq!(
            global_action(KeyCode::Char('e'), KeyModifiers::CONTROL),
            Some(Action::ToggleModal)
        );
        assert_eq!(global_action(KeyCode::Char('q'), KeyModifiers::NONE), None);
    }

    #[test]
    fn test_arrows_map_to_motions_outside_insert() {
        let key = modal_key(KeyCode::Down, KeyModifiers::NONE, EditorMode::Normal);
        assert_eq!(key, Some(KeyEvent::new('j')));

        let visual = EditorMode::Visual { linewise: true };
        assert_eq!(
            modal_key(KeyCode::Left, KeyModifiers::NONE, visual),
            Some(KeyEvent::new('h'))
        );

        assert_eq!(
            modal_key(KeyCode::Down, KeyModifiers::NONE, EditorMode::Insert),
            None
        );
    }

    #[test]
    fn test_modifiers_carried() {
        let key = modal_key(KeyCode::Char('r'), KeyModifiers::CONTROL, EditorMode::Normal);
        assert_eq!(key, Some(KeyEvent::ctrl('r')));
        assert_eq!(
            modal_key(KeyCode::Esc, KeyModifiers::NONE, EditorMode::Insert),
            Some(KeyEvent::escape())
        );
    }

    #[test]
    fn test_native_edits() {
        assert_eq!(
            native_edit(KeyCode::Enter, KeyModifiers::NONE),
            Some(NativeEdit::Insert('\n'))
        );
        assert_eq!(
            native_edit(KeyCode::Char('A'), KeyModifiers::SHIFT),
            Some(NativeEdit::Insert('A'))
        );
        assert_eq!(native_edit(KeyCode::Char('s'), KeyModifiers::CONTROL), None);
    }
}

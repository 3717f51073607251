//! End-to-end key sequences against an in-memory surface.

use margin_modal::{
    EditorEvent, EditorMode, KeyEvent, MemorySurface, ModalConfig, ModeController, TextSurface,
};
use rstest::rstest;

fn session(text: &str, caret: usize) -> ModeController<MemorySurface> {
    ModeController::enable(
        MemorySurface::new(text).with_caret(caret),
        &ModalConfig::default(),
    )
}

fn press(controller: &mut ModeController<MemorySurface>, keys: &str) {
    for c in keys.chars() {
        controller.handle_key(KeyEvent::new(c));
    }
}

// === Line operations ===

#[test]
fn test_dd_deletes_first_line() {
    let mut controller = session("line1\nline2\nline3", 0);
    press(&mut controller, "dd");

    assert_eq!(controller.content(), "line2\nline3");
    assert_eq!(controller.caret(), 0);
    assert_eq!(controller.surface().content(), "line2\nline3");
}

#[test]
fn test_yy_copies_line_without_change() {
    let mut controller = session("line1\nline2\nline3", 6);
    press(&mut controller, "yy");

    assert_eq!(controller.content(), "line1\nline2\nline3");
    assert_eq!(controller.register(), "line2\n");
    assert_eq!(controller.surface().change_count(), 0);
}

#[test]
fn test_dd_on_only_line_leaves_empty_buffer() {
    let mut controller = session("only line", 5);
    press(&mut controller, "dd");

    assert_eq!(controller.content(), "");
    assert_eq!(controller.caret(), 0);

    // A second delete on the empty buffer changes nothing.
    press(&mut controller, "dd");
    assert_eq!(controller.content(), "");
    assert_eq!(controller.caret(), 0);
    assert_eq!(controller.register(), "only line");
    assert_eq!(controller.history().undo_len(), 1);
}

#[test]
fn test_dd_on_empty_trailing_line_keeps_state() {
    let mut controller = session("a\nb\n", 0);
    let rx = controller.subscribe();
    press(&mut controller, "yyxuG");
    assert_eq!(controller.caret(), 4);
    assert!(controller.history().can_redo());

    press(&mut controller, "dd");
    press(&mut controller, "yy");

    assert_eq!(controller.content(), "a\nb\n");
    assert_eq!(controller.register(), "a\n");
    assert_eq!(controller.history().undo_len(), 0);
    assert!(controller.history().can_redo());
    assert_eq!(controller.surface().change_count(), 2);
    assert!(!rx
        .try_iter()
        .any(|e| matches!(e, EditorEvent::LineDeleted(_))));
}

#[test]
fn test_dd_on_empty_buffer_keeps_register() {
    let mut controller = session("", 0);
    controller.set_register("keep");
    press(&mut controller, "ddyy");

    assert_eq!(controller.register(), "keep");
    assert!(!controller.history().can_undo());
    assert_eq!(controller.surface().change_count(), 0);

    press(&mut controller, "P");
    assert_eq!(controller.content(), "keep");
}

#[rstest]
#[case::first_line("line1\nline2\nline3", 2)]
#[case::middle_line("line1\nline2\nline3", 8)]
#[case::last_line("line1\nline2\nline3", 15)]
#[case::trailing_newline("a\nb\n", 2)]
fn test_dd_then_paste_before_restores(#[case] text: &str, #[case] caret: usize) {
    let mut controller = session(text, caret);
    press(&mut controller, "ddP");
    assert_eq!(controller.content(), text);
}

// === Paste ===

#[test]
fn test_paste_after_lands_after_inserted_text() {
    let mut controller = session("abc", 0);
    controller.set_register("X");
    press(&mut controller, "p");

    assert_eq!(controller.content(), "aXbc");
    assert_eq!(controller.caret(), 2);
}

#[test]
fn test_paste_before_stays_at_insertion_start() {
    let mut controller = session("abc", 0);
    controller.set_register("X");
    press(&mut controller, "P");

    assert_eq!(controller.content(), "Xabc");
    assert_eq!(controller.caret(), 0);
}

#[test]
fn test_paste_with_empty_register_is_noop() {
    let mut controller = session("abc", 1);
    press(&mut controller, "pP");

    assert_eq!(controller.content(), "abc");
    assert!(!controller.history().can_undo());
}

#[test]
fn test_yank_then_paste_places_copy_next_to_caret() {
    let mut controller = session("ab", 0);
    press(&mut controller, "yyp");

    assert_eq!(controller.content(), "aabb");
    assert_eq!(controller.caret(), 3);
}

// === Motions ===

#[rstest]
#[case::word_forward("foo bar", 0, "w", 4)]
#[case::word_backward("foo bar", 4, "b", 0)]
#[case::line_end("line1\nline2", 7, "$", 11)]
#[case::line_start("line1\nline2", 9, "0", 6)]
#[case::document_end("line1\nline2", 0, "G", 11)]
#[case::document_start("line1\nline2", 9, "gg", 0)]
#[case::down_keeps_column("abcd\nefgh", 2, "j", 7)]
#[case::up_clamps_to_short_line("ab\nefgh", 7, "k", 2)]
#[case::left_at_start("abc", 0, "h", 0)]
#[case::right_at_end("abc", 3, "l", 3)]
fn test_motions(
    #[case] text: &str,
    #[case] caret: usize,
    #[case] keys: &str,
    #[case] expected: usize,
) {
    let mut controller = session(text, caret);
    press(&mut controller, keys);
    assert_eq!(controller.caret(), expected);
    assert_eq!(controller.surface().selection(), (expected, expected));
}

// === Prefix handling ===

#[test]
fn test_broken_prefix_runs_second_key() {
    let mut controller = session("foo bar", 0);
    press(&mut controller, "dw");

    assert_eq!(controller.content(), "foo bar");
    assert_eq!(controller.caret(), 4);
    assert_eq!(controller.pending_key(), None);
}

#[test]
fn test_unknown_keys_change_nothing() {
    let mut controller = session("foo bar", 3);
    press(&mut controller, "zqZ!#gq");

    assert_eq!(controller.content(), "foo bar");
    assert_eq!(controller.caret(), 3);
    assert_eq!(controller.mode(), EditorMode::Normal);
}

// === Undo / redo ===

#[test]
fn test_undo_and_redo_line_delete() {
    let mut controller = session("line1\nline2", 8);
    press(&mut controller, "dd");
    assert_eq!(controller.content(), "line1\n");

    press(&mut controller, "u");
    assert_eq!(controller.content(), "line1\nline2");
    assert_eq!(controller.caret(), 8);

    controller.handle_key(KeyEvent::ctrl('r'));
    assert_eq!(controller.content(), "line1\n");
}

#[test]
fn test_new_edit_discards_redo() {
    let mut controller = session("abc", 0);
    press(&mut controller, "xux");
    assert_eq!(controller.content(), "bc");
    assert!(!controller.history().can_redo());

    controller.handle_key(KeyEvent::ctrl('r'));
    assert_eq!(controller.content(), "bc");
}

#[test]
fn test_undo_on_fresh_session_is_noop() {
    let mut controller = session("abc", 1);
    press(&mut controller, "u");
    controller.handle_key(KeyEvent::ctrl('r'));

    assert_eq!(controller.content(), "abc");
    assert_eq!(controller.caret(), 1);
}

#[test]
fn test_undo_limit_from_config() {
    let config = ModalConfig {
        undo_limit: 2,
        ..ModalConfig::default()
    };
    let mut controller = ModeController::enable(MemorySurface::new("abcde"), &config);
    press(&mut controller, "xxxx");
    assert_eq!(controller.history().undo_len(), 2);

    press(&mut controller, "uuu");
    assert_eq!(controller.content(), "cde");
}

// === Lifecycle ===

#[test]
fn test_reenable_starts_fresh_session() {
    let mut controller = session("line1\nline2", 0);
    press(&mut controller, "yyvj");
    assert!(controller.mode().is_visual());

    let surface = controller.disable();
    let mut controller = ModeController::enable(surface, &ModalConfig::default());

    assert_eq!(controller.mode(), EditorMode::Normal);
    assert_eq!(controller.register(), "");
    assert!(!controller.history().can_undo());
    press(&mut controller, "p");
    assert_eq!(controller.content(), "line1\nline2");
}

#[test]
fn test_disable_disconnects_subscribers() {
    let mut controller = session("abc", 0);
    let rx = controller.subscribe();
    let _surface = controller.disable();

    let events: Vec<_> = rx.iter().collect();
    assert_eq!(events, vec![EditorEvent::ModeChanged(EditorMode::Normal)]);
}

#[test]
fn test_escape_chord_leaves_insert() {
    let mut controller = session("abc", 0);
    press(&mut controller, "i");
    controller.handle_key(KeyEvent::ctrl('['));
    assert_eq!(controller.mode(), EditorMode::Normal);
}

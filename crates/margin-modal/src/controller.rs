//! The modal session: mode state machine and command execution.

use std::sync::mpsc::Receiver;

use tracing::{debug, trace};

use crate::command::{ModalCommand, Placement};
use crate::config::ModalConfig;
use crate::cursor::{CursorOverlay, CursorPlacement};
use crate::edit::{self, Edit};
use crate::events::{EditorEvent, EventHub, LineDeleted};
use crate::history::{Snapshot, UndoHistory};
use crate::key_handler::{KeyEvent, KeyResult, ModalKeyHandler};
use crate::motion::{self, clamp, line_span};
use crate::surface::TextSurface;
use crate::EditorMode;

/// What the host should do with a key after the controller saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The key was handled; suppress the surface's default handling.
    Suppress,
    /// Let the surface handle the key natively (insert mode typing).
    PassThrough,
}

/// A modal editing session bound to one surface.
///
/// The controller owns its surface for the lifetime of the session, so a
/// surface can never be driven by two sessions at once. [`enable`] starts a
/// fresh session in normal mode; [`disable`] ends it and hands the surface
/// back.
///
/// While in normal or visual mode the controller's copy of the content is
/// authoritative and every change is pushed to the surface. In insert mode
/// the surface is edited natively and the controller re-reads it when insert
/// mode ends.
///
/// [`enable`]: ModeController::enable
/// [`disable`]: ModeController::disable
#[derive(Debug)]
pub struct ModeController<S: TextSurface> {
    surface: S,
    content: String,
    mode: EditorMode,
    /// Fixed end of a visual selection.
    anchor: usize,
    /// Moving end of a visual selection; the caret otherwise.
    head: usize,
    key_handler: ModalKeyHandler,
    register: String,
    history: UndoHistory,
    /// State captured when `i`/`a` started an insert session.
    insert_origin: Option<Snapshot>,
    overlay: CursorOverlay,
    cursor: Option<CursorPlacement>,
    layout_pending: bool,
    events: EventHub,
}

impl<S: TextSurface> ModeController<S> {
    /// Start a session on `surface` with a fixed-ratio cursor overlay.
    pub fn enable(surface: S, config: &ModalConfig) -> Self {
        let overlay = CursorOverlay::fixed(config.cursor.char_width_ratio);
        Self::enable_with_overlay(surface, config, overlay)
    }

    /// Start a session with a custom cursor overlay.
    pub fn enable_with_overlay(
        mut surface: S,
        config: &ModalConfig,
        overlay: CursorOverlay,
    ) -> Self {
        let content = surface.content();
        let caret = clamp(&content, surface.selection().1);
        surface.set_editable(false);
        surface.set_selection(caret, caret);

        debug!(chars = motion::char_len(&content), caret, "modal editing enabled");

        Self {
            surface,
            content,
            mode: EditorMode::Normal,
            anchor: caret,
            head: caret,
            key_handler: ModalKeyHandler::new(config.escape_chord),
            register: String::new(),
            history: UndoHistory::new(config.undo_limit),
            insert_origin: None,
            overlay,
            cursor: None,
            layout_pending: true,
            events: EventHub::new(),
        }
    }

    /// End the session and return the surface, editable again.
    ///
    /// Subscribers are disconnected and the register and history are
    /// dropped along with the controller.
    pub fn disable(mut self) -> S {
        if self.mode == EditorMode::Insert {
            self.resync_from_surface();
        }
        self.surface.set_selection(self.head, self.head);
        self.surface.set_editable(true);
        if self.cursor.take().is_some() {
            self.events.publish(EditorEvent::CursorMoved(None));
        }
        self.events.close();
        debug!("modal editing disabled");
        self.surface
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The active mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// The session's content. Stale while in insert mode; read the surface
    /// instead.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The caret offset.
    pub fn caret(&self) -> usize {
        if self.mode == EditorMode::Insert {
            let content = self.surface.content();
            return clamp(&content, self.surface.selection().1);
        }
        self.head
    }

    /// The raw `(anchor, head)` pair.
    pub fn anchor_head(&self) -> (usize, usize) {
        (self.anchor, self.head)
    }

    /// The selected range `(start, end)`, `start <= end`. Empty outside
    /// visual mode.
    pub fn selection(&self) -> (usize, usize) {
        match self.mode {
            EditorMode::Visual { linewise } => {
                let start = self.anchor.min(self.head);
                let end = self.anchor.max(self.head);
                if linewise {
                    (
                        line_span(&self.content, start).0,
                        line_span(&self.content, end).1,
                    )
                } else {
                    (start, end)
                }
            }
            _ => (self.head, self.head),
        }
    }

    /// The clipboard register.
    pub fn register(&self) -> &str {
        &self.register
    }

    /// Replace the register, e.g. from the system clipboard.
    pub fn set_register(&mut self, text: impl Into<String>) {
        self.register = text.into();
    }

    /// The pending first key of a two-key command, for status display.
    pub fn pending_key(&self) -> Option<char> {
        self.key_handler.pending_key()
    }

    /// The block cursor, when visible.
    pub fn cursor(&self) -> Option<CursorPlacement> {
        self.cursor
    }

    /// Whether the first cursor computation is still waiting for layout.
    pub fn is_layout_pending(&self) -> bool {
        self.layout_pending
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for native insert-mode editing. Content written here
    /// outside insert mode is not seen by the session and is replaced by its
    /// next edit.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Subscribe to session events. The channel starts with the current
    /// mode.
    pub fn subscribe(&mut self) -> Receiver<EditorEvent> {
        self.events.subscribe_with(EditorEvent::ModeChanged(self.mode))
    }

    // =========================================================================
    // Host entry points
    // =========================================================================

    /// Process one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyDisposition {
        match self.key_handler.handle_key(&key, self.mode) {
            KeyResult::Command(command) => {
                self.execute(command);
                KeyDisposition::Suppress
            }
            KeyResult::Pending | KeyResult::Consumed => KeyDisposition::Suppress,
            KeyResult::PassThrough => KeyDisposition::PassThrough,
        }
    }

    /// Run the deferred first cursor computation, once the host has laid out
    /// the surface.
    pub fn settle_layout(&mut self) {
        if self.layout_pending {
            self.refresh_cursor();
        }
    }

    /// The surface scrolled.
    pub fn on_scroll(&mut self) {
        self.refresh_cursor();
    }

    /// Execute a resolved command.
    pub fn execute(&mut self, command: ModalCommand) {
        trace!(command = command.description(), mode = %self.mode, "execute");

        match command {
            ModalCommand::EnterNormalMode => self.enter_normal(),
            ModalCommand::InsertAtCursor => {
                self.insert_origin = Some(self.snapshot());
                self.begin_insert(self.head);
            }
            ModalCommand::AppendAfterCursor => {
                self.insert_origin = Some(self.snapshot());
                let at = clamp(&self.content, self.head + 1);
                self.begin_insert(at);
            }
            ModalCommand::OpenLineBelow | ModalCommand::OpenLineAbove => {
                let placement = match command {
                    ModalCommand::OpenLineAbove => Placement::Before,
                    _ => Placement::After,
                };
                let edit = edit::open_line(&self.content, self.head, placement);
                let caret = edit.offset;
                self.apply_edit(edit);
                self.begin_insert(caret);
            }
            ModalCommand::EnterVisualMode { linewise } => {
                if !self.mode.is_visual() {
                    self.anchor = self.head;
                }
                self.set_mode(EditorMode::Visual { linewise });
                self.sync_selection();
                self.refresh_cursor();
            }
            ModalCommand::Move(m) => {
                self.head = motion::apply(m, &self.content, self.head);
                if !self.mode.is_visual() {
                    self.anchor = self.head;
                }
                self.sync_selection();
                self.refresh_cursor();
            }
            ModalCommand::DeleteChar => {
                if let Some(edit) = edit::delete_char(&self.content, self.head) {
                    self.apply_edit(edit);
                }
            }
            ModalCommand::DeleteLine => self.delete_line(),
            ModalCommand::YankLine => {
                if !self.on_empty_line() {
                    self.register = edit::yank_line(&self.content, self.head);
                }
            }
            ModalCommand::Paste(placement) => {
                if let Some(edit) = edit::paste(&self.content, self.head, &self.register, placement) {
                    self.apply_edit(edit);
                }
            }
            ModalCommand::YankSelection => {
                let (start, end) = self.selection();
                self.register = edit::slice(&self.content, start, end);
                self.head = start;
                self.enter_normal();
            }
            ModalCommand::DeleteSelection => {
                let (start, end) = self.selection();
                if start < end {
                    let (edit, removed) = edit::cut_range(&self.content, start, end);
                    self.register = removed;
                    self.apply_edit(edit);
                } else {
                    self.head = start;
                }
                self.enter_normal();
            }
            ModalCommand::Undo => {
                let current = self.snapshot();
                if let Some(previous) = self.history.undo(current) {
                    debug!(remaining = self.history.undo_len(), "undo");
                    self.restore(previous);
                }
            }
            ModalCommand::Redo => {
                let current = self.snapshot();
                if let Some(next) = self.history.redo(current) {
                    debug!(remaining = self.history.redo_len(), "redo");
                    self.restore(next);
                }
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.content.clone(), self.head)
    }

    fn set_mode(&mut self, mode: EditorMode) {
        if mode == self.mode {
            return;
        }
        debug!(from = %self.mode, to = %mode, "mode change");
        self.mode = mode;
        self.key_handler.reset();
        self.surface.set_editable(mode.is_editable());
        self.events.publish(EditorEvent::ModeChanged(mode));
    }

    fn begin_insert(&mut self, caret: usize) {
        self.head = caret;
        self.anchor = caret;
        self.set_mode(EditorMode::Insert);
        self.surface.set_selection(caret, caret);
        self.refresh_cursor();
    }

    fn enter_normal(&mut self) {
        if self.mode == EditorMode::Insert {
            self.resync_from_surface();
        }
        self.anchor = self.head;
        self.set_mode(EditorMode::Normal);
        self.sync_selection();
        self.refresh_cursor();
    }

    /// Pick up native edits made during insert mode.
    fn resync_from_surface(&mut self) {
        self.content = self.surface.content();
        self.head = clamp(&self.content, self.surface.selection().1);
        self.anchor = self.head;
        if let Some(origin) = self.insert_origin.take() {
            if origin.content != self.content {
                self.history.record(origin);
            }
        }
    }

    /// Whether the caret's line span is empty: an empty buffer, or the
    /// position after a trailing newline.
    fn on_empty_line(&self) -> bool {
        let (start, end) = line_span(&self.content, self.head);
        start == end
    }

    fn delete_line(&mut self) {
        if self.on_empty_line() {
            return;
        }
        self.history.record(self.snapshot());

        let content_before = self.content.clone();
        let cut = edit::delete_line(&content_before, self.head);
        debug!(line = %cut.line.trim_end_matches('\n'), offset = self.head, "line deleted");

        self.register = cut.line.clone();
        self.events.publish(EditorEvent::LineDeleted(LineDeleted {
            line: cut.line,
            content_before,
            offset: self.head,
        }));
        self.replace(cut.edit);
    }

    fn apply_edit(&mut self, edit: Edit) {
        self.history.record(self.snapshot());
        self.replace(edit);
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.replace(Edit {
            content: snapshot.content,
            offset: snapshot.offset,
        });
    }

    /// Swap in new content and caret, then tell the surface and listeners.
    fn replace(&mut self, edit: Edit) {
        self.content = edit.content;
        self.head = clamp(&self.content, edit.offset);
        self.anchor = self.head;
        self.surface.set_content(&self.content);
        self.sync_selection();
        self.surface.content_changed();
        self.events.publish(EditorEvent::ContentChanged);
        self.refresh_cursor();
    }

    fn sync_selection(&mut self) {
        let (start, end) = self.selection();
        self.surface.set_selection(start, end);
    }

    fn refresh_cursor(&mut self) {
        self.layout_pending = false;
        let placement = (self.mode == EditorMode::Normal).then(|| {
            self.overlay.place(
                &self.content,
                self.head,
                &self.surface.font_metrics(),
                self.surface.scroll_offset(),
            )
        });
        if placement != self.cursor {
            self.cursor = placement;
            self.events.publish(EditorEvent::CursorMoved(placement));
        }
    }
}

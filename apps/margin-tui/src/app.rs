//! Application state and main render loop

use std::sync::mpsc::Receiver;

use crossterm::event::{KeyCode, KeyModifiers};
use margin_modal::{
    CursorOverlay, EditorEvent, EditorMode, FontMetrics, KeyDisposition, ModalConfig,
    ModeController, TextSurface,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, warn};

use crate::keybindings::{self, Action, NativeEdit};
use crate::note::NoteFile;
use crate::surface::{CellWidth, NotePad};
use crate::widgets::{ModeIndicator, NoteView};

/// The pad, either driven by the modal engine or edited directly.
enum Editor {
    Modal {
        controller: ModeController<NotePad>,
        events: Receiver<EditorEvent>,
    },
    Plain(NotePad),
}

/// Main application state
pub struct App {
    editor: Editor,
    config: ModalConfig,
    note: NoteFile,
    /// Mode last reported by the engine; `None` while it is off
    mode: Option<EditorMode>,
    /// Status message
    status_message: Option<String>,
    /// Height of the text area at the last render
    viewport_height: usize,
    /// Places the native caret while the pad is editable
    caret_overlay: CursorOverlay,
}

impl App {
    /// Create the app with modal editing enabled.
    pub fn new(pad: NotePad, note: NoteFile, config: ModalConfig) -> Self {
        let mut app = Self {
            editor: Editor::Plain(pad),
            config,
            note,
            mode: None,
            status_message: None,
            viewport_height: 1,
            caret_overlay: CursorOverlay::new(Box::new(CellWidth)),
        };
        app.toggle_modal();
        app
    }

    pub fn pad(&self) -> &NotePad {
        match &self.editor {
            Editor::Modal { controller, .. } => controller.surface(),
            Editor::Plain(pad) => pad,
        }
    }

    fn pad_mut(&mut self) -> &mut NotePad {
        match &mut self.editor {
            Editor::Modal { controller, .. } => controller.surface_mut(),
            Editor::Plain(pad) => pad,
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle a key press. Returns `true` when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match keybindings::global_action(code, modifiers) {
            Some(Action::Quit) => {
                self.autosave();
                return true;
            }
            Some(Action::ToggleModal) => {
                self.toggle_modal();
                return false;
            }
            None => {}
        }

        let native = match &mut self.editor {
            Editor::Modal { controller, .. } => {
                let mode = controller.mode();
                match keybindings::modal_key(code, modifiers, mode) {
                    Some(key) => controller.handle_key(key) == KeyDisposition::PassThrough,
                    None => mode == EditorMode::Insert,
                }
            }
            Editor::Plain(_) => true,
        };
        if native {
            if let Some(edit) = keybindings::native_edit(code, modifiers) {
                self.apply_native(edit);
            }
        }

        self.follow_caret();
        self.drain_events();
        self.autosave();
        false
    }

    fn apply_native(&mut self, edit: NativeEdit) {
        let pad = self.pad_mut();
        match edit {
            NativeEdit::Insert(c) => pad.insert_char(c),
            NativeEdit::Backspace => pad.backspace(),
            NativeEdit::Delete => pad.delete_forward(),
            NativeEdit::Move(m) => pad.move_caret(m),
        }
    }

    /// Switch the modal engine on or off.
    pub fn toggle_modal(&mut self) {
        let editor = std::mem::replace(&mut self.editor, Editor::Plain(NotePad::new("")));
        self.editor = match editor {
            Editor::Modal { controller, .. } => {
                self.mode = None;
                self.status_message = Some("Modal editing off".to_string());
                Editor::Plain(controller.disable())
            }
            Editor::Plain(pad) => {
                let overlay = CursorOverlay::new(Box::new(CellWidth));
                let mut controller = ModeController::enable_with_overlay(pad, &self.config, overlay);
                let events = controller.subscribe();
                self.status_message = Some("Modal editing on".to_string());
                Editor::Modal { controller, events }
            }
        };
        self.drain_events();
    }

    /// Keep the caret on screen, and tell the engine when the view scrolled.
    fn follow_caret(&mut self) {
        let height = self.viewport_height;
        if self.pad_mut().scroll_to_caret(height) {
            if let Editor::Modal { controller, .. } = &mut self.editor {
                controller.on_scroll();
            }
        }
    }

    fn drain_events(&mut self) {
        let Editor::Modal { events, .. } = &self.editor else {
            return;
        };
        let pending: Vec<EditorEvent> = events.try_iter().collect();
        for event in pending {
            match event {
                EditorEvent::ModeChanged(mode) => self.mode = Some(mode),
                EditorEvent::LineDeleted(deleted) => {
                    let line = deleted.line.trim_end_matches('\n');
                    info!(line, offset = deleted.offset, "line deleted");
                    self.status_message = Some(format!("Deleted: {line}"));
                }
                EditorEvent::ContentChanged => self.autosave(),
                EditorEvent::CursorMoved(placement) => {
                    debug!(?placement, "cursor moved");
                }
            }
        }
    }

    fn autosave(&mut self) {
        if !self.pad().is_dirty() {
            return;
        }
        match self.note.write(self.pad().text()) {
            Ok(()) => self.pad_mut().mark_saved(),
            Err(e) => {
                warn!(path = %self.note.path().display(), error = %e, "autosave failed");
                self.status_message = Some(format!("Save failed: {e}"));
            }
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render the application
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Note text
                Constraint::Length(1), // Status line
            ])
            .split(frame.area());

        self.set_viewport_height(chunks[0].height as usize);
        self.render_note(frame, chunks[0]);
        self.render_status_line(frame, chunks[1]);
    }

    fn set_viewport_height(&mut self, height: usize) {
        let resized = height != self.viewport_height;
        self.viewport_height = height;
        if resized {
            self.follow_caret();
        }
        // The first layout pass is done once the text area has a size.
        if let Editor::Modal { controller, .. } = &mut self.editor {
            controller.settle_layout();
        }
    }

    fn render_note(&self, frame: &mut Frame, area: Rect) {
        let pad = self.pad();
        let mut view = NoteView::new(pad.text(), pad.top_line());

        if let Editor::Modal { controller, .. } = &self.editor {
            if controller.mode().is_visual() {
                view = view.selection(controller.selection());
            }
            view = view.cursor(controller.cursor());
        }
        frame.render_widget(view, area);

        if pad.is_editable() {
            let caret = self.caret_overlay.place(
                pad.text(),
                pad.caret(),
                &FontMetrics::cells(),
                pad.scroll_offset(),
            );
            if caret.y >= 0.0 && (caret.y as u16) < area.height {
                frame.set_cursor_position((area.x + caret.x as u16, area.y + caret.y as u16));
            }
        }
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let (line, column) = self.pad().caret_position();
        let pending = match &self.editor {
            Editor::Modal { controller, .. } => controller.pending_key(),
            Editor::Plain(_) => None,
        };

        let mut spans = vec![
            ModeIndicator::new(self.mode).as_span(),
            Span::raw(format!(" {} ", self.note.path().display())),
            Span::styled(
                format!("{}:{} ", line + 1, column + 1),
                Style::default().fg(Color::Cyan),
            ),
        ];
        if let Some(key) = pending {
            spans.push(Span::styled(
                format!("{key} "),
                Style::default().fg(Color::Yellow),
            ));
        }
        if let Some(msg) = &self.status_message {
            spans.push(Span::raw(format!("| {msg}")));
        }

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(status, area);
    }
}

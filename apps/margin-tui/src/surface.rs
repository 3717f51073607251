//! The terminal note pad the modal engine drives.

use margin_modal::motion::{self, char_len, clamp, line_and_column};
use margin_modal::{CharWidthModel, FontMetrics, Motion, ScrollOffset, TextSurface};
use unicode_width::UnicodeWidthChar;

/// Glyph widths in terminal cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellWidth;

impl CharWidthModel for CellWidth {
    fn char_width(&self, c: char, metrics: &FontMetrics) -> f32 {
        let cells = match c {
            '\t' => 4,
            c => c.width().unwrap_or(0),
        };
        cells as f32 * metrics.font_size
    }
}

/// Plain-text note buffer with a character selection and vertical scroll.
#[derive(Debug, Clone)]
pub struct NotePad {
    content: String,
    /// `(anchor, caret)` in character offsets.
    selection: (usize, usize),
    editable: bool,
    /// First visible line.
    top_line: usize,
    dirty: bool,
}

impl NotePad {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            selection: (0, 0),
            editable: true,
            top_line: 0,
            dirty: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn caret(&self) -> usize {
        self.selection.1
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Whether the content changed since the last [`NotePad::mark_saved`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// `(line, column)` of the caret.
    pub fn caret_position(&self) -> (usize, usize) {
        line_and_column(&self.content, self.caret())
    }

    // =========================================================================
    // Native editing (only while editable)
    // =========================================================================

    pub fn insert_char(&mut self, c: char) {
        if !self.editable {
            return;
        }
        let (start, end) = self.ordered_selection();
        let mut chars: Vec<char> = self.content.chars().collect();
        chars.splice(start..end, std::iter::once(c));
        self.content = chars.into_iter().collect();
        self.selection = (start + 1, start + 1);
        self.dirty = true;
    }

    pub fn backspace(&mut self) {
        if !self.editable {
            return;
        }
        let (start, end) = self.ordered_selection();
        if start == end && start == 0 {
            return;
        }
        let from = if start == end { start - 1 } else { start };
        self.remove(from, end);
    }

    pub fn delete_forward(&mut self) {
        if !self.editable {
            return;
        }
        let (start, end) = self.ordered_selection();
        let len = char_len(&self.content);
        if start == end && end == len {
            return;
        }
        let to = if start == end { end + 1 } else { end };
        self.remove(start, to);
    }

    /// Move the caret with the engine's motion rules, collapsing any
    /// selection.
    pub fn move_caret(&mut self, m: Motion) {
        if !self.editable {
            return;
        }
        let caret = motion::apply(m, &self.content, self.caret());
        self.selection = (caret, caret);
    }

    fn remove(&mut self, start: usize, end: usize) {
        let mut chars: Vec<char> = self.content.chars().collect();
        chars.drain(start..end);
        self.content = chars.into_iter().collect();
        self.selection = (start, start);
        self.dirty = true;
    }

    fn ordered_selection(&self) -> (usize, usize) {
        let (a, b) = self.selection;
        (a.min(b), a.max(b))
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Scroll so the caret's line is inside a viewport of `height` lines.
    /// Returns whether the scroll position changed.
    pub fn scroll_to_caret(&mut self, height: usize) -> bool {
        let height = height.max(1);
        let (line, _) = self.caret_position();
        let top = if line < self.top_line {
            line
        } else if line >= self.top_line + height {
            line + 1 - height
        } else {
            self.top_line
        };
        let changed = top != self.top_line;
        self.top_line = top;
        changed
    }
}

impl TextSurface for NotePad {
    fn content(&self) -> String {
        self.content.clone()
    }

    fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    fn selection(&self) -> (usize, usize) {
        self.selection
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = (clamp(&self.content, start), clamp(&self.content, end));
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    fn scroll_offset(&self) -> ScrollOffset {
        ScrollOffset {
            x: 0.0,
            y: self.top_line as f32,
        }
    }

    fn font_metrics(&self) -> FontMetrics {
        FontMetrics::cells()
    }

    fn content_changed(&mut self) {
        self.dirty = true;
    }
}

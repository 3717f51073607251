//! The text surface a modal session edits.
//!
//! A surface is the host's plain-text edit control. The engine keeps its own
//! copy of the content while in command modes and pushes every change back
//! through [`TextSurface::set_content`].

use crate::cursor::{FontMetrics, ScrollOffset};
use crate::motion::char_len;

/// A plain-text edit control driven by a modal session.
///
/// All offsets are character offsets into the content.
pub trait TextSurface {
    // =========================================================================
    // Content and selection
    // =========================================================================

    /// Get the full content.
    fn content(&self) -> String;

    /// Replace the full content.
    fn set_content(&mut self, content: &str);

    /// Get the selection as `(start, end)`. A caret has `start == end`.
    fn selection(&self) -> (usize, usize);

    /// Set the selection. `start > end` is allowed for backward selections.
    fn set_selection(&mut self, start: usize, end: usize);

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Allow or block native typing.
    fn set_editable(&mut self, editable: bool);

    /// Current scroll position.
    fn scroll_offset(&self) -> ScrollOffset {
        ScrollOffset::default()
    }

    /// Font metrics for cursor placement.
    fn font_metrics(&self) -> FontMetrics {
        FontMetrics::default()
    }

    /// Called after the engine replaced the content. Hosts hook autosave and
    /// similar listeners here.
    fn content_changed(&mut self) {}
}

/// An in-memory surface, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    content: String,
    selection: (usize, usize),
    editable: bool,
    scroll: ScrollOffset,
    metrics: FontMetrics,
    changes: usize,
}

impl MemorySurface {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            editable: true,
            ..Self::default()
        }
    }

    /// Builder: place the caret.
    pub fn with_caret(mut self, offset: usize) -> Self {
        let offset = offset.min(char_len(&self.content));
        self.selection = (offset, offset);
        self
    }

    /// Builder: use the given metrics.
    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// How many times `content_changed` fired.
    pub fn change_count(&self) -> usize {
        self.changes
    }

    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    /// Simulate native typing at the caret. Ignored while not editable.
    pub fn type_text(&mut self, text: &str) {
        if !self.editable {
            return;
        }
        let (start, end) = self.selection;
        let (start, end) = (start.min(end), start.max(end));
        let mut chars: Vec<char> = self.content.chars().collect();
        let end = end.min(chars.len());
        let start = start.min(end);
        chars.splice(start..end, text.chars());
        self.content = chars.into_iter().collect();
        let caret = start + char_len(text);
        self.selection = (caret, caret);
    }
}

impl TextSurface for MemorySurface {
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
        let len = char_len(&self.content);
        self.selection = (start.min(len), end.min(len));
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn font_metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn content_changed(&mut self) {
        self.changes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_clamped() {
        let mut surface = MemorySurface::new("abc");
        surface.set_selection(1, 10);
        assert_eq!(surface.selection(), (1, 3));
    }

    #[test]
    fn test_typing_respects_editable() {
        let mut surface = MemorySurface::new("ac").with_caret(1);
        surface.type_text("b");
        assert_eq!(surface.content(), "abc");
        assert_eq!(surface.selection(), (2, 2));

        surface.set_editable(false);
        surface.type_text("zzz");
        assert_eq!(surface.content(), "abc");
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut surface = MemorySurface::new("hello world");
        surface.set_selection(6, 11);
        surface.type_text("there");
        assert_eq!(surface.content(), "hello there");
    }
}

//! The note text, with visual selection and block cursor.

use margin_modal::CursorPlacement;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct NoteView<'a> {
    text: &'a str,
    top_line: usize,
    /// Highlighted character range `[start, end)`.
    selection: Option<(usize, usize)>,
    /// Block cursor, in cells relative to the view.
    cursor: Option<CursorPlacement>,
}

impl<'a> NoteView<'a> {
    pub fn new(text: &'a str, top_line: usize) -> Self {
        Self {
            text,
            top_line,
            selection: None,
            cursor: None,
        }
    }

    pub fn selection(mut self, range: (usize, usize)) -> Self {
        self.selection = (range.0 < range.1).then_some(range);
        self
    }

    pub fn cursor(mut self, cursor: Option<CursorPlacement>) -> Self {
        self.cursor = cursor;
        self
    }

    fn lines(&self, height: usize) -> Vec<Line<'a>> {
        let highlight = Style::default().add_modifier(Modifier::REVERSED);
        let mut offset = 0;
        let mut lines = Vec::new();

        for (index, line) in self.text.split('\n').enumerate() {
            let len = line.chars().count();
            let start = offset;
            offset += len + 1;
            if index < self.top_line {
                continue;
            }
            if lines.len() == height {
                break;
            }

            let Some((sel_start, sel_end)) = self.selection else {
                lines.push(Line::from(line));
                continue;
            };
            let from = sel_start.clamp(start, start + len) - start;
            let to = sel_end.clamp(start, start + len) - start;
            let (before, rest) = split_at_char(line, from);
            let (selected, after) = split_at_char(rest, to - from);
            let mut spans = vec![Span::raw(before), Span::styled(selected, highlight)];
            // Show a selected newline as a highlighted blank.
            if sel_start <= start + len && sel_end > start + len && index + 1 < self.line_count() {
                spans.push(Span::styled(" ", highlight));
            }
            spans.push(Span::raw(after));
            lines.push(Line::from(spans));
        }
        lines
    }

    fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}

fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let at = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    s.split_at(at)
}

impl Widget for NoteView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cursor = self.cursor;
        Paragraph::new(self.lines(area.height as usize)).render(area, buf);

        let Some(cursor) = cursor else {
            return;
        };
        if cursor.x < 0.0 || cursor.y < 0.0 {
            return;
        }
        let (x, y) = (cursor.x as u16, cursor.y as u16);
        let width = (cursor.width as u16).max(1);
        if y >= area.height {
            return;
        }
        let style = Style::default().add_modifier(Modifier::REVERSED);
        for dx in 0..width {
            if x + dx >= area.width {
                break;
            }
            if let Some(cell) = buf.cell_mut((area.x + x + dx, area.y + y)) {
                cell.set_style(style);
            }
        }
    }
}

//! Content-mutating edit operations.
//!
//! Each operation takes the current content and offset and returns the new
//! content and offset without touching any shared state. The controller
//! snapshots history, applies the result to the surface and emits events.

use crate::command::Placement;
use crate::motion::{byte_index, char_len, line_span};

/// The result of an edit: replacement content and the new caret offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub content: String,
    pub offset: usize,
}

/// A line removed by a line delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCut {
    /// The content after removal.
    pub edit: Edit,
    /// The removed text, trailing newline included when present.
    pub line: String,
}

/// Characters `start..end` of `text`.
pub fn slice(text: &str, start: usize, end: usize) -> String {
    let (start, end) = ordered(text, start, end);
    text[byte_index(text, start)..byte_index(text, end)].to_string()
}

fn ordered(text: &str, a: usize, b: usize) -> (usize, usize) {
    let len = char_len(text);
    (a.min(b).min(len), a.max(b).min(len))
}

fn splice(text: &str, start: usize, end: usize, insert: &str) -> String {
    let (start, end) = ordered(text, start, end);
    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..byte_index(text, start)]);
    out.push_str(insert);
    out.push_str(&text[byte_index(text, end)..]);
    out
}

/// Delete the character at `offset`. `None` at end of buffer.
pub fn delete_char(text: &str, offset: usize) -> Option<Edit> {
    if offset >= char_len(text) {
        return None;
    }
    Some(Edit {
        content: splice(text, offset, offset + 1, ""),
        offset,
    })
}

/// Remove the full line containing `offset`.
///
/// The caret lands at the start of whatever line now occupies the removed
/// line's position, clamped to the new length.
pub fn delete_line(text: &str, offset: usize) -> LineCut {
    let (start, end) = line_span(text, offset);
    let line = slice(text, start, end);
    let content = splice(text, start, end, "");
    let offset = start.min(char_len(&content));
    LineCut {
        edit: Edit { content, offset },
        line,
    }
}

/// Copy the full line containing `offset`.
pub fn yank_line(text: &str, offset: usize) -> String {
    let (start, end) = line_span(text, offset);
    slice(text, start, end)
}

/// Insert `register` next to the caret. `None` when the register is empty.
///
/// `After` inserts one position past the caret and leaves the caret just
/// after the inserted text. `Before` inserts at the caret and leaves the
/// caret at the insertion start.
pub fn paste(text: &str, offset: usize, register: &str, placement: Placement) -> Option<Edit> {
    if register.is_empty() {
        return None;
    }
    let len = char_len(text);
    let offset = offset.min(len);
    let (at, caret) = match placement {
        Placement::After => {
            let at = (offset + 1).min(len);
            (at, at + char_len(register))
        }
        Placement::Before => (offset, offset),
    };
    Some(Edit {
        content: splice(text, at, at, register),
        offset: caret,
    })
}

/// Remove characters `[min(a, b), max(a, b))`, returning the edit and the
/// removed text. The caret collapses to the start of the range.
pub fn cut_range(text: &str, a: usize, b: usize) -> (Edit, String) {
    let (start, end) = ordered(text, a, b);
    let removed = slice(text, start, end);
    let edit = Edit {
        content: splice(text, start, end, ""),
        offset: start,
    };
    (edit, removed)
}

/// Open an empty line below (`After`) or above (`Before`) the current line.
pub fn open_line(text: &str, offset: usize, placement: Placement) -> Edit {
    let (start, end) = line_span(text, offset);
    match placement {
        Placement::Before => Edit {
            content: splice(text, start, start, "\n"),
            offset: start,
        },
        Placement::After => {
            // Splice before the line's own newline, if it has one.
            let has_newline = end > start && slice(text, end - 1, end) == "\n";
            let at = if has_newline { end - 1 } else { end };
            Edit {
                content: splice(text, at, at, "\n"),
                offset: at + 1,
            }
        }
    }
}

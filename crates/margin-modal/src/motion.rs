//! Cursor motions over a flat text buffer.
//!
//! Every function here is pure: it reads the content and an offset and
//! returns a new offset. Offsets count characters, not bytes, and every
//! result lies in `0..=len`.

/// A cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// One character left.
    Left,
    /// One character right.
    Right,
    /// One line up, keeping the column.
    Up,
    /// One line down, keeping the column.
    Down,
    /// Start of the next word.
    WordForward,
    /// Start of the previous word.
    WordBackward,
    /// Start of the current line.
    LineStart,
    /// End of the current line (before its newline).
    LineEnd,
    /// Offset 0.
    DocumentStart,
    /// Offset `len`.
    DocumentEnd,
}

/// Word characters: ASCII alphanumerics and underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the character at `offset`, or `text.len()` past the end.
pub(crate) fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Clamp an offset into `0..=len`.
pub fn clamp(text: &str, offset: usize) -> usize {
    offset.min(char_len(text))
}

/// Compute the offset reached by applying `motion` at `offset`.
pub fn apply(motion: Motion, text: &str, offset: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let offset = offset.min(chars.len());

    match motion {
        Motion::Left => offset.saturating_sub(1),
        Motion::Right => (offset + 1).min(chars.len()),
        Motion::Up => line_up(&chars, offset),
        Motion::Down => line_down(&chars, offset),
        Motion::WordForward => word_forward(&chars, offset),
        Motion::WordBackward => word_backward(&chars, offset),
        Motion::LineStart => line_start(&chars, offset),
        Motion::LineEnd => line_end(&chars, offset),
        Motion::DocumentStart => 0,
        Motion::DocumentEnd => chars.len(),
    }
}

/// Bounds of the full line containing `offset`.
///
/// The span runs from just after the preceding newline to just after the
/// following newline, or to the end of the buffer on the last line. This is
/// the range removed by a line delete and copied by a line yank.
pub fn line_span(text: &str, offset: usize) -> (usize, usize) {
    let chars: Vec<char> = text.chars().collect();
    let offset = offset.min(chars.len());
    let start = line_start(&chars, offset);
    let end = line_end(&chars, offset);
    let end = if end < chars.len() { end + 1 } else { end };
    (start, end)
}

/// Zero-based line and column of `offset`.
pub fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 0;
    let mut column = 0;
    for c in text.chars().take(offset) {
        if c == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}

fn line_start(chars: &[char], offset: usize) -> usize {
    chars[..offset]
        .iter()
        .rposition(|&c| c == '\n')
        .map(|i| i + 1)
        .unwrap_or(0)
}

fn line_end(chars: &[char], offset: usize) -> usize {
    chars[offset..]
        .iter()
        .position(|&c| c == '\n')
        .map(|i| offset + i)
        .unwrap_or(chars.len())
}

fn line_up(chars: &[char], offset: usize) -> usize {
    let start = line_start(chars, offset);
    if start == 0 {
        return offset;
    }
    let column = offset - start;
    let prev_end = start - 1;
    let prev_start = line_start(chars, prev_end);
    prev_start + column.min(prev_end - prev_start)
}

fn line_down(chars: &[char], offset: usize) -> usize {
    let end = line_end(chars, offset);
    if end == chars.len() {
        return offset;
    }
    let column = offset - line_start(chars, offset);
    let next_start = end + 1;
    let next_end = line_end(chars, next_start);
    next_start + column.min(next_end - next_start)
}

fn word_forward(chars: &[char], offset: usize) -> usize {
    let mut pos = offset;
    while pos < chars.len() && is_word_char(chars[pos]) {
        pos += 1;
    }
    while pos < chars.len() && !is_word_char(chars[pos]) {
        pos += 1;
    }
    pos
}

fn word_backward(chars: &[char], offset: usize) -> usize {
    if offset == 0 {
        return 0;
    }
    let mut pos = offset - 1;
    while pos > 0 && !is_word_char(chars[pos]) {
        pos -= 1;
    }
    while pos > 0 && is_word_char(chars[pos - 1]) {
        pos -= 1;
    }
    pos
}

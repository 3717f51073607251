//! Block cursor placement for command modes.
//!
//! The surface is read-only in normal mode, which hides the native caret, so
//! the host draws a block cursor where this module says. Placement assumes a
//! fixed-width glyph model: each character is as wide as the configured
//! [`CharWidthModel`] reports. With proportional fonts the result is only an
//! approximation; hosts that know their glyph metrics can plug in their own
//! model.

use serde::{Deserialize, Serialize};

use crate::motion::{clamp, line_and_column};

/// Font metrics of the surface, in pixels (or cells for terminal hosts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub font_size: f32,
    pub line_height: f32,
    /// Inner padding between the surface edge and the first glyph.
    #[serde(default)]
    pub padding_left: f32,
    #[serde(default)]
    pub padding_top: f32,
}

impl FontMetrics {
    /// Metrics of a character-cell terminal: every glyph cell is 1x1.
    pub fn cells() -> Self {
        Self {
            font_size: 1.0,
            line_height: 1.0,
            padding_left: 0.0,
            padding_top: 0.0,
        }
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            line_height: 21.0,
            padding_left: 0.0,
            padding_top: 0.0,
        }
    }
}

/// Current scroll position of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

/// Width of one character for cursor placement.
pub trait CharWidthModel {
    fn char_width(&self, c: char, metrics: &FontMetrics) -> f32;
}

/// Every character is `ratio * font_size` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRatioWidth {
    pub ratio: f32,
}

impl FixedRatioWidth {
    pub fn new(ratio: f32) -> Self {
        Self { ratio }
    }
}

impl Default for FixedRatioWidth {
    fn default() -> Self {
        Self { ratio: 0.6 }
    }
}

impl CharWidthModel for FixedRatioWidth {
    fn char_width(&self, _c: char, metrics: &FontMetrics) -> f32 {
        self.ratio * metrics.font_size
    }
}

/// Where to draw the block cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPlacement {
    /// Zero-based line of the caret.
    pub line: usize,
    /// Zero-based character column within the line.
    pub column: usize,
    /// Left edge, relative to the visible surface area.
    pub x: f32,
    /// Top edge, relative to the visible surface area.
    pub y: f32,
    /// Block width (one character).
    pub width: f32,
    /// Block height (one line).
    pub height: f32,
}

/// Computes block cursor placement from an offset.
pub struct CursorOverlay {
    width_model: Box<dyn CharWidthModel>,
}

impl CursorOverlay {
    pub fn new(width_model: Box<dyn CharWidthModel>) -> Self {
        Self { width_model }
    }

    /// Overlay with a fixed width ratio.
    pub fn fixed(ratio: f32) -> Self {
        Self::new(Box::new(FixedRatioWidth::new(ratio)))
    }

    /// Place the cursor for `offset` in `text`.
    pub fn place(
        &self,
        text: &str,
        offset: usize,
        metrics: &FontMetrics,
        scroll: ScrollOffset,
    ) -> CursorPlacement {
        let offset = clamp(text, offset);
        let (line, column) = line_and_column(text, offset);

        let line_start = offset - column;
        let mut chars = text.chars().skip(line_start);
        let x_in_line: f32 = chars
            .by_ref()
            .take(column)
            .map(|c| self.width_model.char_width(c, metrics))
            .sum();
        // The block covers the character under the caret, or a space at the
        // end of a line.
        let under = chars.next().filter(|&c| c != '\n').unwrap_or(' ');

        CursorPlacement {
            line,
            column,
            x: metrics.padding_left + x_in_line - scroll.x,
            y: metrics.padding_top + line as f32 * metrics.line_height - scroll.y,
            width: self.width_model.char_width(under, metrics),
            height: metrics.line_height,
        }
    }
}

impl Default for CursorOverlay {
    fn default() -> Self {
        Self::new(Box::new(FixedRatioWidth::default()))
    }
}

impl std::fmt::Debug for CursorOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorOverlay").finish_non_exhaustive()
    }
}

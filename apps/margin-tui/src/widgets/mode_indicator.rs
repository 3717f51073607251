//! Mode indicator for the status line.

use margin_modal::EditorMode;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Shows the modal engine's current mode, or that it is switched off.
///
/// Color coding:
/// - Normal: Blue
/// - Insert: Green
/// - Visual / Visual Line: Yellow
/// - Engine off: Gray
pub struct ModeIndicator {
    mode: Option<EditorMode>,
}

impl ModeIndicator {
    /// `None` when modal editing is disabled.
    pub fn new(mode: Option<EditorMode>) -> Self {
        Self { mode }
    }

    pub fn mode_color(mode: Option<EditorMode>) -> Color {
        match mode {
            Some(EditorMode::Normal) => Color::Blue,
            Some(EditorMode::Insert) => Color::Green,
            Some(EditorMode::Visual { .. }) => Color::Yellow,
            None => Color::Gray,
        }
    }

    pub fn label(mode: Option<EditorMode>) -> &'static str {
        mode.map_or("PLAIN", |m| m.display_name())
    }

    /// Render as a styled span (for embedding in other widgets).
    pub fn as_span(&self) -> Span<'static> {
        Span::styled(
            format!(" {} ", Self::label(self.mode)),
            Style::default()
                .fg(Color::Black)
                .bg(Self::mode_color(self.mode))
                .add_modifier(Modifier::BOLD),
        )
    }
}

//! TUI widgets

mod mode_indicator;
mod note_view;

pub use mode_indicator::ModeIndicator;
pub use note_view::NoteView;

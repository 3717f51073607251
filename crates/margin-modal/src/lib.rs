//! Vim-style modal editing for plain-text note surfaces.
//!
//! This crate drives a single flat text buffer through a small modal
//! command set, independent of whatever widget renders it.
//!
//! # Features
//!
//! - **Modes**: Normal, Insert, and Visual (character-wise or line-wise)
//! - **Motions**: `h` `j` `k` `l`, `w` `b`, `0` `$`, `gg` `G`
//! - **Edits**: `x`, `dd`, `yy`, `p` `P`, visual `y`/`d`, `o` `O`
//! - **History**: bounded undo (`u`) and redo (`Ctrl-r`), separate from the
//!   host's native undo
//! - **Block cursor**: placement for command modes, where the surface is
//!   read-only and its native caret is hidden
//!
//! Offsets everywhere are character offsets, never byte offsets.
//!
//! # Example
//!
//! ```
//! use margin_modal::{EditorMode, KeyEvent, MemorySurface, ModalConfig, ModeController};
//!
//! let surface = MemorySurface::new("line1\nline2\nline3");
//! let mut controller = ModeController::enable(surface, &ModalConfig::default());
//!
//! controller.handle_key(KeyEvent::new('d'));
//! controller.handle_key(KeyEvent::new('d'));
//!
//! assert_eq!(controller.content(), "line2\nline3");
//! assert_eq!(controller.register(), "line1\n");
//! assert_eq!(controller.mode(), EditorMode::Normal);
//!
//! let surface = controller.disable();
//! assert!(surface.is_editable());
//! ```

mod command;
pub mod config;
mod controller;
pub mod cursor;
pub mod edit;
mod error;
pub mod events;
pub mod history;
mod key_handler;
mod mode;
pub mod motion;
pub mod surface;

pub use command::{ModalCommand, Placement};
pub use config::{CursorConfig, ModalConfig};
pub use controller::{KeyDisposition, ModeController};
pub use cursor::{
    CharWidthModel, CursorOverlay, CursorPlacement, FixedRatioWidth, FontMetrics, ScrollOffset,
};
pub use error::{ConfigError, ModalError, Result};
pub use events::{EditorEvent, EventHub, LineDeleted};
pub use history::{Snapshot, UndoHistory};
pub use key_handler::{KeyEvent, KeyResult, ModalKeyHandler, PendingPrefix, PrefixKey, ESCAPE};
pub use mode::EditorMode;
pub use motion::Motion;
pub use surface::{MemorySurface, TextSurface};

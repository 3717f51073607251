//! Notifications published by a modal session.
//!
//! Hosts subscribe with [`EventHub::subscribe`] and drain the returned
//! receiver on their own schedule. The session never waits on a subscriber;
//! receivers that have been dropped are pruned on the next publish.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::cursor::CursorPlacement;
use crate::EditorMode;

/// A line removed by `dd`, for archival listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDeleted {
    /// The removed line, trailing newline included when present.
    pub line: String,
    /// The full content before the removal.
    pub content_before: String,
    /// Caret offset at the time of the deletion.
    pub offset: usize,
}

/// An event published by a modal session.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The active mode changed.
    ModeChanged(EditorMode),
    /// A line was deleted.
    LineDeleted(LineDeleted),
    /// The engine replaced the surface content.
    ContentChanged,
    /// The block cursor moved, or was hidden (`None`).
    CursorMoved(Option<CursorPlacement>),
}

/// Fan-out of events to any number of channel subscribers.
#[derive(Debug, Default)]
pub struct EventHub {
    subscribers: Vec<Sender<EditorEvent>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber.
    pub fn subscribe(&mut self) -> Receiver<EditorEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Add a subscriber whose channel starts with `greeting`, so late
    /// subscribers learn the current state without waiting for a change.
    pub fn subscribe_with(&mut self, greeting: EditorEvent) -> Receiver<EditorEvent> {
        let (tx, rx) = channel();
        if tx.send(greeting).is_ok() {
            self.subscribers.push(tx);
        }
        rx
    }

    /// Deliver `event` to every live subscriber.
    pub fn publish(&mut self, event: EditorEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop every subscriber; their receivers observe disconnection.
    pub fn close(&mut self) {
        self.subscribers.clear();
    }
}

//! Single-slot, time-boxed undo for bookmark deletion.
//!
//! Only the most recent deletion can be undone. Recording a new deletion
//! replaces whatever was pending, and a pending deletion lapses once its
//! window has passed.

use crate::models::Bookmark;
use std::time::{Duration, Instant};
use tracing::debug;

/// A deleted bookmark waiting to be restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUndo {
    pub bookmark: Bookmark,
    /// Where it sat in the list before deletion.
    pub position: Option<usize>,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct UndoSlot {
    window: Duration,
    pending: Option<PendingUndo>,
}

impl UndoSlot {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Remember a deletion, replacing any earlier one.
    pub fn record(&mut self, bookmark: Bookmark, position: Option<usize>) {
        self.record_at(bookmark, position, Instant::now());
    }

    fn record_at(&mut self, bookmark: Bookmark, position: Option<usize>, now: Instant) {
        if let Some(previous) = &self.pending {
            debug!(id = %previous.bookmark.id, "Pending undo replaced");
        }
        self.pending = Some(PendingUndo {
            bookmark,
            position,
            expires_at: now + self.window,
        });
    }

    /// Claim the pending deletion if its window is still open. The slot is
    /// empty afterwards either way.
    pub fn take(&mut self) -> Option<PendingUndo> {
        self.take_at(Instant::now())
    }

    fn take_at(&mut self, now: Instant) -> Option<PendingUndo> {
        let pending = self.pending.take()?;
        if now <= pending.expires_at {
            Some(pending)
        } else {
            debug!(id = %pending.bookmark.id, "Undo window lapsed");
            None
        }
    }

    /// Forget the pending deletion if it is for `id`, e.g. because the
    /// same article was saved again. Returns whether anything was dropped.
    pub fn discard(&mut self, id: &str) -> bool {
        if self.pending.as_ref().is_some_and(|p| p.bookmark.id == id) {
            self.pending = None;
            debug!(id, "Pending undo discarded");
            true
        } else {
            false
        }
    }

    /// Time left to undo, if anything is pending.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining_at(Instant::now())
    }

    fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .and_then(|p| p.expires_at.checked_duration_since(now))
    }
}

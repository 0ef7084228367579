//! Bookmark persistence.
//!
//! Bookmarks are kept in insertion order, unique by article id, and written
//! back as one JSON list under [`BOOKMARKS_KEY`] after every mutation.
//! Storage failures never reach the caller: they are logged and the store
//! carries on with what it has in memory.

use super::kv::KeyValueStore;
use crate::models::{Article, Bookmark};
use itertools::Itertools;
use serde_json::Value;
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

/// Storage key holding the JSON list of bookmarks.
pub const BOOKMARKS_KEY: &str = "news_bookmarks";

pub struct BookmarkStore {
    kv: Rc<dyn KeyValueStore>,
    bookmarks: Vec<Bookmark>,
}

impl std::fmt::Debug for BookmarkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarkStore")
            .field("len", &self.bookmarks.len())
            .finish()
    }
}

impl BookmarkStore {
    /// Load bookmarks from `kv`.
    ///
    /// Unreadable or corrupted data yields an empty store. A value that is
    /// valid JSON but not a list is removed so the next write starts clean.
    /// Inside a list, malformed entries are skipped and the rest kept.
    #[instrument(level = "debug", skip_all)]
    pub fn load(kv: Rc<dyn KeyValueStore>) -> Self {
        let bookmarks = match kv.get(BOOKMARKS_KEY) {
            Ok(Some(raw)) => Self::decode(&*kv, &raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Could not read bookmarks; starting empty");
                Vec::new()
            }
        };
        info!(count = bookmarks.len(), "Loaded bookmarks");
        Self { kv, bookmarks }
    }

    fn decode(kv: &dyn KeyValueStore, raw: &str) -> Vec<Bookmark> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Bookmarks are not valid JSON; ignoring them");
                return Vec::new();
            }
        };
        let Value::Array(entries) = value else {
            warn!("Invalid bookmarks structure, resetting");
            if let Err(e) = kv.remove(BOOKMARKS_KEY) {
                warn!(error = %e, "Could not reset bookmarks");
            }
            return Vec::new();
        };
        // Entries are decoded one by one; only the bad ones are dropped.
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Bookmark>(entry) {
                Ok(bookmark) => Some(bookmark),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed bookmark entry");
                    None
                }
            })
            .unique_by(|b| b.id.clone())
            .collect()
    }

    /// Save `article`. Saving an already-saved article returns the existing
    /// bookmark and changes nothing.
    pub fn create(&mut self, article: &Article) -> Bookmark {
        if let Some(existing) = self.get(&article.id) {
            debug!(id = %article.id, "Already bookmarked");
            return existing.clone();
        }
        let bookmark = Bookmark::new(article.clone());
        self.bookmarks.push(bookmark.clone());
        self.persist();
        info!(id = %bookmark.id, title = %bookmark.article.title, "Bookmarked article");
        bookmark
    }

    /// Remove a bookmark and hand it back, or `None` if it was not saved.
    pub fn delete(&mut self, id: &str) -> Option<Bookmark> {
        let index = self.position(id)?;
        let removed = self.bookmarks.remove(index);
        self.persist();
        info!(id, "Removed bookmark");
        Some(removed)
    }

    /// Put back an exact record (original `saved_at` included) at
    /// `position`, or at the end when the position is gone. No-op if a
    /// bookmark with the same id already exists.
    pub fn restore(&mut self, bookmark: Bookmark, position: Option<usize>) -> Bookmark {
        if let Some(existing) = self.get(&bookmark.id) {
            return existing.clone();
        }
        let index = position
            .filter(|p| *p <= self.bookmarks.len())
            .unwrap_or(self.bookmarks.len());
        self.bookmarks.insert(index, bookmark.clone());
        self.persist();
        info!(id = %bookmark.id, index, "Restored bookmark");
        bookmark
    }

    /// Bookmarks in insertion order.
    pub fn list(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.bookmarks.iter().position(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.bookmarks) {
            Ok(j) => j,
            Err(e) => {
                warn!(error = %e, "Could not serialize bookmarks");
                return;
            }
        };
        if let Err(e) = self.kv.set(BOOKMARKS_KEY, &json) {
            warn!(error = %e, "Could not persist bookmarks; keeping them in memory");
        }
    }
}

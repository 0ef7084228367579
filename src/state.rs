//! In-memory view state with synchronous change notification.
//!
//! There is a single [`ViewState`] value. Every update builds a new value
//! from the current one, swaps it in, and then calls each subscriber in
//! subscription order before returning.

use crate::models::{Article, Bookmark, Category, SortBy};
use chrono::{DateTime, Utc};

/// Whether the reader is looking at fetched results or saved articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Browsing,
    Bookmarks,
}

/// Everything the renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub category: Category,
    /// Active search; empty means category browsing.
    pub query: String,
    pub sort: SortBy,
    pub page: u32,
    pub total_pages: u32,
    pub results: Vec<Article>,
    pub bookmarks: Vec<Bookmark>,
    pub mode: ViewMode,
    /// Last user-visible error, cleared by the next successful load.
    pub error: Option<String>,
    /// One-off message for the last action (saved, removed, help text).
    pub notice: Option<String>,
    pub last_fetch: Option<DateTime<Utc>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            category: Category::default(),
            query: String::new(),
            sort: SortBy::default(),
            page: 1,
            total_pages: 0,
            results: Vec::new(),
            bookmarks: Vec::new(),
            mode: ViewMode::default(),
            error: None,
            notice: None,
            last_fetch: None,
        }
    }
}

impl ViewState {
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.iter().any(|b| b.id == id)
    }
}

/// Handle returned by [`StateStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&ViewState)>;

/// Owner of the current [`ViewState`].
pub struct StateStore {
    state: ViewState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(ViewState::default())
    }
}

impl StateStore {
    pub fn new(initial: ViewState) -> Self {
        Self {
            state: initial,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> &ViewState {
        &self.state
    }

    /// Derive the next state from a copy of the current one, install it
    /// and notify subscribers.
    pub fn update(&mut self, f: impl FnOnce(&mut ViewState)) {
        let mut next = self.state.clone();
        f(&mut next);
        self.replace(next);
    }

    /// Install `next` wholesale and notify subscribers.
    pub fn replace(&mut self, next: ViewState) {
        self.state = next;
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&ViewState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }
}

//! Local persistence: the key-value backend, bookmarks and the page cache.
//!
//! # Submodules
//!
//! - [`kv`]: File-per-key storage plus an in-memory fallback
//! - [`bookmarks`]: Ordered, deduplicated bookmarks persisted after every change
//! - [`cache`]: Result pages with a time-to-live
//!
//! # Layout
//!
//! ```text
//! data_dir/
//! ├── news_bookmarks.json
//! ├── news_cache_newsapi_general_1.json
//! └── news_cache_newsapi_search_mars_1.json
//! ```

pub mod bookmarks;
pub mod cache;
pub mod kv;

pub use bookmarks::BookmarkStore;
pub use cache::ResultCache;
pub use kv::{FileStore, KeyValueStore, MemoryStore};

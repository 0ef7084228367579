//! Time-limited cache of fetched result pages.
//!
//! Entries live in the same key-value store as bookmarks under
//! `news_cache_<key>`. Keys name the provider, the category or query, the
//! sort order and the page (or `all` for a whole result set that is paged
//! locally). Each entry records when it was written and its TTL;
//! expired or malformed entries are dropped on read. Like the bookmark
//! store, cache failures are logged and treated as misses.

use super::kv::KeyValueStore;
use crate::models::{Category, PageResult, SortBy};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, warn};

pub const CACHE_PREFIX: &str = "news_cache_";

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    key: String,
    data: PageResult,
    /// Milliseconds since the Unix epoch.
    timestamp: i64,
    /// Milliseconds.
    ttl: u64,
}

impl CacheEntry {
    fn is_fresh(&self, now_ms: i64) -> bool {
        let age = now_ms.saturating_sub(self.timestamp);
        age >= 0 && (age as u64) <= self.ttl
    }
}

pub struct ResultCache {
    kv: Rc<dyn KeyValueStore>,
    ttl: Duration,
    enabled: bool,
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("ttl", &self.ttl)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl ResultCache {
    pub fn new(kv: Rc<dyn KeyValueStore>, ttl: Duration, enabled: bool) -> Self {
        Self { kv, ttl, enabled }
    }

    /// Key for a page of headlines. `page` is `None` for a whole result
    /// set that is sliced locally.
    pub fn headlines_key(
        provider: &str,
        category: Category,
        sort: SortBy,
        page: Option<u32>,
    ) -> String {
        format!("{provider}_{category}_{sort}_{}", page_segment(page))
    }

    /// Key for a page of search results. Case and surrounding spaces in the
    /// query do not matter.
    pub fn search_key(provider: &str, query: &str, sort: SortBy, page: Option<u32>) -> String {
        format!(
            "{provider}_search_{}_{sort}_{}",
            query.trim().to_lowercase(),
            page_segment(page)
        )
    }

    /// A fresh cached page, if any.
    pub fn get(&self, key: &str) -> Option<PageResult> {
        self.get_at(key, Utc::now().timestamp_millis())
    }

    fn get_at(&self, key: &str, now_ms: i64) -> Option<PageResult> {
        if !self.enabled {
            return None;
        }
        let storage_key = format!("{CACHE_PREFIX}{key}");
        let raw = match self.kv.get(&storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, key, "Error retrieving cached page");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, key, "Invalid cache structure, clearing entry");
                self.clear_entry(key);
                return None;
            }
        };

        if !entry.is_fresh(now_ms) {
            debug!(key, "Cache entry expired");
            self.clear_entry(key);
            return None;
        }
        debug!(key, "Cache hit");
        Some(entry.data)
    }

    /// Store `page` under `key`. Empty pages are not cached.
    pub fn put(&self, key: &str, page: &PageResult) {
        self.put_at(key, page, Utc::now().timestamp_millis());
    }

    fn put_at(&self, key: &str, page: &PageResult, now_ms: i64) {
        if !self.enabled || page.articles.is_empty() {
            return;
        }
        let entry = CacheEntry {
            key: key.to_string(),
            data: page.clone(),
            timestamp: now_ms,
            ttl: u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX),
        };
        let json = match serde_json::to_string(&entry) {
            Ok(j) => j,
            Err(e) => {
                warn!(error = %e, key, "Could not serialize cache entry");
                return;
            }
        };
        if let Err(e) = self.kv.set(&format!("{CACHE_PREFIX}{key}"), &json) {
            warn!(error = %e, key, "Error caching page; pruning expired entries");
            self.prune_expired();
        }
    }

    pub fn clear_entry(&self, key: &str) {
        if let Err(e) = self.kv.remove(&format!("{CACHE_PREFIX}{key}")) {
            warn!(error = %e, key, "Could not clear cache entry");
        }
    }

    /// Drop every expired or unreadable entry. Returns how many went.
    pub fn prune_expired(&self) -> usize {
        self.prune_expired_at(Utc::now().timestamp_millis())
    }

    fn prune_expired_at(&self, now_ms: i64) -> usize {
        let mut removed = 0;
        for storage_key in self.cache_keys() {
            let stale = match self.kv.get(&storage_key) {
                Ok(Some(raw)) => serde_json::from_str::<CacheEntry>(&raw)
                    .map(|entry| !entry.is_fresh(now_ms))
                    .unwrap_or(true),
                Ok(None) => false,
                Err(_) => true,
            };
            if stale && self.kv.remove(&storage_key).is_ok() {
                removed += 1;
            }
        }
        if removed > 0 {
            debug!(removed, "Pruned cache entries");
        }
        removed
    }

    /// Remove every cached page. Returns how many went.
    pub fn clear(&self) -> usize {
        self.cache_keys()
            .into_iter()
            .filter(|k| self.kv.remove(k).is_ok())
            .count()
    }

    fn cache_keys(&self) -> Vec<String> {
        match self.kv.keys() {
            Ok(keys) => keys
                .into_iter()
                .filter(|k| k.starts_with(CACHE_PREFIX))
                .collect(),
            Err(e) => {
                warn!(error = %e, "Could not list cache entries");
                Vec::new()
            }
        }
    }
}

fn page_segment(page: Option<u32>) -> String {
    page.map_or_else(|| "all".to_string(), |p| p.to_string())
}

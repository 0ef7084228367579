//! Data models for normalized articles, bookmarks and result pages.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: a news item normalized from any provider's payload
//! - [`Bookmark`]: an article the reader saved, with the time it was saved
//! - [`PageResult`]: one page of articles plus pagination metadata
//! - [`Category`]: the fixed set of headline categories
//! - [`SortBy`]: how results are ordered
//!
//! Articles are immutable once fetched; their identifier is derived from the
//! URL so the same story maps to the same bookmark across sessions.

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Headline categories offered by the category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Business,
    Technology,
    Sports,
    Entertainment,
    Health,
    Science,
}

impl Category {
    /// Every category, in the order the filter bar shows them.
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Technology,
        Category::Sports,
        Category::Entertainment,
        Category::Health,
        Category::Science,
    ];

    /// The lowercase value used in URLs, cache keys and article tags.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Science => "science",
        }
    }

    /// Display label for the filter bar.
    pub fn label(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Science => "Science",
        }
    }

    /// Parse a category from user input, case-insensitively.
    pub fn parse(s: &str) -> Option<Category> {
        let wanted = s.trim().to_lowercase();
        Category::ALL.into_iter().find(|c| c.as_str() == wanted)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result ordering.
///
/// `PublishedAt` asks the provider for newest-first results and also sorts
/// each page by date locally. `Relevance` keeps the provider's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum SortBy {
    #[default]
    #[serde(rename = "published", alias = "publishedAt")]
    #[value(name = "published", alias = "date")]
    PublishedAt,
    #[serde(rename = "relevance")]
    #[value(name = "relevance")]
    Relevance,
}

impl SortBy {
    /// The value used in config files and cache keys.
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::PublishedAt => "published",
            SortBy::Relevance => "relevance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortBy::PublishedAt => "newest first",
            SortBy::Relevance => "most relevant",
        }
    }

    /// Parse a sort order from user input, case-insensitively.
    pub fn parse(s: &str) -> Option<SortBy> {
        match s.trim().to_lowercase().as_str() {
            "published" | "publishedat" | "date" | "newest" => Some(SortBy::PublishedAt),
            "relevance" | "relevant" => Some(SortBy::Relevance),
            _ => None,
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an article was published.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Source {
    /// Provider-specific source id, empty when the provider has none.
    pub id: String,
    /// Human-readable outlet name.
    pub name: String,
}

/// A news item normalized from a provider payload.
///
/// # Fields
///
/// * `id` - Stable identifier derived from `url` via [`article_id`]
/// * `category` - The category it was fetched under, or `"search"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub source: Source,
    pub category: String,
}

impl Article {
    /// Placeholder used when a provider omits the description.
    pub const NO_DESCRIPTION: &'static str = "No description available";
    /// Placeholder used when a provider omits the outlet name.
    pub const UNKNOWN_SOURCE: &'static str = "Unknown Source";
    /// Category tag given to search results.
    pub const SEARCH_CATEGORY: &'static str = "search";

    /// Build an article from raw provider fields, applying the usual defaults.
    ///
    /// Returns `None` when the title or the URL is missing or blank, since
    /// such items can be neither shown nor bookmarked.
    pub fn from_parts(
        title: Option<&str>,
        description: Option<&str>,
        url: Option<&str>,
        image_url: Option<&str>,
        published_at: Option<&str>,
        source: Source,
        category: &str,
    ) -> Option<Article> {
        let title = title.map(str::trim).filter(|t| !t.is_empty())?;
        let url = url.map(str::trim).filter(|u| !u.is_empty())?;

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(Self::NO_DESCRIPTION);
        let source = Source {
            id: source.id,
            name: if source.name.trim().is_empty() {
                Self::UNKNOWN_SOURCE.to_string()
            } else {
                source.name
            },
        };

        Some(Article {
            id: article_id(url),
            title: title.to_string(),
            description: description.to_string(),
            url: url.to_string(),
            image_url: image_url
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string),
            published_at: published_at.and_then(parse_timestamp),
            source,
            category: category.to_string(),
        })
    }
}

/// A saved article. Keyed by the article's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub article: Article,
    pub saved_at: DateTime<Utc>,
}

impl Bookmark {
    /// Wrap an article, stamping it with the current time.
    pub fn new(article: Article) -> Self {
        Self {
            id: article.id.clone(),
            article,
            saved_at: Utc::now(),
        }
    }
}

/// One page of results with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub articles: Vec<Article>,
    pub total_results: u64,
    pub page: u32,
    pub total_pages: u32,
    pub query: Option<String>,
}

/// Derive a stable identifier from an article URL.
///
/// A 32-bit wrapping `h = h * 31 + unit` over the URL's UTF-16 code units,
/// made non-negative and rendered in base 36. Used for deduplication and
/// bookmark keys only, never for anything security related.
pub fn article_id(url: &str) -> String {
    let hash = url
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    to_base36(i64::from(hash).unsigned_abs())
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Parse the timestamp formats the supported providers emit.
///
/// Accepts RFC 3339 (`2025-05-06T14:30:00Z`) and the space-separated
/// `2025-05-06 14:30:00` form, which is taken to be UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

//! News API providers.
//!
//! Each provider knows how to build request URLs for headlines and search,
//! and how to turn its JSON body into normalized [`Article`]s. The request
//! layer in [`crate::api`] stays provider-agnostic.
//!
//! # Supported Providers
//!
//! | Provider | Module | Pagination | Notes |
//! |----------|--------|------------|-------|
//! | NewsAPI | [`newsapi`] | server | `top-headlines` and `everything` endpoints; `sortBy` on search |
//! | NewsData.io | [`newsdata`] | client | One result set per call; sliced locally; no ordering parameter |
//! | The Guardian | [`guardian`] | server | Sections instead of categories; HTML summaries; `order-by` |
//!
//! # Common Patterns
//!
//! Each provider:
//! - Sends the API key as a query parameter
//! - Drops items without a title or URL
//! - Maps a body-level `status: "error"` to [`NewsError::Api`]
//! - Passes [`SortBy`] on where the API has an ordering parameter

use crate::error::NewsError;
use crate::models::{Article, Category, SortBy};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use url::Url;

pub mod guardian;
pub mod newsapi;
pub mod newsdata;

/// Who slices a result set into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// The provider takes `page` and reports totals.
    Server,
    /// The provider returns one list; the client pages through it.
    Client,
}

/// One decoded response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderPage {
    pub articles: Vec<Article>,
    /// Total matching results, when the provider reports it.
    pub total_results: Option<u64>,
    /// Total pages, when the provider reports it directly.
    pub total_pages: Option<u32>,
}

/// A news API the reader can query.
pub trait Provider: fmt::Debug {
    /// Display name used in logs.
    fn name(&self) -> &'static str;

    /// How results are paginated.
    fn pagination(&self) -> Pagination {
        Pagination::Server
    }

    /// The provider's API key, so it can be redacted from logged URLs.
    fn api_key(&self) -> &str;

    /// URL for a page of top headlines in `category`. Providers without a
    /// server-side ordering for headlines ignore `sort`.
    fn headlines_url(
        &self,
        category: Category,
        page: u32,
        page_size: u32,
        sort: SortBy,
    ) -> Result<Url, NewsError>;

    /// URL for a page of search results. `query` is already trimmed.
    fn search_url(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
        sort: SortBy,
    ) -> Result<Url, NewsError>;

    /// Decode a successful response body. `category_tag` is stamped on
    /// every article.
    fn parse(&self, body: Value, category_tag: &str) -> Result<ProviderPage, NewsError>;
}

/// The providers selectable from the CLI or config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(name = "newsapi")]
    NewsApi,
    #[value(name = "newsdata")]
    NewsData,
    #[value(name = "guardian")]
    Guardian,
}

impl ProviderKind {
    /// Build the provider against its public endpoint, or against
    /// `base_url` when one is given (a proxy or a local mock).
    pub fn build(self, api_key: impl Into<String>, base_url: Option<&str>) -> Box<dyn Provider> {
        let api_key = api_key.into();
        match (self, base_url) {
            (ProviderKind::NewsApi, None) => Box::new(newsapi::NewsApi::new(api_key)),
            (ProviderKind::NewsApi, Some(base)) => {
                Box::new(newsapi::NewsApi::new(api_key).with_base_url(base))
            }
            (ProviderKind::NewsData, None) => Box::new(newsdata::NewsData::new(api_key)),
            (ProviderKind::NewsData, Some(base)) => {
                Box::new(newsdata::NewsData::new(api_key).with_base_url(base))
            }
            (ProviderKind::Guardian, None) => Box::new(guardian::Guardian::new(api_key)),
            (ProviderKind::Guardian, Some(base)) => {
                Box::new(guardian::Guardian::new(api_key).with_base_url(base))
            }
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderKind::NewsApi => "newsapi",
            ProviderKind::NewsData => "newsdata",
            ProviderKind::Guardian => "guardian",
        })
    }
}

/// Join `path` onto `base` and append query pairs.
pub(crate) fn build_url(base: &Url, path: &str, params: &[(&str, String)]) -> Result<Url, NewsError> {
    let mut url = base
        .join(path)
        .map_err(|e| NewsError::Config(format!("invalid endpoint {base}{path}: {e}")))?;
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}

/// Parse a base URL, making sure it ends with `/` so `join` appends.
pub(crate) fn base_url(raw: &str) -> Url {
    let raw = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&raw).unwrap_or_else(|_| Url::parse("http://localhost/").expect("static url"))
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, NewsError> {
    serde_json::from_value(body).map_err(|e| NewsError::Decode(e.to_string()))
}

//! [NewsAPI](https://newsapi.org) provider.
//!
//! Headlines come from `/v2/top-headlines?category=…`, search from
//! `/v2/everything?q=…&sortBy=…`. Both are server-paginated and report
//! `totalResults`. `top-headlines` has no ordering parameter.

use super::{Provider, ProviderPage, base_url, build_url, decode};
use crate::error::NewsError;
use crate::models::{Article, Category, SortBy, Source};
use crate::utils::strip_html;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

const DEFAULT_BASE: &str = "https://newsapi.org/v2/";

/// NewsAPI marks takedowns with this title instead of dropping them.
const REMOVED_TITLE: &str = "[Removed]";

#[derive(Debug, Clone)]
pub struct NewsApi {
    api_key: String,
    base: Url,
}

impl NewsApi {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base: base_url(DEFAULT_BASE),
        }
    }

    /// Point the provider at another host (used by tests).
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.base = base_url(base);
        self
    }
}

fn sort_param(sort: SortBy) -> &'static str {
    match sort {
        SortBy::PublishedAt => "publishedAt",
        SortBy::Relevance => "relevancy",
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    status: Option<String>,
    code: Option<String>,
    message: Option<String>,
    total_results: Option<u64>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    source: Option<RawSource>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    id: Option<String>,
    name: Option<String>,
}

impl Provider for NewsApi {
    fn name(&self) -> &'static str {
        "newsapi"
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn headlines_url(
        &self,
        category: Category,
        page: u32,
        page_size: u32,
        _sort: SortBy,
    ) -> Result<Url, NewsError> {
        build_url(
            &self.base,
            "top-headlines",
            &[
                ("category", category.as_str().to_string()),
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
                ("apiKey", self.api_key.clone()),
            ],
        )
    }

    fn search_url(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
        sort: SortBy,
    ) -> Result<Url, NewsError> {
        build_url(
            &self.base,
            "everything",
            &[
                ("q", query.to_string()),
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
                ("sortBy", sort_param(sort).to_string()),
                ("apiKey", self.api_key.clone()),
            ],
        )
    }

    fn parse(&self, body: Value, category_tag: &str) -> Result<ProviderPage, NewsError> {
        let envelope: Envelope = decode(body)?;
        if envelope.status.as_deref() == Some("error") {
            return Err(NewsError::Api {
                code: envelope.code.unwrap_or_else(|| "API_ERROR".to_string()),
                message: envelope
                    .message
                    .unwrap_or_else(|| "An error occurred while fetching news".to_string()),
            });
        }

        let received = envelope.articles.len();
        let articles: Vec<Article> = envelope
            .articles
            .into_iter()
            .filter(|a| a.title.as_deref() != Some(REMOVED_TITLE))
            .filter_map(|a| {
                let source = a.source.map_or_else(Source::default, |s| Source {
                    id: s.id.unwrap_or_default(),
                    name: s.name.unwrap_or_default(),
                });
                let description = a.description.as_deref().map(strip_html);
                Article::from_parts(
                    a.title.as_deref(),
                    description.as_deref(),
                    a.url.as_deref(),
                    a.url_to_image.as_deref(),
                    a.published_at.as_deref(),
                    source,
                    category_tag,
                )
            })
            .collect();
        debug!(received, kept = articles.len(), "Parsed NewsAPI body");

        Ok(ProviderPage {
            articles,
            total_results: envelope.total_results,
            total_pages: None,
        })
    }
}

//! [NewsData.io](https://newsdata.io) provider.
//!
//! Both headlines and search hit `/api/1/news`. The endpoint returns a
//! single batch per call, so the client paginates locally over it.

use super::{Pagination, Provider, ProviderPage, base_url, build_url, decode};
use crate::error::NewsError;
use crate::models::{Article, Category, SortBy, Source};
use crate::utils::strip_html;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

const DEFAULT_BASE: &str = "https://newsdata.io/api/1/";

#[derive(Debug, Clone)]
pub struct NewsData {
    api_key: String,
    base: Url,
}

impl NewsData {
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

    /// NewsData calls the general feed `top`.
    fn category_param(category: Category) -> &'static str {
        match category {
            Category::General => "top",
            other => other.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    status: Option<String>,
    total_results: Option<u64>,
    #[serde(default)]
    results: Value,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source_id: Option<String>,
    source_name: Option<String>,
}

impl Provider for NewsData {
    fn name(&self) -> &'static str {
        "newsdata"
    }

    fn pagination(&self) -> Pagination {
        Pagination::Client
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn headlines_url(
        &self,
        category: Category,
        _page: u32,
        _page_size: u32,
        _sort: SortBy,
    ) -> Result<Url, NewsError> {
        build_url(
            &self.base,
            "news",
            &[
                ("apikey", self.api_key.clone()),
                ("category", Self::category_param(category).to_string()),
                ("language", "en".to_string()),
            ],
        )
    }

    fn search_url(
        &self,
        query: &str,
        _page: u32,
        _page_size: u32,
        _sort: SortBy,
    ) -> Result<Url, NewsError> {
        build_url(
            &self.base,
            "news",
            &[
                ("apikey", self.api_key.clone()),
                ("q", query.to_string()),
                ("language", "en".to_string()),
            ],
        )
    }

    fn parse(&self, body: Value, category_tag: &str) -> Result<ProviderPage, NewsError> {
        let envelope: Envelope = decode(body)?;
        if envelope.status.as_deref() == Some("error") {
            // Errors arrive as `results: {code, message}`.
            let err: ErrorBody = decode(envelope.results).unwrap_or(ErrorBody {
                code: None,
                message: None,
            });
            return Err(NewsError::Api {
                code: err.code.unwrap_or_else(|| "API_ERROR".to_string()),
                message: err
                    .message
                    .unwrap_or_else(|| "An error occurred while fetching news".to_string()),
            });
        }

        let raw: Vec<RawArticle> = match envelope.results {
            Value::Null => Vec::new(),
            other => decode(other)?,
        };
        let received = raw.len();
        let articles: Vec<Article> = raw
            .into_iter()
            .filter_map(|a| {
                let name = a
                    .source_name
                    .clone()
                    .or_else(|| a.source_id.clone())
                    .unwrap_or_default();
                let description = a.description.as_deref().map(strip_html);
                Article::from_parts(
                    a.title.as_deref(),
                    description.as_deref(),
                    a.link.as_deref(),
                    a.image_url.as_deref(),
                    a.pub_date.as_deref(),
                    Source {
                        id: a.source_id.unwrap_or_default(),
                        name,
                    },
                    category_tag,
                )
            })
            .collect();
        debug!(received, kept = articles.len(), "Parsed NewsData body");

        Ok(ProviderPage {
            articles,
            total_results: envelope.total_results,
            total_pages: None,
        })
    }
}

//! [The Guardian Open Platform](https://open-platform.theguardian.com) provider.
//!
//! Uses `/search` for both headlines (filtered by section) and queries, with
//! `order-by` taken from the requested [`SortBy`]. Summaries come from
//! `fields.trailText`, which contains HTML.

use super::{Provider, ProviderPage, base_url, build_url, decode};
use crate::error::NewsError;
use crate::models::{Article, Category, SortBy, Source};
use crate::utils::strip_html;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

const DEFAULT_BASE: &str = "https://content.guardianapis.com/";
const SOURCE_NAME: &str = "The Guardian";
const SHOW_FIELDS: &str = "thumbnail,trailText,byline";
/// The API rejects larger pages.
const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone)]
pub struct Guardian {
    api_key: String,
    base: Url,
}

impl Guardian {
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

    fn order_by(sort: SortBy) -> &'static str {
        match sort {
            SortBy::PublishedAt => "newest",
            SortBy::Relevance => "relevance",
        }
    }

    fn section(category: Category) -> Option<&'static str> {
        match category {
            Category::General => None,
            Category::Business => Some("business"),
            Category::Technology => Some("technology"),
            Category::Sports => Some("sport"),
            Category::Entertainment => Some("culture"),
            Category::Health => Some("society"),
            Category::Science => Some("science"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Response,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    status: Option<String>,
    message: Option<String>,
    total: Option<u64>,
    pages: Option<u32>,
    #[serde(default)]
    results: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    web_title: Option<String>,
    web_url: Option<String>,
    web_publication_date: Option<String>,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fields {
    trail_text: Option<String>,
    thumbnail: Option<String>,
}

impl Provider for Guardian {
    fn name(&self) -> &'static str {
        "guardian"
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn headlines_url(
        &self,
        category: Category,
        page: u32,
        page_size: u32,
        sort: SortBy,
    ) -> Result<Url, NewsError> {
        let mut params = vec![
            ("api-key", self.api_key.clone()),
            ("page", page.to_string()),
            ("page-size", page_size.min(MAX_PAGE_SIZE).to_string()),
            ("show-fields", SHOW_FIELDS.to_string()),
            ("order-by", Self::order_by(sort).to_string()),
        ];
        if let Some(section) = Self::section(category) {
            params.push(("section", section.to_string()));
        }
        build_url(&self.base, "search", &params)
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
            "search",
            &[
                ("api-key", self.api_key.clone()),
                ("q", query.to_string()),
                ("page", page.to_string()),
                ("page-size", page_size.min(MAX_PAGE_SIZE).to_string()),
                ("show-fields", SHOW_FIELDS.to_string()),
                ("order-by", Self::order_by(sort).to_string()),
            ],
        )
    }

    fn parse(&self, body: Value, category_tag: &str) -> Result<ProviderPage, NewsError> {
        let Envelope { response } = decode(body)?;
        if response.status.as_deref() != Some("ok") {
            return Err(NewsError::Api {
                code: response.status.unwrap_or_else(|| "API_ERROR".to_string()),
                message: response
                    .message
                    .unwrap_or_else(|| "Guardian API error".to_string()),
            });
        }

        let received = response.results.len();
        let articles: Vec<Article> = response
            .results
            .into_iter()
            .filter_map(|a| {
                let description = a.fields.trail_text.as_deref().map(strip_html);
                Article::from_parts(
                    a.web_title.as_deref(),
                    description.as_deref(),
                    a.web_url.as_deref(),
                    a.fields.thumbnail.as_deref(),
                    a.web_publication_date.as_deref(),
                    Source {
                        id: "the-guardian".to_string(),
                        name: SOURCE_NAME.to_string(),
                    },
                    category_tag,
                )
            })
            .collect();
        debug!(received, kept = articles.len(), "Parsed Guardian body");

        Ok(ProviderPage {
            articles,
            total_results: response.total,
            total_pages: response.pages,
        })
    }
}

//! News API requests with exponential backoff retry logic.
//!
//! This module provides the provider-agnostic request layer. It sends
//! HTTP GETs, maps failures to typed [`NewsError`]s, retries transient
//! network failures with exponential backoff and jitter, and turns provider
//! bodies into paginated, deduplicated [`PageResult`]s. Results are sorted
//! newest first only when [`SortBy::PublishedAt`] is asked for; otherwise
//! the provider's order is kept.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`FetchJson`]: Core trait defining an async GET that yields JSON
//! - [`HttpFetcher`]: Implements it with `reqwest`
//! - [`RetryFetch`]: Decorator that adds retry logic to any `FetchJson` implementation
//! - [`NewsClient`]: Headlines and search on top of a fetcher and a [`Provider`]
//!
//! # Retry Strategy
//!
//! - Only [`NewsError::Network`] is retried; HTTP statuses are final
//! - Maximum 3 retry attempts by default
//! - Exponential backoff starting at 1 second
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd

use crate::error::NewsError;
use crate::models::{Article, Category, PageResult, SortBy};
use crate::providers::{Pagination, Provider, ProviderPage};
use crate::utils::{looks_truncated, redact, truncate_for_log};
use itertools::Itertools;
use rand::{Rng, rng};
use serde_json::Value;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Shortest search text sent to a provider.
pub const MIN_QUERY_LEN: usize = 2;

/// Trait for an async GET returning a JSON body.
///
/// Implementors map every failure to a [`NewsError`]. Transport problems
/// must be reported as [`NewsError::Network`] so decorators can retry them.
pub trait FetchJson {
    /// Fetch `url` and decode the body as JSON.
    async fn fetch(&self, url: &Url) -> Result<Value, NewsError>;
}

/// Wrapper that adds exponential backoff retry logic to any [`FetchJson`] implementation.
///
/// # Backoff Strategy
///
/// The delay between retries follows this formula:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    /// The underlying fetcher to wrap.
    inner: T,
    /// Maximum number of retry attempts before giving up.
    max_retries: usize,
    /// Initial delay between retries (doubles with each attempt).
    base_delay: StdDuration,
    /// Maximum delay cap to prevent excessive waiting.
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchJson,
{
    /// Create a new retry wrapper around an existing [`FetchJson`] implementation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let http = HttpFetcher::new(Duration::from_secs(10), "key")?;
    /// let fetcher = RetryFetch::new(http, 3, Duration::from_secs(1));
    /// ```
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }

    /// Override the backoff ceiling.
    pub fn with_max_delay(mut self, max_delay: StdDuration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// The wrapped fetcher.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn backoff(&self, attempt: usize) -> StdDuration {
        let shift = u32::try_from(attempt.saturating_sub(1)).unwrap_or(u32::MAX).min(16);
        let delay = self.base_delay.saturating_mul(1 << shift).min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=250);
        delay + StdDuration::from_millis(jitter_ms)
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FetchJson for RetryFetch<T>
where
    T: FetchJson + fmt::Debug,
{
    #[instrument(level = "debug", skip_all)]
    async fn fetch(&self, url: &Url) -> Result<Value, NewsError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis(),
                            elapsed_ms_total = total_dt.as_millis(),
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis(),
                        elapsed_ms_total = total_dt.as_millis(),
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// [`FetchJson`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    /// Redacted from every logged URL.
    secret: String,
}

impl HttpFetcher {
    /// Build a client with a per-request timeout.
    pub fn new(timeout: StdDuration, secret: impl Into<String>) -> Result<Self, NewsError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NewsError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            secret: secret.into(),
        })
    }
}

impl FetchJson for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(url = %redact(url.as_str(), &self.secret)))]
    async fn fetch(&self, url: &Url) -> Result<Value, NewsError> {
        let t0 = Instant::now();
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| NewsError::from(e.without_url()))?;

        let status = resp.status();
        if let Some(remaining) = resp
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|v| v.to_str().ok())
        {
            debug!(remaining, "Rate limit remaining");
        }

        if !status.is_success() {
            let err = NewsError::from_status(status.as_u16());
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis(),
                code = err.code(),
                "HTTP request failed"
            );
            return Err(err);
        }

        let text = resp
            .text()
            .await
            .map_err(|e| NewsError::from(e.without_url()))?;
        debug!(bytes = text.len(), elapsed_ms = t0.elapsed().as_millis(), "Received body");

        serde_json::from_str(&text).map_err(|e| {
            if looks_truncated(&e) {
                NewsError::Network(format!("truncated body: {e}"))
            } else {
                warn!(
                    error = %e,
                    body_preview = %truncate_for_log(&text, 300),
                    "Provider returned malformed JSON"
                );
                NewsError::Decode(e.to_string())
            }
        })
    }
}

/// Headlines and search against one provider.
#[derive(Debug)]
pub struct NewsClient<F> {
    fetcher: F,
    provider: Box<dyn Provider>,
    page_size: u32,
}

impl<F> NewsClient<F>
where
    F: FetchJson,
{
    pub fn new(fetcher: F, provider: Box<dyn Provider>, page_size: u32) -> Self {
        Self {
            fetcher,
            provider,
            page_size: page_size.max(1),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Who slices results into pages for this client's provider.
    pub fn pagination(&self) -> Pagination {
        self.provider.pagination()
    }

    /// Fetch one page of top headlines. Pages start at 1.
    #[instrument(level = "info", skip(self), fields(provider = self.provider.name()))]
    pub async fn fetch_headlines(
        &self,
        category: Category,
        page: u32,
        sort: SortBy,
    ) -> Result<PageResult, NewsError> {
        let page = page.max(1);
        if self.pagination() == Pagination::Client {
            let set = self.fetch_headlines_set(category, sort).await?;
            return Ok(self.slice_page(&set, page));
        }
        let url = self
            .provider
            .headlines_url(category, page, self.page_size, sort)?;
        self.fetch_page(&url, category.as_str(), page, None, sort)
            .await
    }

    /// Fetch one page of search results.
    ///
    /// The query is trimmed; anything shorter than [`MIN_QUERY_LEN`]
    /// characters is rejected before a request is made.
    #[instrument(level = "info", skip(self), fields(provider = self.provider.name()))]
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        sort: SortBy,
    ) -> Result<PageResult, NewsError> {
        let query = validate_query(query)?;
        let page = page.max(1);
        if self.pagination() == Pagination::Client {
            let set = self.search_set(query, sort).await?;
            return Ok(self.slice_page(&set, page));
        }
        let url = self.provider.search_url(query, page, self.page_size, sort)?;
        self.fetch_page(&url, Article::SEARCH_CATEGORY, page, Some(query), sort)
            .await
    }

    /// Everything the provider returns for `category` in one call, as a
    /// single [`PageResult`] whose `total_pages` counts this client's pages.
    /// Page through it with [`NewsClient::slice_page`].
    pub async fn fetch_headlines_set(
        &self,
        category: Category,
        sort: SortBy,
    ) -> Result<PageResult, NewsError> {
        let url = self
            .provider
            .headlines_url(category, 1, self.page_size, sort)?;
        self.fetch_set(&url, category.as_str(), None, sort).await
    }

    /// Like [`NewsClient::fetch_headlines_set`], for a search.
    pub async fn search_set(&self, query: &str, sort: SortBy) -> Result<PageResult, NewsError> {
        let query = validate_query(query)?;
        let url = self.provider.search_url(query, 1, self.page_size, sort)?;
        self.fetch_set(&url, Article::SEARCH_CATEGORY, Some(query), sort)
            .await
    }

    /// Page `page` (from 1) of a whole result set.
    pub fn slice_page(&self, set: &PageResult, page: u32) -> PageResult {
        let page = page.max(1);
        let size = self.page_size as usize;
        let start = (page as usize - 1).saturating_mul(size);
        PageResult {
            articles: set.articles.iter().skip(start).take(size).cloned().collect(),
            total_results: set.total_results,
            page,
            total_pages: pages_for(set.total_results, u64::from(self.page_size)),
            query: set.query.clone(),
        }
    }

    /// Request `url`, then parse, dedupe and order the articles.
    async fn fetch_articles(
        &self,
        url: &Url,
        tag: &str,
        sort: SortBy,
    ) -> Result<ProviderPage, NewsError> {
        info!(url = %redact(url.as_str(), self.provider.api_key()), "Requesting page");
        let body = self.fetcher.fetch(url).await?;
        let parsed = self.provider.parse(body, tag)?;

        let mut articles = dedupe_by_url(parsed.articles);
        if sort == SortBy::PublishedAt {
            sort_newest_first(&mut articles);
        }
        Ok(ProviderPage { articles, ..parsed })
    }

    async fn fetch_page(
        &self,
        url: &Url,
        tag: &str,
        page: u32,
        query: Option<&str>,
        sort: SortBy,
    ) -> Result<PageResult, NewsError> {
        let t0 = Instant::now();
        let parsed = self.fetch_articles(url, tag, sort).await?;

        let total_results = parsed
            .total_results
            .unwrap_or(parsed.articles.len() as u64);
        let total_pages = parsed
            .total_pages
            .unwrap_or_else(|| pages_for(total_results, u64::from(self.page_size)));
        let result = PageResult {
            articles: parsed.articles,
            total_results,
            page,
            total_pages,
            query: query.map(str::to_string),
        };

        info!(
            count = result.articles.len(),
            total_results = result.total_results,
            page = result.page,
            total_pages = result.total_pages,
            elapsed_ms = t0.elapsed().as_millis(),
            "Fetched page"
        );
        Ok(result)
    }

    async fn fetch_set(
        &self,
        url: &Url,
        tag: &str,
        query: Option<&str>,
        sort: SortBy,
    ) -> Result<PageResult, NewsError> {
        let t0 = Instant::now();
        let articles = self.fetch_articles(url, tag, sort).await?.articles;

        let total_results = articles.len() as u64;
        let set = PageResult {
            articles,
            total_results,
            page: 1,
            total_pages: pages_for(total_results, u64::from(self.page_size)),
            query: query.map(str::to_string),
        };

        info!(
            total_results = set.total_results,
            total_pages = set.total_pages,
            elapsed_ms = t0.elapsed().as_millis(),
            "Fetched result set"
        );
        Ok(set)
    }
}

/// Trim `query` and check its length.
pub fn validate_query(query: &str) -> Result<&str, NewsError> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        return Err(NewsError::InvalidQuery { min: MIN_QUERY_LEN });
    }
    Ok(trimmed)
}

/// Keep the first article for each URL, preserving order.
pub fn dedupe_by_url(articles: Vec<Article>) -> Vec<Article> {
    articles
        .into_iter()
        .unique_by(|a| a.url.clone())
        .collect()
}

fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

fn pages_for(total: u64, page_size: u64) -> u32 {
    u32::try_from(total.div_ceil(page_size.max(1))).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderKind;
    use crate::providers::newsapi::NewsApi;
    use crate::providers::newsdata::NewsData;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Replays canned results and counts calls.
    #[derive(Debug, Default)]
    struct ScriptedFetcher {
        responses: RefCell<VecDeque<Result<Value, NewsError>>>,
        calls: Cell<usize>,
    }

    impl ScriptedFetcher {
        fn new(responses: Vec<Result<Value, NewsError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                calls: Cell::new(0),
            }
        }
    }

    impl FetchJson for ScriptedFetcher {
        async fn fetch(&self, _url: &Url) -> Result<Value, NewsError> {
            self.calls.set(self.calls.get() + 1);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(NewsError::Network("script exhausted".into())))
        }
    }

    fn newsapi_body(urls: &[&str], total: u64) -> Value {
        let articles: Vec<Value> = urls
            .iter()
            .enumerate()
            .map(|(i, u)| {
                json!({
                    "source": {"id": null, "name": "Example"},
                    "title": format!("Story {i}"),
                    "url": u,
                    "publishedAt": format!("2025-05-0{}T10:00:00Z", i + 1)
                })
            })
            .collect();
        json!({"status": "ok", "totalResults": total, "articles": articles})
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_from_network_errors() {
        let inner = ScriptedFetcher::new(vec![
            Err(NewsError::Network("reset".into())),
            Err(NewsError::Network("timeout".into())),
            Ok(json!({"ok": true})),
        ]);
        let fetcher = RetryFetch::new(inner, 3, StdDuration::from_secs(1));
        let url = Url::parse("https://example.com").unwrap();

        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, json!({"ok": true}));
        assert_eq!(fetcher.inner().calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_gives_up_after_bound() {
        let inner = ScriptedFetcher::new(Vec::new());
        let fetcher = RetryFetch::new(inner, 3, StdDuration::from_millis(10));
        let url = Url::parse("https://example.com").unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, NewsError::Network(_)));
        assert_eq!(fetcher.inner().calls.get(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_http_errors_are_not_retried() {
        let inner = ScriptedFetcher::new(vec![
            Err(NewsError::RateLimited),
            Ok(json!({"never": "reached"})),
        ]);
        let fetcher = RetryFetch::new(inner, 3, StdDuration::from_secs(1));
        let url = Url::parse("https://example.com").unwrap();

        assert_eq!(fetcher.fetch(&url).await.unwrap_err(), NewsError::RateLimited);
        assert_eq!(fetcher.inner().calls.get(), 1);
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let fetcher = RetryFetch::new(ScriptedFetcher::default(), 5, StdDuration::from_secs(1))
            .with_max_delay(StdDuration::from_secs(3));
        let first = fetcher.backoff(1);
        let second = fetcher.backoff(2);
        let capped = fetcher.backoff(10);
        assert!(first >= StdDuration::from_secs(1) && first <= StdDuration::from_millis(1250));
        assert!(second >= StdDuration::from_secs(2) && second <= StdDuration::from_millis(2250));
        assert!(capped >= StdDuration::from_secs(3) && capped <= StdDuration::from_millis(3250));
    }

    #[tokio::test]
    async fn test_short_query_never_hits_network() {
        let client = NewsClient::new(
            ScriptedFetcher::default(),
            ProviderKind::NewsApi.build("k", None),
            10,
        );
        for q in ["", " ", "a", "  b  "] {
            let err = client.search(q, 1, SortBy::PublishedAt).await.unwrap_err();
            assert_eq!(err, NewsError::InvalidQuery { min: MIN_QUERY_LEN });
        }
        assert_eq!(client.fetcher.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_headlines_dedupe_and_paginate() {
        let body = newsapi_body(
            &["https://e.com/1", "https://e.com/2", "https://e.com/1"],
            25,
        );
        let client = NewsClient::new(
            ScriptedFetcher::new(vec![Ok(body)]),
            Box::new(NewsApi::new("k".into())),
            10,
        );

        let page = client
            .fetch_headlines(Category::Science, 2, SortBy::PublishedAt)
            .await
            .unwrap();
        assert_eq!(page.articles.len(), 2);
        assert_eq!(page.total_results, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
        // newest first
        assert_eq!(page.articles[0].url, "https://e.com/2");
        assert!(page.articles.iter().all(|a| a.category == "science"));
    }

    #[tokio::test]
    async fn test_relevance_keeps_provider_order() {
        let body = newsapi_body(&["https://e.com/1", "https://e.com/2", "https://e.com/3"], 3);
        let client = NewsClient::new(
            ScriptedFetcher::new(vec![Ok(body)]),
            Box::new(NewsApi::new("k".into())),
            10,
        );

        let page = client.search("mars", 1, SortBy::Relevance).await.unwrap();
        let urls: Vec<_> = page.articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, ["https://e.com/1", "https://e.com/2", "https://e.com/3"]);
    }

    fn newsdata_body(count: usize) -> Value {
        let results: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "title": format!("T{i}"),
                    "link": format!("https://d.com/{i}"),
                    "pubDate": format!("2025-05-0{} 09:00:00", i + 1)
                })
            })
            .collect();
        json!({"status": "success", "totalResults": count, "results": results})
    }

    #[tokio::test]
    async fn test_result_set_is_fetched_once_and_sliced() {
        let client = NewsClient::new(
            ScriptedFetcher::new(vec![Ok(newsdata_body(5))]),
            Box::new(NewsData::new("k".into())),
            2,
        );
        assert_eq!(client.pagination(), Pagination::Client);

        let set = client
            .fetch_headlines_set(Category::Science, SortBy::PublishedAt)
            .await
            .unwrap();
        assert_eq!(set.articles.len(), 5);
        assert_eq!(set.total_pages, 3);

        let pages: Vec<PageResult> = (1..=3).map(|n| client.slice_page(&set, n)).collect();
        assert_eq!(client.fetcher.calls.get(), 1);
        assert_eq!(pages[0].articles[0].url, "https://d.com/4");
        assert_eq!(pages[1].page, 2);
        assert_eq!(pages[2].articles.len(), 1);
        let seen: Vec<_> = pages
            .iter()
            .flat_map(|p| p.articles.iter().map(|a| a.url.clone()))
            .collect();
        assert_eq!(seen.len(), 5);
        assert!(seen.iter().all_unique());
    }

    #[tokio::test]
    async fn test_client_side_pagination_slices_results() {
        let body = newsdata_body(5);
        let client = NewsClient::new(
            ScriptedFetcher::new(vec![Ok(body)]),
            Box::new(NewsData::new("k".into())),
            2,
        );

        let page = client.search("  mars ", 3, SortBy::PublishedAt).await.unwrap();
        assert_eq!(page.total_results, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.articles.len(), 1);
        assert_eq!(page.articles[0].url, "https://d.com/0");
        assert_eq!(page.query.as_deref(), Some("mars"));
    }

    #[test]
    fn test_pages_for() {
        assert_eq!(pages_for(0, 10), 0);
        assert_eq!(pages_for(10, 10), 1);
        assert_eq!(pages_for(11, 10), 2);
    }

    mod http {
        use super::*;
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        fn client_for(server: &MockServer) -> NewsClient<RetryFetch<HttpFetcher>> {
            let http = HttpFetcher::new(StdDuration::from_secs(5), "SECRET").unwrap();
            NewsClient::new(
                RetryFetch::new(http, 3, StdDuration::from_millis(1)),
                Box::new(NewsApi::new("SECRET".into()).with_base_url(&server.uri())),
                10,
            )
        }

        #[tokio::test]
        async fn test_ok_response_is_parsed() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/top-headlines"))
                .and(query_param("category", "business"))
                .and(query_param("apiKey", "SECRET"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(newsapi_body(&["https://e.com/a"], 1)),
                )
                .expect(1)
                .mount(&server)
                .await;

            let page = client_for(&server)
                .fetch_headlines(Category::Business, 1, SortBy::PublishedAt)
                .await
                .unwrap();
            assert_eq!(page.articles.len(), 1);
            assert_eq!(page.total_pages, 1);
        }

        #[tokio::test]
        async fn test_status_codes_map_without_retry() {
            for (status, expected) in [
                (400, NewsError::BadRequest),
                (401, NewsError::Unauthorized { status: 401 }),
                (429, NewsError::RateLimited),
                (503, NewsError::ServerError { status: 503 }),
            ] {
                let server = MockServer::start().await;
                Mock::given(method("GET"))
                    .respond_with(ResponseTemplate::new(status))
                    .expect(1)
                    .mount(&server)
                    .await;

                let err = client_for(&server)
                    .search("rust", 1, SortBy::PublishedAt)
                    .await
                    .unwrap_err();
                assert_eq!(err, expected);
            }
        }

        #[tokio::test]
        async fn test_malformed_body_is_decode_error() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_string("{\"status\": nope}"))
                .expect(1)
                .mount(&server)
                .await;

            let err = client_for(&server)
                .fetch_headlines(Category::General, 1, SortBy::PublishedAt)
                .await
                .unwrap_err();
            assert!(matches!(err, NewsError::Decode(_)));
        }
    }
}

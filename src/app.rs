//! The reader: command handlers over the client, the stores and the view
//! state.
//!
//! Every handler derives the next [`ViewState`] from the current one and
//! installs it with a single [`StateStore::replace`], so subscribers (the
//! terminal renderer in `main`) see exactly one new screen per action.
//!
//! Loading is cache-first: a fresh cached page is used as-is, otherwise the
//! page is fetched and, when non-empty, written back to the cache. For
//! providers that return one result set per call, the whole set is cached
//! and held in memory, and pages are sliced from it locally. Requests run
//! one at a time in the order commands arrive.

use crate::api::{FetchJson, NewsClient, validate_query};
use crate::cli::{BookmarkAction, Command as CliCommand};
use crate::error::NewsError;
use crate::events::{self, Command, Debouncer, SearchInput, SearchIntent, parse_command};
use crate::models::{Bookmark, Category, PageResult, SortBy};
use crate::providers::Pagination;
use crate::render::render_view;
use crate::state::{StateStore, SubscriptionId, ViewMode, ViewState};
use crate::store::{BookmarkStore, ResultCache};
use crate::undo::UndoSlot;
use chrono::Utc;
use std::io::Write;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, instrument, warn};

pub struct App<F> {
    client: NewsClient<F>,
    bookmarks: BookmarkStore,
    cache: ResultCache,
    undo: UndoSlot,
    state: StateStore,
    search_input: SearchInput,
    /// Whole result set being paged through, with its cache key.
    result_set: Option<(String, PageResult)>,
}

impl<F> std::fmt::Debug for App<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("bookmarks", &self.bookmarks)
            .field("cache", &self.cache)
            .field("undo", &self.undo)
            .field("state", &self.state)
            .finish()
    }
}

impl<F> App<F>
where
    F: FetchJson,
{
    pub fn new(
        client: NewsClient<F>,
        bookmarks: BookmarkStore,
        cache: ResultCache,
        undo_window: Duration,
    ) -> Self {
        let initial = ViewState {
            bookmarks: bookmarks.list().to_vec(),
            ..ViewState::default()
        };
        Self {
            client,
            bookmarks,
            cache,
            undo: UndoSlot::new(undo_window),
            state: StateStore::new(initial),
            search_input: SearchInput::default(),
            result_set: None,
        }
    }

    /// Start with results ordered by `sort`.
    pub fn with_sort(mut self, sort: SortBy) -> Self {
        let mut initial = self.state.get().clone();
        initial.sort = sort;
        self.state.replace(initial);
        self
    }

    pub fn state(&self) -> &ViewState {
        self.state.get()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&ViewState) + 'static) -> SubscriptionId {
        self.state.subscribe(listener)
    }

    /// Current state with the previous action's notice dropped.
    fn next_state(&self) -> ViewState {
        let mut next = self.state.get().clone();
        next.notice = None;
        next.bookmarks = self.bookmarks.list().to_vec();
        next
    }

    /// Cache key for the page `state` describes, or for its whole result
    /// set when the provider pages locally.
    fn cache_key(&self, state: &ViewState) -> String {
        let provider = self.client.provider_name();
        let page = match self.client.pagination() {
            Pagination::Server => Some(state.page),
            Pagination::Client => None,
        };
        if state.is_searching() {
            ResultCache::search_key(provider, &state.query, state.sort, page)
        } else {
            ResultCache::headlines_key(provider, state.category, state.sort, page)
        }
    }

    /// Fill `next` with the page it describes and install it.
    ///
    /// On failure the results are emptied and the error's user message is
    /// shown; the error is also returned for one-shot callers.
    #[instrument(level = "debug", skip_all, fields(category = %next.category, query = %next.query, page = next.page))]
    async fn load_into(&mut self, mut next: ViewState) -> Result<(), NewsError> {
        next.mode = ViewMode::Browsing;
        let key = self.cache_key(&next);

        let result = match self.client.pagination() {
            Pagination::Server => self.load_page(&key, &next).await,
            Pagination::Client => self.load_from_set(&key, &next).await,
        };

        let outcome = match result {
            Ok(page) => {
                next.page = page.page.max(1);
                next.total_pages = page.total_pages;
                next.results = page.articles;
                next.error = None;
                next.last_fetch = Some(Utc::now());
                Ok(())
            }
            Err(e) => {
                warn!(code = e.code(), error = %e, "Loading articles failed");
                next.results.clear();
                next.total_pages = 0;
                next.error = Some(e.user_message());
                Err(e)
            }
        };
        self.state.replace(next);
        outcome
    }

    /// One page from the cache or the provider.
    async fn load_page(&self, key: &str, next: &ViewState) -> Result<PageResult, NewsError> {
        if let Some(page) = self.cache.get(key) {
            return Ok(page);
        }
        let fetched = if next.is_searching() {
            self.client.search(&next.query, next.page, next.sort).await
        } else {
            self.client
                .fetch_headlines(next.category, next.page, next.sort)
                .await
        };
        if let Ok(page) = &fetched {
            self.cache.put(key, page);
        }
        fetched
    }

    /// One page sliced from the whole result set behind `key`. The set
    /// comes from memory, then the cache, then a single provider call.
    async fn load_from_set(
        &mut self,
        key: &str,
        next: &ViewState,
    ) -> Result<PageResult, NewsError> {
        if let Some((held, set)) = &self.result_set {
            if held == key {
                debug!(key, "Paging through held result set");
                return Ok(self.client.slice_page(set, next.page));
            }
        }
        let set = match self.cache.get(key) {
            Some(set) => set,
            None => {
                let set = if next.is_searching() {
                    self.client.search_set(&next.query, next.sort).await?
                } else {
                    self.client
                        .fetch_headlines_set(next.category, next.sort)
                        .await?
                };
                self.cache.put(key, &set);
                set
            }
        };
        let page = self.client.slice_page(&set, next.page);
        self.result_set = Some((key.to_string(), set));
        Ok(page)
    }

    /// Reload the current view.
    pub async fn load(&mut self) -> Result<(), NewsError> {
        let next = self.next_state();
        self.load_into(next).await
    }

    /// Reload the current view, skipping the cache.
    pub async fn refresh(&mut self) -> Result<(), NewsError> {
        let next = self.next_state();
        let key = self.cache_key(&next);
        self.cache.clear_entry(&key);
        self.result_set = None;
        self.load_into(next).await
    }

    /// Switch category: search cleared, back to page 1.
    pub async fn change_category(&mut self, category: Category) -> Result<(), NewsError> {
        info!(%category, "Changing category");
        self.search_input.reset();
        self.show_headlines(category, 1).await
    }

    /// Headlines for `category` at `page`, search cleared.
    pub async fn show_headlines(&mut self, category: Category, page: u32) -> Result<(), NewsError> {
        let mut next = self.next_state();
        next.category = category;
        next.query.clear();
        next.page = page.max(1);
        self.load_into(next).await
    }

    /// Search from page 1.
    pub async fn search(&mut self, query: &str) -> Result<(), NewsError> {
        self.search_page(query, 1).await
    }

    /// Search at `page`. Queries shorter than two characters are rejected
    /// before any request and leave the current results alone.
    pub async fn search_page(&mut self, query: &str, page: u32) -> Result<(), NewsError> {
        let query = match validate_query(query) {
            Ok(q) => q.to_string(),
            Err(e) => {
                let message = e.user_message();
                let mut next = self.next_state();
                next.error = Some(message);
                self.state.replace(next);
                return Err(e);
            }
        };
        info!(%query, "Searching");
        let mut next = self.next_state();
        next.query = query;
        next.page = page.max(1);
        self.load_into(next).await
    }

    /// Back to category browsing at page 1.
    pub async fn clear_search(&mut self) -> Result<(), NewsError> {
        self.search_input.reset();
        let mut next = self.next_state();
        next.query.clear();
        next.page = 1;
        self.load_into(next).await
    }

    /// Reorder the current view and go back to page 1.
    pub async fn change_sort(&mut self, sort: SortBy) -> Result<(), NewsError> {
        info!(%sort, "Changing sort order");
        let mut next = self.next_state();
        next.sort = sort;
        next.page = 1;
        self.load_into(next).await
    }

    /// General headlines, page 1, no search.
    pub async fn home(&mut self) -> Result<(), NewsError> {
        self.change_category(Category::General).await
    }

    /// Advance one page. Returns `false` without loading on the last page.
    pub async fn next_page(&mut self) -> Result<bool, NewsError> {
        if !self.state.get().has_next() {
            debug!("Already on the last page");
            return Ok(false);
        }
        let mut next = self.next_state();
        next.page += 1;
        self.load_into(next).await.map(|()| true)
    }

    /// Go back one page. Returns `false` without loading on page 1.
    pub async fn previous_page(&mut self) -> Result<bool, NewsError> {
        if !self.state.get().has_previous() {
            debug!("Already on the first page");
            return Ok(false);
        }
        let mut next = self.next_state();
        next.page -= 1;
        self.load_into(next).await.map(|()| true)
    }

    /// Bookmark or un-bookmark the card numbered `index` (1-based) in the
    /// current view.
    pub fn toggle_bookmark(&mut self, index: usize) {
        let state = self.state.get();
        let article = match state.mode {
            ViewMode::Browsing => index
                .checked_sub(1)
                .and_then(|i| state.results.get(i))
                .cloned(),
            ViewMode::Bookmarks => index
                .checked_sub(1)
                .and_then(|i| state.bookmarks.get(i))
                .map(|b| b.article.clone()),
        };
        let Some(article) = article else {
            let mut next = self.next_state();
            next.notice = Some(format!("There is no card {index}"));
            self.state.replace(next);
            return;
        };

        if self.bookmarks.contains(&article.id) {
            self.remove_bookmark(&article.id);
        } else {
            self.bookmarks.create(&article);
            self.undo.discard(&article.id);
            let mut next = self.next_state();
            next.notice = Some(format!("Saved \"{}\"", article.title));
            self.state.replace(next);
        }
    }

    /// Delete a bookmark and make it the pending undo.
    pub fn remove_bookmark(&mut self, id: &str) -> Option<Bookmark> {
        let position = self.bookmarks.position(id);
        let removed = self.bookmarks.delete(id)?;
        self.undo.record(removed.clone(), position);

        let mut next = self.next_state();
        next.notice = Some(format!(
            "Removed \"{}\". Type 'undo' within {}s to restore it.",
            removed.article.title,
            self.undo.window().as_secs()
        ));
        self.state.replace(next);
        Some(removed)
    }

    /// Restore the most recent deletion if its window is still open.
    pub fn undo(&mut self) -> Option<Bookmark> {
        debug!(remaining = ?self.undo.remaining(), "Undo requested");
        let restored = match self.undo.take() {
            Some(pending) if self.bookmarks.contains(&pending.bookmark.id) => {
                debug!(id = %pending.bookmark.id, "Already bookmarked again; nothing to restore");
                None
            }
            Some(pending) => Some(self.bookmarks.restore(pending.bookmark, pending.position)),
            None => None,
        };

        let mut next = self.next_state();
        next.notice = Some(match &restored {
            Some(b) => format!("Restored \"{}\"", b.article.title),
            None => "Nothing to undo".to_string(),
        });
        self.state.replace(next);
        restored
    }

    pub fn view_bookmarks(&mut self) {
        let mut next = self.next_state();
        next.mode = ViewMode::Bookmarks;
        self.state.replace(next);
    }

    /// Leave the bookmark view. Results already loaded are shown again.
    pub fn back_to_news(&mut self) {
        let mut next = self.next_state();
        next.mode = ViewMode::Browsing;
        self.state.replace(next);
    }

    fn show_notice(&mut self, notice: impl Into<String>) {
        let mut next = self.next_state();
        next.notice = Some(notice.into());
        self.state.replace(next);
    }

    /// Act on classified search text. Submissions go out immediately.
    async fn apply_search_intent(&mut self, intent: SearchIntent, raw: &str) -> Result<(), NewsError> {
        match intent {
            SearchIntent::Submit(query) => self.search(&query).await,
            SearchIntent::Clear => self.clear_search().await,
            SearchIntent::Ignore => {
                if !raw.trim().is_empty() {
                    self.show_notice("Type at least 2 characters to search");
                }
                Ok(())
            }
        }
    }

    /// Run one interactive command. Breaks on `quit`.
    pub async fn dispatch(&mut self, command: Command) -> ControlFlow<()> {
        debug!(?command, "Dispatching");
        let outcome = match command {
            Command::Category(category) => self.change_category(category).await,
            Command::Search(text) => {
                let intent = self.search_input.classify(&text);
                self.apply_search_intent(intent, &text).await
            }
            Command::ClearSearch => self.clear_search().await,
            Command::Next => self.next_page().await.map(drop),
            Command::Previous => self.previous_page().await.map(drop),
            Command::ToggleBookmark(index) => {
                self.toggle_bookmark(index);
                Ok(())
            }
            Command::Sort(sort) => self.change_sort(sort).await,
            Command::Undo => {
                self.undo();
                Ok(())
            }
            Command::ShowBookmarks => {
                self.view_bookmarks();
                Ok(())
            }
            Command::Back => {
                self.back_to_news();
                Ok(())
            }
            Command::Home => self.home().await,
            Command::Refresh => self.refresh().await,
            Command::Help => {
                self.show_notice(events::HELP);
                Ok(())
            }
            Command::Quit => return ControlFlow::Break(()),
        };
        if let Err(e) = outcome {
            debug!(code = e.code(), "Command ended with an error");
        }
        ControlFlow::Continue(())
    }

    /// Read commands from `input` until `quit` or end of input.
    ///
    /// Search submissions are debounced by `debounce`; every other command
    /// runs as soon as its line arrives. A search still pending when input
    /// ends is sent before returning.
    pub async fn run_interactive<R>(&mut self, input: R, debounce: Duration) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut debouncer: Debouncer<String> = Debouncer::new(debounce);

        if let Err(e) = self.load().await {
            debug!(code = e.code(), "Initial load failed");
        }

        loop {
            prompt();
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("End of input");
                        if let Some(query) = debouncer.cancel() {
                            let _ = self.search(&query).await;
                        }
                        break;
                    };
                    match parse_command(&line) {
                        Ok(None) => {}
                        Ok(Some(Command::Search(text))) => match self.search_input.classify(&text) {
                            SearchIntent::Submit(query) => {
                                debug!(%query, "Search queued");
                                debouncer.push(query);
                            }
                            intent => {
                                if intent == SearchIntent::Clear {
                                    debouncer.cancel();
                                }
                                let _ = self.apply_search_intent(intent, &text).await;
                            }
                        },
                        Ok(Some(command)) => {
                            if matches!(command, Command::Category(_) | Command::Home | Command::ClearSearch) {
                                debouncer.cancel();
                            }
                            if self.dispatch(command).await.is_break() {
                                break;
                            }
                        }
                        Err(e) => self.show_notice(e.to_string()),
                    }
                }
                query = debouncer.ready() => {
                    let _ = self.search(&query).await;
                }
            }
        }
        info!("Leaving interactive mode");
        Ok(())
    }

    /// Run a one-shot CLI command and return what to print.
    pub async fn run_command(&mut self, command: CliCommand) -> Result<String, NewsError> {
        match command {
            CliCommand::Headlines { category, page } => {
                self.show_headlines(category, page).await?;
            }
            CliCommand::Search { query, page } => {
                self.search_page(&query, page).await?;
            }
            CliCommand::Bookmarks {
                action: BookmarkAction::List,
            } => {
                self.view_bookmarks();
            }
            CliCommand::Bookmarks {
                action: BookmarkAction::Remove { id },
            } => {
                return Ok(match self.remove_bookmark(&id) {
                    Some(b) => format!("Removed \"{}\"\n", b.article.title),
                    None => format!("No bookmark with id {id}\n"),
                });
            }
            CliCommand::ClearCache => {
                let removed = self.cache.clear();
                self.result_set = None;
                info!(removed, "Cleared cache");
                return Ok(format!("Removed {removed} cached page(s)\n"));
            }
        }
        let mut screen = self.state.get().clone();
        screen.notice = None;
        Ok(render_view(&screen, Utc::now()))
    }
}

fn prompt() {
    let mut out = std::io::stdout();
    let _ = write!(out, "> ");
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderKind;
    use crate::store::{KeyValueStore, MemoryStore};
    use serde_json::{Value, json};
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;
    use url::Url;

    /// Replays canned bodies and records requested URLs.
    #[derive(Debug, Default)]
    struct FakeFetcher {
        responses: RefCell<VecDeque<Result<Value, NewsError>>>,
        urls: RefCell<Vec<Url>>,
        calls: Cell<usize>,
    }

    impl FetchJson for Rc<FakeFetcher> {
        async fn fetch(&self, url: &Url) -> Result<Value, NewsError> {
            self.calls.set(self.calls.get() + 1);
            self.urls.borrow_mut().push(url.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(body(&[], 0)))
        }
    }

    fn body(urls: &[&str], total: u64) -> Value {
        let articles: Vec<Value> = urls
            .iter()
            .map(|u| json!({"source": {"name": "Wire"}, "title": format!("About {u}"), "url": u}))
            .collect();
        json!({"status": "ok", "totalResults": total, "articles": articles})
    }

    /// NewsData shape: one result set, dated so newest-first is reversed.
    fn set_body(count: usize) -> Value {
        let results: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "title": format!("Item {i}"),
                    "link": format!("https://d.com/{i}"),
                    "pubDate": format!("2025-05-0{} 09:00:00", i + 1)
                })
            })
            .collect();
        json!({"status": "success", "totalResults": count, "results": results})
    }

    fn app_for(
        provider: ProviderKind,
        responses: Vec<Result<Value, NewsError>>,
        cache_enabled: bool,
        undo_window: Duration,
    ) -> (App<Rc<FakeFetcher>>, Rc<FakeFetcher>, Rc<MemoryStore>) {
        let fetcher = Rc::new(FakeFetcher {
            responses: RefCell::new(responses.into()),
            ..FakeFetcher::default()
        });
        let kv = Rc::new(MemoryStore::default());
        let shared: Rc<dyn KeyValueStore> = kv.clone();
        let client = NewsClient::new(Rc::clone(&fetcher), provider.build("KEY", None), 2);
        let app = App::new(
            client,
            BookmarkStore::load(Rc::clone(&shared)),
            ResultCache::new(shared, Duration::from_secs(900), cache_enabled),
            undo_window,
        );
        (app, fetcher, kv)
    }

    fn app_with(
        responses: Vec<Result<Value, NewsError>>,
        undo_window: Duration,
    ) -> (App<Rc<FakeFetcher>>, Rc<FakeFetcher>, Rc<MemoryStore>) {
        app_for(ProviderKind::NewsApi, responses, true, undo_window)
    }

    #[tokio::test]
    async fn test_category_change_resets_search_and_page() {
        let (mut app, fetcher, _) = app_with(
            vec![
                Ok(body(&["https://e.com/s1"], 6)),
                Ok(body(&["https://e.com/s2"], 6)),
                Ok(body(&["https://e.com/b1"], 1)),
            ],
            Duration::from_secs(5),
        );
        app.search("mars").await.unwrap();
        assert!(app.next_page().await.unwrap());
        assert_eq!(app.state().page, 2);

        app.change_category(Category::Business).await.unwrap();
        let state = app.state();
        assert_eq!(state.category, Category::Business);
        assert_eq!(state.page, 1);
        assert!(!state.is_searching());
        assert_eq!(state.results[0].url, "https://e.com/b1");
        assert!(fetcher.urls.borrow()[2].as_str().contains("category=business"));
    }

    #[tokio::test]
    async fn test_short_search_makes_no_request() {
        let (mut app, fetcher, _) = app_with(Vec::new(), Duration::from_secs(5));
        let err = app.search(" a ").await.unwrap_err();
        assert!(matches!(err, NewsError::InvalidQuery { .. }));
        assert_eq!(fetcher.calls.get(), 0);
        assert!(app.state().error.is_some());
        assert!(!app.state().is_searching());
    }

    #[tokio::test]
    async fn test_second_load_is_served_from_cache() {
        let (mut app, fetcher, kv) = app_with(
            vec![Ok(body(&["https://e.com/1"], 1))],
            Duration::from_secs(5),
        );
        app.load().await.unwrap();
        app.load().await.unwrap();
        assert_eq!(fetcher.calls.get(), 1);
        assert_eq!(app.state().results.len(), 1);
        assert!(kv.keys().unwrap().iter().any(|k| k == "news_cache_newsapi_general_published_1"));
    }

    #[tokio::test]
    async fn test_sort_change_goes_to_page_one_and_is_sent() {
        let (mut app, fetcher, _) = app_with(
            vec![
                Ok(body(&["https://e.com/p1"], 6)),
                Ok(body(&["https://e.com/p2"], 6)),
                Ok(body(&["https://e.com/r1"], 6)),
            ],
            Duration::from_secs(5),
        );
        app.search("mars").await.unwrap();
        assert!(app.next_page().await.unwrap());

        app.change_sort(SortBy::Relevance).await.unwrap();
        let state = app.state();
        assert_eq!(state.sort, SortBy::Relevance);
        assert_eq!(state.page, 1);
        assert_eq!(state.query, "mars");
        assert_eq!(state.results[0].url, "https://e.com/r1");
        assert_eq!(fetcher.calls.get(), 3);
        assert!(fetcher.urls.borrow()[2].as_str().contains("sortBy=relevancy"));

        // the newest-first page 1 is still cached under its own key
        app.change_sort(SortBy::PublishedAt).await.unwrap();
        assert_eq!(fetcher.calls.get(), 3);
        assert_eq!(app.state().results[0].url, "https://e.com/p1");
    }

    #[tokio::test]
    async fn test_with_sort_sets_initial_order() {
        let (app, fetcher, _) = app_with(Vec::new(), Duration::from_secs(5));
        let mut app = app.with_sort(SortBy::Relevance);
        app.search("mars").await.unwrap();
        assert!(fetcher.urls.borrow()[0].as_str().contains("sortBy=relevancy"));
    }

    #[tokio::test]
    async fn test_client_paged_provider_fetches_set_once() {
        let (mut app, fetcher, kv) = app_for(
            ProviderKind::NewsData,
            vec![Ok(set_body(5)), Ok(set_body(5))],
            true,
            Duration::from_secs(5),
        );
        app.load().await.unwrap();
        assert_eq!(app.state().total_pages, 3);
        let mut seen: Vec<String> = app.state().results.iter().map(|a| a.url.clone()).collect();

        while app.next_page().await.unwrap() {
            seen.extend(app.state().results.iter().map(|a| a.url.clone()));
        }
        assert_eq!(app.state().page, 3);
        assert_eq!(fetcher.calls.get(), 1);
        assert_eq!(seen.len(), 5);
        assert_eq!(seen[0], "https://d.com/4");
        assert!(
            kv.keys()
                .unwrap()
                .contains(&"news_cache_newsdata_general_published_all".to_string())
        );

        app.refresh().await.unwrap();
        assert_eq!(fetcher.calls.get(), 2);
        assert_eq!(app.state().page, 3);
    }

    #[tokio::test]
    async fn test_client_paged_set_is_held_without_cache() {
        let (mut app, fetcher, kv) = app_for(
            ProviderKind::NewsData,
            vec![Ok(set_body(4))],
            false,
            Duration::from_secs(5),
        );
        app.load().await.unwrap();
        assert!(app.next_page().await.unwrap());
        assert!(app.previous_page().await.unwrap());
        assert_eq!(fetcher.calls.get(), 1);
        assert!(kv.keys().unwrap().is_empty());

        app.change_category(Category::Science).await.unwrap();
        assert_eq!(fetcher.calls.get(), 2);
    }

    #[tokio::test]
    async fn test_refresh_bypasses_cache() {
        let (mut app, fetcher, _) = app_with(
            vec![
                Ok(body(&["https://e.com/old"], 1)),
                Ok(body(&["https://e.com/new"], 1)),
            ],
            Duration::from_secs(5),
        );
        app.load().await.unwrap();
        app.refresh().await.unwrap();
        assert_eq!(fetcher.calls.get(), 2);
        assert_eq!(app.state().results[0].url, "https://e.com/new");
    }

    #[tokio::test]
    async fn test_error_clears_results_and_shows_message() {
        let (mut app, _, _) = app_with(
            vec![Ok(body(&["https://e.com/1"], 4)), Err(NewsError::RateLimited)],
            Duration::from_secs(5),
        );
        app.load().await.unwrap();
        assert!(app.next_page().await.is_err());
        let state = app.state();
        assert!(state.results.is_empty());
        assert_eq!(state.total_pages, 0);
        assert_eq!(
            state.error.as_deref(),
            Some("Rate limit exceeded. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_page_bounds() {
        let (mut app, fetcher, _) = app_with(
            vec![Ok(body(&["https://e.com/1"], 2))],
            Duration::from_secs(5),
        );
        app.load().await.unwrap();
        assert!(!app.previous_page().await.unwrap());
        assert!(!app.next_page().await.unwrap());
        assert_eq!(fetcher.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_undo_restores_exact_record() {
        let (mut app, _, _) = app_with(
            vec![Ok(body(&["https://e.com/1", "https://e.com/2"], 2))],
            Duration::from_secs(5),
        );
        app.load().await.unwrap();
        app.toggle_bookmark(1);
        app.toggle_bookmark(2);
        let before = app.state().bookmarks.clone();
        assert_eq!(before.len(), 2);

        app.toggle_bookmark(1);
        assert_eq!(app.state().bookmarks.len(), 1);
        assert!(app.state().notice.as_deref().unwrap().contains("undo"));

        let restored = app.undo().unwrap();
        assert_eq!(restored, before[0]);
        assert_eq!(app.state().bookmarks, before);
    }

    #[tokio::test]
    async fn test_undo_after_window_does_nothing() {
        let (mut app, _, _) = app_with(
            vec![Ok(body(&["https://e.com/1"], 1))],
            Duration::from_millis(1),
        );
        app.load().await.unwrap();
        app.toggle_bookmark(1);
        app.toggle_bookmark(1);
        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(app.undo(), None);
        assert!(app.state().bookmarks.is_empty());
        assert_eq!(app.state().notice.as_deref(), Some("Nothing to undo"));
    }

    #[tokio::test]
    async fn test_undo_after_rebookmark_restores_nothing() {
        let (mut app, _, _) = app_with(
            vec![Ok(body(&["https://e.com/1"], 1))],
            Duration::from_secs(5),
        );
        app.load().await.unwrap();
        app.toggle_bookmark(1);
        app.toggle_bookmark(1);
        assert!(app.state().bookmarks.is_empty());

        app.toggle_bookmark(1);
        let saved = app.state().bookmarks.clone();
        assert_eq!(saved.len(), 1);

        assert_eq!(app.undo(), None);
        assert_eq!(app.state().notice.as_deref(), Some("Nothing to undo"));
        assert_eq!(app.state().bookmarks, saved);
    }

    #[tokio::test]
    async fn test_bookmarks_view_toggles_saved_items() {
        let (mut app, _, kv) = app_with(
            vec![Ok(body(&["https://e.com/1"], 1))],
            Duration::from_secs(5),
        );
        app.load().await.unwrap();
        app.toggle_bookmark(1);
        assert!(kv.get("news_bookmarks").unwrap().is_some());

        app.view_bookmarks();
        assert_eq!(app.state().mode, ViewMode::Bookmarks);
        app.toggle_bookmark(1);
        assert!(app.state().bookmarks.is_empty());

        app.back_to_news();
        assert_eq!(app.state().mode, ViewMode::Browsing);
        assert_eq!(app.state().results.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_card_number_is_reported() {
        let (mut app, _, _) = app_with(Vec::new(), Duration::from_secs(5));
        app.toggle_bookmark(7);
        assert_eq!(app.state().notice.as_deref(), Some("There is no card 7"));
        assert!(app.state().bookmarks.is_empty());
    }

    #[tokio::test]
    async fn test_one_render_per_action() {
        let (mut app, _, _) = app_with(
            vec![Ok(body(&["https://e.com/1"], 1))],
            Duration::from_secs(5),
        );
        let renders = Rc::new(Cell::new(0));
        let counter = Rc::clone(&renders);
        app.subscribe(move |_| counter.set(counter.get() + 1));

        app.change_category(Category::Science).await.unwrap();
        app.toggle_bookmark(1);
        assert_eq!(renders.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interactive_debounces_searches() {
        let (mut app, fetcher, _) = app_with(Vec::new(), Duration::from_secs(5));
        let input: &[u8] = b"search ma\nsearch mars\n";

        app.run_interactive(input, Duration::from_millis(800))
            .await
            .unwrap();

        // initial load, then only the last search, sent when input ended
        assert_eq!(fetcher.calls.get(), 2);
        let urls = fetcher.urls.borrow();
        assert!(urls[1].as_str().contains("q=mars"));
        assert_eq!(app.state().query, "mars");
    }

    #[tokio::test(start_paused = true)]
    async fn test_interactive_commands_until_quit() {
        let (mut app, fetcher, _) = app_with(
            vec![
                Ok(body(&["https://e.com/1"], 1)),
                Ok(body(&["https://e.com/t"], 1)),
            ],
            Duration::from_secs(5),
        );
        let input: &[u8] = b"cat technology\nbm 1\nbogus\nquit\ncat sports\n";

        app.run_interactive(input, Duration::from_millis(800))
            .await
            .unwrap();

        assert_eq!(fetcher.calls.get(), 2);
        let state = app.state();
        assert_eq!(state.category, Category::Technology);
        assert_eq!(state.bookmarks.len(), 1);
        assert!(state.notice.as_deref().unwrap().starts_with("Unknown command"));
    }

    #[tokio::test]
    async fn test_run_command_outputs() {
        let (mut app, _, _) = app_with(
            vec![Ok(body(&["https://e.com/1"], 1))],
            Duration::from_secs(5),
        );
        let out = app
            .run_command(CliCommand::Headlines {
                category: Category::Health,
                page: 1,
            })
            .await
            .unwrap();
        assert!(out.starts_with("Top headlines · Health"));

        app.toggle_bookmark(1);
        let id = app.state().bookmarks[0].id.clone();
        let out = app
            .run_command(CliCommand::Bookmarks {
                action: BookmarkAction::List,
            })
            .await
            .unwrap();
        assert!(out.starts_with("Bookmarks (1)"));

        let out = app
            .run_command(CliCommand::Bookmarks {
                action: BookmarkAction::Remove { id: id.clone() },
            })
            .await
            .unwrap();
        assert!(out.starts_with("Removed"));

        let out = app.run_command(CliCommand::ClearCache).await.unwrap();
        assert_eq!(out, "Removed 1 cached page(s)\n");
    }

    #[tokio::test]
    async fn test_run_command_propagates_errors() {
        let (mut app, _, _) = app_with(vec![Err(NewsError::BadRequest)], Duration::from_secs(5));
        let err = app
            .run_command(CliCommand::Search {
                query: "rust".into(),
                page: 1,
            })
            .await
            .unwrap_err();
        assert_eq!(err, NewsError::BadRequest);
    }
}

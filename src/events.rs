//! Interactive input: command parsing and search debouncing.
//!
//! Each stdin line is parsed into a [`Command`]. Search text does not go
//! straight to the network; it is classified by [`SearchInput`] and then
//! held in a [`Debouncer`] so a burst of searches only sends the last one.

use crate::api::MIN_QUERY_LEN;
use crate::models::{Category, SortBy};
use std::future;
use thiserror::Error;
use tokio::time::{Duration, Instant, sleep_until};

/// Something the reader asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Category(Category),
    Search(String),
    ClearSearch,
    Next,
    Previous,
    /// Toggle the bookmark on the 1-based card number.
    ToggleBookmark(usize),
    /// Reorder results; back to page 1.
    Sort(SortBy),
    Undo,
    ShowBookmarks,
    Back,
    /// General headlines, no search, page 1.
    Home,
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for the list.")]
    Unknown(String),

    #[error("Unknown category '{0}'. Try one of: {list}", list = category_list())]
    UnknownCategory(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a card number")]
    BadIndex(String),

    #[error("Unknown sort order '{0}'. Try 'published' or 'relevance'.")]
    UnknownSort(String),
}

fn category_list() -> String {
    Category::ALL.map(Category::as_str).join(", ")
}

pub const HELP: &str = "\
Commands:
  cat <name>     show a category (general, business, technology, sports,
                 entertainment, health, science)
  search <text>  search all articles; 'search' alone clears the search
  clear          clear the search
  next, prev     move between pages
  bm <n>         bookmark or un-bookmark card n
  sort <order>   order results: published (newest first) or relevance
  undo           restore the last removed bookmark
  bookmarks      show saved articles
  back           return to the news
  home           general headlines, first page
  refresh        reload the current page
  help           this text
  quit           exit
";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "cat" | "category" | "c" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("cat"));
            }
            let category =
                Category::parse(rest).ok_or_else(|| CommandError::UnknownCategory(rest.into()))?;
            Command::Category(category)
        }
        "search" | "s" | "/" => Command::Search(rest.to_string()),
        "clear" => Command::ClearSearch,
        "next" | "n" => Command::Next,
        "prev" | "previous" | "p" => Command::Previous,
        "bm" | "bookmark" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("bm"));
            }
            match rest.parse::<usize>() {
                Ok(n) if n > 0 => Command::ToggleBookmark(n),
                _ => return Err(CommandError::BadIndex(rest.into())),
            }
        }
        "sort" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("sort"));
            }
            let sort = SortBy::parse(rest).ok_or_else(|| CommandError::UnknownSort(rest.into()))?;
            Command::Sort(sort)
        }
        "undo" | "u" => Command::Undo,
        "bookmarks" | "saved" => Command::ShowBookmarks,
        "back" | "b" => Command::Back,
        "home" => Command::Home,
        "refresh" | "r" => Command::Refresh,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// What a piece of search text should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIntent {
    /// Long enough to send; holds the trimmed text.
    Submit(String),
    /// Emptied while a search was active: go back to category browsing.
    Clear,
    /// Too short, or empty with nothing to clear.
    Ignore,
}

/// Tracks the last submitted search text so an emptied input can be told
/// apart from one that was never used.
#[derive(Debug, Default)]
pub struct SearchInput {
    last_query: String,
}

impl SearchInput {
    pub fn classify(&mut self, text: &str) -> SearchIntent {
        let query = text.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            if query.is_empty() && !self.last_query.is_empty() {
                self.last_query.clear();
                return SearchIntent::Clear;
            }
            return SearchIntent::Ignore;
        }
        self.last_query = query.to_string();
        SearchIntent::Submit(query.to_string())
    }

    /// Forget the active search, e.g. after a category change.
    pub fn reset(&mut self) {
        self.last_query.clear();
    }
}

/// Holds the latest value until no new one has arrived for `delay`.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiet period.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Resolve with the pending value once its quiet period has passed.
    /// Never resolves while nothing is pending.
    ///
    /// Cancel-safe: dropping the future before it resolves leaves the
    /// pending value in place, so this can sit in a `tokio::select!` loop.
    pub async fn ready(&mut self) -> T {
        let Some(deadline) = self.pending.as_ref().map(|(_, at)| *at) else {
            return future::pending().await;
        };
        sleep_until(deadline).await;
        match self.pending.take() {
            Some((value, _)) => value,
            None => future::pending().await,
        }
    }
}

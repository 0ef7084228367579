//! Text rendering of the view state.
//!
//! Everything here is a pure function of its inputs; the current time is
//! passed in so output is reproducible.
//!
//! # Submodules
//!
//! - [`cards`]: One card per article with bookmark marker and relative date
//! - [`pagination`]: Previous/next controls and their enabled state
//! - [`categories`]: The category filter bar
//!
//! # Screen Layout
//!
//! ```text
//! Top headlines · Technology (newest first)
//! [General]  Business  Technology  Sports …
//!
//! [1] ☆ Headline
//!     Source · Today
//!     Description
//!     https://…
//!
//! ← prev | Page 2 of 5 | next →
//! ```

pub mod cards;
pub mod categories;
pub mod pagination;

use crate::state::{ViewMode, ViewState};
use chrono::{DateTime, Utc};

/// The whole screen for `state`.
pub fn render_view(state: &ViewState, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    match state.mode {
        ViewMode::Bookmarks => {
            out.push_str(&format!("Bookmarks ({})\n\n", state.bookmarks.len()));
            let articles: Vec<_> = state.bookmarks.iter().map(|b| b.article.clone()).collect();
            out.push_str(&cards::render_articles(&articles, |_| true, now));
        }
        ViewMode::Browsing => {
            if state.is_searching() {
                out.push_str(&format!(
                    "Search results for \"{}\" ({})\n",
                    state.query,
                    state.sort.label()
                ));
            } else {
                out.push_str(&format!(
                    "Top headlines · {} ({})\n",
                    state.category.label(),
                    state.sort.label()
                ));
            }
            out.push_str(&categories::render_category_filters(state.category));
            out.push('\n');

            if let Some(error) = &state.error {
                out.push_str(&format!("! {error}\n\n"));
            }

            out.push_str(&cards::render_articles(
                &state.results,
                |id| state.is_bookmarked(id),
                now,
            ));

            let controls = pagination::render_pagination(state.page, state.total_pages);
            if !controls.is_empty() {
                out.push('\n');
                out.push_str(&controls);
            }
        }
    }

    if let Some(notice) = &state.notice {
        out.push('\n');
        out.push_str(notice);
        if !notice.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

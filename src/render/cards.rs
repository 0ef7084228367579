//! Article cards.

use crate::models::Article;
use chrono::{DateTime, Utc};

const DESCRIPTION_MAX: usize = 240;
const BOOKMARKED: char = '★';
const NOT_BOOKMARKED: char = '☆';

/// Human-friendly publication date relative to `now`.
///
/// - same day: `Today`
/// - one day: `Yesterday`
/// - under a week: `N days ago`
/// - otherwise: `May 6, 2025`
pub fn format_relative_date(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(published) = published else {
        return "Unknown date".to_string();
    };
    let days = (now - published).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{d} days ago"),
        _ => published.format("%b %-d, %Y").to_string(),
    }
}

/// One card. `index` is the 1-based number the reader types to act on it.
pub fn render_card(index: usize, article: &Article, bookmarked: bool, now: DateTime<Utc>) -> String {
    let star = if bookmarked { BOOKMARKED } else { NOT_BOOKMARKED };
    let mut out = format!("[{index}] {star} {}\n", article.title);
    out.push_str(&format!(
        "    {} · {}\n",
        article.source.name,
        format_relative_date(article.published_at, now)
    ));
    out.push_str(&format!(
        "    {}\n",
        truncate_description(&article.description)
    ));
    out.push_str(&format!("    {}\n", article.url));
    if let Some(image) = &article.image_url {
        out.push_str(&format!("    image: {image}\n"));
    }
    out
}

/// Cards for every article, or the empty-results notice.
pub fn render_articles(
    articles: &[Article],
    is_bookmarked: impl Fn(&str) -> bool,
    now: DateTime<Utc>,
) -> String {
    if articles.is_empty() {
        return "No articles found\nTry adjusting your search or category filter\n".to_string();
    }
    articles
        .iter()
        .enumerate()
        .map(|(i, a)| render_card(i + 1, a, is_bookmarked(&a.id), now))
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_description(s: &str) -> String {
    if s.chars().count() <= DESCRIPTION_MAX {
        return s.to_string();
    }
    let head: String = s.chars().take(DESCRIPTION_MAX).collect();
    format!("{}…", head.trim_end())
}

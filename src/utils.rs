//! Utility functions for text cleanup, logging and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - HTML stripping and whitespace cleanup for provider text fields
//! - String truncation and API-key redaction for logging
//! - JSON error detection for handling truncated response bodies
//! - File system validation for the data directory

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

/// Reduce an HTML fragment to its text content.
///
/// Some providers put markup (`<strong>`, `<p>`, entities) into summary
/// fields. The fragment is parsed and only text nodes are kept.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_html("<p>Hello <b>world</b></p>"), "Hello world");
/// ```
pub fn strip_html(s: &str) -> String {
    if !s.contains('<') && !s.contains('&') {
        return collapse_whitespace(s);
    }
    let fragment = Html::parse_fragment(s);
    let text = fragment.root_element().text().collect::<Vec<_>>().join("");
    collapse_whitespace(&text)
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (on a char boundary)
/// with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Replace every occurrence of `secret` in `s` with `HIDDEN`.
///
/// Request URLs carry the API key as a query parameter; this keeps it out
/// of the logs.
pub fn redact(s: &str, secret: &str) -> String {
    if secret.is_empty() {
        s.to_string()
    } else {
        s.replace(secret, "HIDDEN")
    }
}

/// Detect if a serde_json error indicates truncated/incomplete JSON.
///
/// A connection dropped mid-body produces an EOF error rather than a
/// syntax error; callers treat that as a transport failure and retry.
pub fn looks_truncated(e: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(e.classify(), Category::Eof)
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Data directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        let s = "é".repeat(10);
        let result = truncate_for_log(&s, 3);
        assert!(result.starts_with('é'));
        assert!(result.contains("(+18 bytes)"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_html("Fish &amp; chips"), "Fish & chips");
        assert_eq!(strip_html("  plain\n text  "), "plain text");
    }

    #[test]
    fn test_redact() {
        let url = "https://newsapi.org/v2/top-headlines?apiKey=abc123&page=1";
        assert_eq!(
            redact(url, "abc123"),
            "https://newsapi.org/v2/top-headlines?apiKey=HIDDEN&page=1"
        );
        assert_eq!(redact(url, ""), url);
    }

    #[test]
    fn test_looks_truncated() {
        let json_eof = r#"{"field": "value"#;
        let result: Result<serde_json::Value, _> = serde_json::from_str(json_eof);
        assert!(looks_truncated(&result.unwrap_err()));

        let json_bad = r#"{"field": nope}"#;
        let result: Result<serde_json::Value, _> = serde_json::from_str(json_bad);
        assert!(!looks_truncated(&result.unwrap_err()));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b");
        ensure_writable_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}

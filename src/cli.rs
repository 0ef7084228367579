//! Command-line interface definitions for Headline Reader.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Global options can also come from environment variables or `config.yaml`;
//! flags given here win.

use crate::models::{Category, SortBy};
use crate::providers::ProviderKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the Headline Reader application.
///
/// Without a subcommand the reader starts in interactive mode.
///
/// # Examples
///
/// ```sh
/// # Interactive reader
/// headline_reader --api-key YOUR_KEY
///
/// # One page of technology headlines
/// headline_reader headlines --category technology --page 2
///
/// # Search, bypassing the cache
/// headline_reader --no-cache search "solar power"
///
/// # Most relevant results first
/// headline_reader --sort relevance search "solar power"
///
/// # Saved articles
/// headline_reader bookmarks list
///
/// # Drop cached pages
/// headline_reader clear-cache
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// News provider to query
    #[arg(short, long, env = "NEWS_PROVIDER")]
    pub provider: Option<ProviderKind>,

    /// Provider API key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory holding bookmarks and cached pages
    #[arg(short, long, env = "HEADLINE_READER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Articles per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Skip the result cache
    #[arg(long)]
    pub no_cache: bool,

    /// Result order
    #[arg(short, long, value_enum, env = "NEWS_SORT")]
    pub sort: Option<SortBy>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot commands. Omit to start the interactive reader.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print one page of top headlines
    Headlines {
        /// Headline category
        #[arg(short = 'k', long, value_enum, default_value_t = Category::General)]
        category: Category,

        /// Page number, starting at 1
        #[arg(short = 'n', long, default_value_t = 1)]
        page: u32,
    },

    /// Print one page of search results
    Search {
        /// Search text (at least two characters)
        query: String,

        /// Page number, starting at 1
        #[arg(short = 'n', long, default_value_t = 1)]
        page: u32,
    },

    /// Manage saved articles
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },

    /// Delete every cached result page
    ClearCache,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BookmarkAction {
    /// List saved articles, oldest first
    List,
    /// Remove a saved article by id
    Remove { id: String },
}

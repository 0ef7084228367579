//! # Headline Reader
//!
//! A terminal news reader. It pulls top headlines and search results from a
//! news API, normalizes them into one article shape, pages through them,
//! and keeps bookmarks on disk with a short undo window.
//!
//! ## Features
//!
//! - Three providers: NewsAPI, NewsData.io and The Guardian
//! - Category browsing and debounced full-text search
//! - Retries with exponential backoff for network failures
//! - Bookmarks persisted as JSON, with single-step undo of removals
//! - Result pages cached on disk with a time-to-live
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... headline_reader
//! headline_reader headlines -k science
//! headline_reader search "solar power" -n 2
//! headline_reader --sort relevance search "solar power"
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetch**: [`api`] builds provider URLs, retries, and normalizes bodies
//! 2. **Store**: [`store`] persists bookmarks and caches pages
//! 3. **State**: [`state`] holds the single view state and notifies the renderer
//! 4. **Render**: [`render`] turns state into text
//! 5. **React**: [`events`] parses input and [`app`] runs the handlers

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::rc::Rc;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod app;
mod cli;
mod config;
mod error;
mod events;
mod models;
mod providers;
mod render;
mod state;
mod store;
mod undo;
mod utils;

use api::{HttpFetcher, NewsClient, RetryFetch};
use app::App;
use cli::Cli;
use config::AppConfig;
use render::render_view;
use store::{BookmarkStore, FileStore, KeyValueStore, MemoryStore, ResultCache};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr; stdout is the reader's screen) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("headline_reader starting up");

    let args = Cli::parse();
    debug!(?args.command, ?args.provider, no_cache = args.no_cache, "Parsed CLI arguments");

    let config = match AppConfig::discover(args.config.as_deref()) {
        Ok(c) => c.with_overrides(&args),
        Err(e) => {
            error!(error = %e, "Could not load configuration");
            return Err(e.into());
        }
    };
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }
    info!(provider = %config.provider, page_size = config.page_size, sort = %config.sort_by, cache = config.cache_enabled, "Configuration resolved");

    let api_key = config.api_key.clone().unwrap_or_default();
    if api_key.is_empty() {
        warn!("No API key configured; requests will be rejected. Set NEWS_API_KEY or api_key in config.yaml");
    }

    // ---- Storage ----
    let data_dir = config.resolved_data_dir();
    let kv: Rc<dyn KeyValueStore> = match ensure_writable_dir(&data_dir).await {
        Ok(()) => match FileStore::open(data_dir.clone()) {
            Ok(store) => Rc::new(store),
            Err(e) => {
                warn!(path = %data_dir.display(), error = %e, "Could not open data directory; bookmarks will not persist");
                Rc::new(MemoryStore::default())
            }
        },
        Err(e) => {
            warn!(path = %data_dir.display(), error = %e, "Data directory is not writable; bookmarks will not persist");
            Rc::new(MemoryStore::default())
        }
    };

    let cache = ResultCache::new(Rc::clone(&kv), config.cache_ttl(), config.cache_enabled);
    let pruned = cache.prune_expired();
    debug!(pruned, "Pruned expired cache entries");
    let bookmarks = BookmarkStore::load(kv);

    // ---- Client ----
    let http = HttpFetcher::new(config.request_timeout(), api_key.clone())?;
    let fetcher = RetryFetch::new(http, config.max_retries, config.base_delay())
        .with_max_delay(config.max_delay());
    let client = NewsClient::new(fetcher, config.provider.build(api_key, config.base_url.as_deref()), config.page_size);

    let mut app =
        App::new(client, bookmarks, cache, config.undo_window()).with_sort(config.sort_by);

    match args.command {
        Some(command) => match app.run_command(command).await {
            Ok(output) => print!("{output}"),
            Err(e) => {
                error!(code = e.code(), error = %e, "Command failed");
                eprintln!("{}", e.user_message());
                return Err(e.into());
            }
        },
        None => {
            app.subscribe(|state| print!("\n{}", render_view(state, Utc::now())));
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            if let Err(e) = app.run_interactive(stdin, config.debounce()).await {
                error!(error = %e, "Reading input failed");
                return Err(e.into());
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

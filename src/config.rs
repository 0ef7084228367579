//! Runtime configuration loaded from an optional YAML file.
//!
//! Values are resolved in three layers: built-in defaults, then
//! `config.yaml` (either `--config <path>` or
//! `<config dir>/headline_reader/config.yaml` when present), then CLI flags
//! and environment variables.
//!
//! ```yaml
//! provider: newsapi
//! api_key: 0123456789abcdef
//! page_size: 10
//! sort_by: relevance
//! cache_ttl_secs: 900
//! undo_window_secs: 5
//! ```

use crate::cli::Cli;
use crate::error::NewsError;
use crate::models::SortBy;
use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

const APP_DIR: &str = "headline_reader";

/// Every tunable the reader uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Which news API to talk to.
    pub provider: ProviderKind,
    /// Provider API key. Sent as a query parameter, never logged.
    pub api_key: Option<String>,
    /// Articles per page.
    pub page_size: u32,
    /// Initial result order; `sort` changes it during a session.
    pub sort_by: SortBy,
    /// Retry bound for transient network failures.
    pub max_retries: usize,
    /// First backoff delay; doubles with each attempt.
    pub base_delay_ms: u64,
    /// Backoff ceiling.
    pub max_delay_ms: u64,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
    /// Whether fetched pages are cached on disk.
    pub cache_enabled: bool,
    /// How long a cached page stays fresh.
    pub cache_ttl_secs: u64,
    /// Quiet period before a typed search is sent.
    pub debounce_ms: u64,
    /// How long a deleted bookmark can be restored.
    pub undo_window_secs: u64,
    /// Where bookmarks and cached pages live.
    pub data_dir: Option<PathBuf>,
    /// Replaces the provider's public endpoint, e.g. a caching proxy.
    pub base_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::NewsApi,
            api_key: None,
            page_size: 10,
            sort_by: SortBy::PublishedAt,
            max_retries: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 30_000,
            request_timeout_secs: 10,
            cache_enabled: true,
            cache_ttl_secs: 15 * 60,
            debounce_ms: 800,
            undo_window_secs: 5,
            data_dir: None,
            base_url: None,
        }
    }
}

impl AppConfig {
    /// Parse a YAML config file.
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, NewsError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| NewsError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&raw)
            .map_err(|e| NewsError::Config(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse YAML text; an empty document yields the defaults.
    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Load the explicit path if given, else the default location if it
    /// exists, else the built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, NewsError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Layer CLI flags (and their env fallbacks) over the file values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(provider) = cli.provider {
            self.provider = provider;
        }
        if let Some(key) = &cli.api_key {
            self.api_key = Some(key.clone());
        }
        if let Some(dir) = &cli.data_dir {
            self.data_dir = Some(dir.clone());
        }
        if let Some(size) = cli.page_size {
            self.page_size = size;
        }
        if let Some(sort) = cli.sort {
            self.sort_by = sort;
        }
        if cli.no_cache {
            self.cache_enabled = false;
        }
        self
    }

    /// Reject values that would only fail later, mid-session.
    pub fn validate(&self) -> Result<(), NewsError> {
        if self.page_size == 0 {
            return Err(NewsError::Config("page_size must be at least 1".into()));
        }
        if let Some(base) = &self.base_url {
            Url::parse(base)
                .map_err(|e| NewsError::Config(format!("base_url {base:?}: {e}")))?;
        }
        Ok(())
    }

    /// Data directory, falling back to the platform data dir.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        })
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn undo_window(&self) -> Duration {
        Duration::from_secs(self.undo_window_secs)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.cache_ttl(), Duration::from_secs(900));
        assert_eq!(config.debounce(), Duration::from_millis(800));
        assert!(config.cache_enabled);
        assert_eq!(config.sort_by, SortBy::PublishedAt);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config =
            AppConfig::from_yaml("provider: guardian\npage_size: 20\nsort_by: relevance\n").unwrap();
        assert_eq!(config.provider, ProviderKind::Guardian);
        assert_eq!(config.sort_by, SortBy::Relevance);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_reports_bad_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "page_size: [nope").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, NewsError::Config(_)));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, NewsError::Config(_)));
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let file = AppConfig::from_yaml("provider: newsdata\npage_size: 5\n").unwrap();
        let cli = Cli::parse_from([
            "headline_reader",
            "--provider",
            "guardian",
            "--api-key",
            "k",
            "--no-cache",
            "--sort",
            "relevance",
            "headlines",
        ]);
        let config = file.with_overrides(&cli);
        assert_eq!(config.provider, ProviderKind::Guardian);
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.page_size, 5);
        assert!(!config.cache_enabled);
        assert_eq!(config.sort_by, SortBy::Relevance);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AppConfig::default().validate().is_ok());

        let zero = AppConfig::from_yaml("page_size: 0\n").unwrap();
        assert!(matches!(zero.validate(), Err(NewsError::Config(_))));

        let proxy = AppConfig::from_yaml("base_url: http://localhost:8080/v2\n").unwrap();
        assert!(proxy.validate().is_ok());

        let broken = AppConfig::from_yaml("base_url: not a url\n").unwrap();
        assert!(matches!(broken.validate(), Err(NewsError::Config(_))));
    }
}

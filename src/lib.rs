//! Newsdesk: a Zellij plugin for reading a fetched news feed.
//!
//! Newsdesk fetches a snapshot of news items from an HTTP endpoint and lets
//! one reader:
//! - Search titles, sources and tags with a case-insensitive substring query
//! - Narrow by source and topic, hide read items, or show starred items only
//! - Page through the filtered list with numbered page controls
//! - Mark items read or starred, persisted in device-local JSON files
//! - Switch between a light and a dark palette, also persisted

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and key bindings                  │
//! │  - Filter engine and paginator                      │
//! │  - View state and view model computation            │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Fetch Layer   │
//! │ (ui/)         │   │ (storage/)    │   │ (fetch/)      │
//! │ - Rendering   │   │ - JSON slots  │   │ - Request URL │
//! │ - Theming     │   │ - Read / star │   │ - Decoding    │
//! │ - Components  │   │ - Theme pref  │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Items, errors, sanitized values (domain/)        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/newsdesk.wasm" {
//!         feed_url "https://news.example.com/api/top"
//!         top_n "200"
//!         page_size "50"
//!         max_visible_pages "7"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Basic Usage (Library)
//!
//! ```rust
//! use newsdesk::app::{AppState, FeedSettings};
//! use newsdesk::storage::MemoryStorage;
//! use newsdesk::{handle_event, Event, Item};
//!
//! let mut state = AppState::with_storage(
//!     FeedSettings::default(),
//!     Box::new(MemoryStorage::default()),
//!     Box::new(MemoryStorage::default()),
//! );
//!
//! let items = vec![Item::new("1", "Rates hold", "https://example.com/1", "Reuters", vec![])];
//! handle_event(&mut state, &Event::FetchResolved { items, fetched_at: chrono::Utc::now() })?;
//! handle_event(&mut state, &Event::ToggleStar("1".to_string()))?;
//!
//! assert!(state.annotations.is_starred("1"));
//! # Ok::<(), newsdesk::NewsdeskError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Tests**: the library compiles natively; only the shim is wasm-only

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, FeedSettings, FilterCriteria, InputMode};
pub use domain::{FetchError, Item, NewsdeskError, Result};
pub use ui::Theme;

use app::state::{DEFAULT_FEED_URL, DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_TOP_N};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use storage::{JsonFileStorage, MemoryStorage, Storage};

/// Plugin configuration parsed from Zellij's configuration map.
///
/// Every key is optional and parsed tolerantly: a missing or malformed value
/// keeps its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Feed endpoint; `top=<top_n>` is appended when fetching.
    pub feed_url: String,

    /// Number of items requested per fetch. Default: 200
    pub top_n: u32,

    /// Items per page. Zero is rejected. Default: 50
    pub page_size: NonZeroUsize,

    /// Maximum numbered page buttons. Zero is rejected. Default: 7
    pub max_visible_pages: usize,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = FeedSettings::default();
        Self {
            feed_url: settings.feed_url,
            top_n: settings.top_n,
            page_size: settings.page_size,
            max_visible_pages: settings.max_visible_pages,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `feed_url`: trimmed; blank → default
    /// - `top_n`: `u32`, zero or parse error → 200
    /// - `page_size`: positive integer, otherwise 50
    /// - `max_visible_pages`: positive integer, otherwise 7
    /// - `trace_level`: passed through
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use newsdesk::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("top_n".to_string(), "not-a-number".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.page_size.get(), 25);
    /// assert_eq!(config.top_n, 200);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let feed_url = config
            .get("feed_url")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or_else(|| DEFAULT_FEED_URL.to_string(), String::from);

        let top_n = config
            .get("top_n")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_TOP_N);

        let page_size = parse_positive(config.get("page_size"))
            .and_then(NonZeroUsize::new)
            .unwrap_or_else(|| FeedSettings::default().page_size);

        let max_visible_pages = parse_positive(config.get("max_visible_pages")).unwrap_or(DEFAULT_MAX_VISIBLE_PAGES);

        Self {
            feed_url,
            top_n,
            page_size,
            max_visible_pages,
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// The fetch and paging part of the configuration.
    #[must_use]
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            feed_url: self.feed_url.clone(),
            top_n: self.top_n,
            page_size: self.page_size,
            max_visible_pages: self.max_visible_pages,
        }
    }
}

fn parse_positive(value: Option<&String>) -> Option<usize> {
    value
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// Initializes the application state for the plugin.
///
/// Opens the annotation and theme slots in the data directory. If that
/// directory cannot be created the plugin still runs, with both slots held in
/// memory for the session.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(page_size = config.page_size.get(), feed_url = %config.feed_url, "initializing newsdesk plugin");

    let data_dir = infrastructure::data_dir();
    let (annotations, preferences): (Box<dyn Storage>, Box<dyn Storage>) =
        match JsonFileStorage::new(data_dir.clone()) {
            Ok(storage) => (Box::new(storage.clone()), Box::new(storage)),
            Err(e) => {
                tracing::warn!(dir = %data_dir.display(), error = %e, "data directory unavailable, persisting in memory only");
                (Box::new(MemoryStorage::default()), Box::new(MemoryStorage::default()))
            }
        };

    AppState::with_storage(config.feed_settings(), annotations, preferences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::DEFAULT_PAGE_SIZE;
    use pretty_assertions::assert_eq;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
        assert_eq!(Config::default().feed_settings(), FeedSettings::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("feed_url", " https://news.example.com/api/top "),
            ("top_n", "80"),
            ("page_size", "20"),
            ("max_visible_pages", "5"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.feed_url, "https://news.example.com/api/top");
        assert_eq!(config.top_n, 80);
        assert_eq!(config.page_size.get(), 20);
        assert_eq!(config.max_visible_pages, 5);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        let config = Config::from_zellij(&map(&[
            ("feed_url", "   "),
            ("top_n", "0"),
            ("page_size", "0"),
            ("max_visible_pages", "-3"),
        ]));

        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.top_n, DEFAULT_TOP_N);
        assert_eq!(config.page_size.get(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.max_visible_pages, DEFAULT_MAX_VISIBLE_PAGES);
    }
}

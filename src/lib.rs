//! Marquee: a Zellij plugin for browsing movies, people and studios from TMDB.
//!
//! Marquee turns a floating pane into a small movie catalog:
//! - Search by title, person, company or everything at once
//! - Popular, A–Z and Z–A movie views, popular people and studio browsing
//! - Year and genre filters applied to the current result set
//! - A movie detail panel with cast, runtime and an IMDb link
//! - Local login with per-user favorites persisted to a JSON file

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
//! │  - Key bindings and event handling                  │
//! │  - Action dispatching (web requests)                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ Favorites     │   │ API           │
//! │ (catalog/)    │   │ (favorites/)  │   │ (api/)        │
//! │ - Filters     │   │ - Session     │   │ - URLs        │
//! │ - View modes  │   │ - Auth seam   │   │ - Decoding    │
//! │ - Sequencing  │   │ - Toggle      │   │ - Tags        │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Listing (pagination, sort) · Storage (JSON file)   │
//! │  Domain (movies, people, errors) · Infrastructure   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  UI (ui/) · Observability (observability/)          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/marquee.wasm" {
//!         api_key "your-tmdb-v3-key"
//!         language "en-US"
//!         theme "catppuccin-mocha"
//!         page_window "5"
//!         response_ordering "latest-request"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. The shim parses [`Config`], installs tracing and calls [`initialize`].
//! 2. It requests web and filesystem permissions and subscribes to key,
//!    web-response and permission events.
//! 3. Once permissions are granted, [`Event::PermissionsResult`] issues the
//!    popular-movies and genre-list requests.
//! 4. Every key is mapped with [`map_key`], handled with [`handle_event`] and
//!    the returned [`Action`]s are executed by the host.
//!
//! # Example
//!
//! ```rust
//! use marquee::{handle_event, initialize_in, Config, Event};
//!
//! let dir = tempfile::tempdir()?;
//! let mut state = initialize_in(&Config::default(), dir.path());
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert!(actions.is_empty()); // no api_key configured
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod api;
pub mod app;
pub mod catalog;
pub mod domain;
pub mod favorites;
pub mod infrastructure;
pub mod listing;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, map_key, Action, AppState, Event, InputMode, Key, Panel};
pub use catalog::{ResponseOrdering, ViewMode};
pub use domain::{MarqueeError, Result};
pub use ui::Theme;

use api::TmdbClient;
use favorites::Session;
use infrastructure::{expand_tilde, get_data_dir, STORAGE_FILE_NAME};
use listing::DEFAULT_PAGE_WINDOW;
use std::collections::BTreeMap;
use std::path::Path;
use storage::{JsonStorage, MemoryStorage, Storage};

/// Default TMDB response language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Plugin configuration parsed from the Zellij plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TMDB v3 API key. Without it no requests are issued and the catalog
    /// shows a configuration hint.
    pub api_key: Option<String>,

    /// Response language sent with every request. Default: `"en-US"`
    pub language: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file, `~` is resolved against `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,

    /// Maximum number of page links in the page bar. Default: 5
    pub page_window: u32,

    pub response_ordering: ResponseOrdering,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            language: DEFAULT_LANGUAGE.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            page_window: DEFAULT_PAGE_WINDOW,
            response_ordering: ResponseOrdering::default(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as missing and unparsable values fall back to
    /// their defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use marquee::{Config, ResponseOrdering};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc123".to_string());
    /// map.insert("page_window".to_string(), "7".to_string());
    /// map.insert("response_ordering".to_string(), "last-arrival".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("abc123"));
    /// assert_eq!(config.language, "en-US");
    /// assert_eq!(config.page_window, 7);
    /// assert_eq!(config.response_ordering, ResponseOrdering::LastArrival);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let page_window = value("page_window")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_WINDOW);

        let response_ordering = value("response_ordering")
            .map_or_else(ResponseOrdering::default, |s| {
                s.parse().unwrap_or_else(|e: String| {
                    tracing::warn!(error = %e, "ignoring response_ordering");
                    ResponseOrdering::default()
                })
            });

        Self {
            api_key: value("api_key"),
            language: value("language").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
            page_window,
            response_ordering,
        }
    }

    fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the application state using the plugin's data directory.
///
/// See [`initialize_in`].
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    initialize_in(config, &get_data_dir())
}

/// Builds the application state with its session store under `data_dir`.
///
/// - the theme comes from `theme_file`, then `theme`, then the default
/// - the session is restored from `<data_dir>/marquee.json`; when that file
///   cannot be opened the session lives in memory for this run only
/// - a [`TmdbClient`] is created only when an API key is configured
///
/// No requests are issued here; they start once permissions are granted.
#[must_use]
pub fn initialize_in(config: &Config, data_dir: &Path) -> AppState {
    let _span = tracing::info_span!("initialize").entered();

    let storage: Box<dyn Storage> = match JsonStorage::new(data_dir.join(STORAGE_FILE_NAME)) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!(error = %e, "session store unavailable, favorites will not persist");
            Box::new(MemoryStorage::new())
        }
    };
    let session = Session::load(storage);

    let client = config
        .api_key
        .as_ref()
        .map(|key| TmdbClient::new(key.clone(), config.language.clone()));
    if client.is_none() {
        tracing::warn!("api_key is not configured, catalog requests are disabled");
    }

    tracing::debug!(
        language = %config.language,
        page_window = config.page_window,
        ordering = ?config.response_ordering,
        "plugin initialized"
    );

    AppState::new(config.load_theme(), client, session, config.response_ordering)
        .with_page_window(config.page_window)
}

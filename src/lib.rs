//! # brainr
//!
//! An endless, swipeable feed of random Wikipedia articles for the terminal.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → ArticleSource → FeedBuffer → TUI
//!                               ↑
//!              PreferenceStore (topics, bookmarks, likes, theme)
//! ```
//!
//! - [`source`]: Wikipedia listing, content lookup and search
//! - [`feed`]: Prefetching cursor over articles that have images
//! - [`store`]: Key-value persistence and typed preferences
//! - [`tui`]: Card view built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Pick topics
//! brainr onboard --topics Science History
//!
//! # Swipe through articles
//! brainr
//!
//! # Print a few without the TUI
//! brainr feed --count 5
//! ```

/// Application context, session state and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config, the
/// preference store and the article source.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/brainr/config.toml`, supporting:
/// - API and feed sizing settings
/// - Per-theme colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): one page with its summary and thumbnail
/// - [`Bookmark`](domain::Bookmark) and [`LikedArticle`](domain::LikedArticle)
/// - [`Topic`](domain::Topic) and [`Theme`](domain::Theme)
pub mod domain;

/// The article feed: cursor, pending batch and background refill.
pub mod feed;

/// JSON requests against the MediaWiki action API.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for API requests
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Article sources and the static topic catalog.
pub mod source;

/// Preference persistence.
///
/// - [`KeyValueStore`](store::KeyValueStore): string key-value storage
/// - [`SqliteKvStore`](store::SqliteKvStore): SQLite implementation
/// - [`PreferenceStore`](store::PreferenceStore): typed preferences
pub mod store;

/// Terminal user interface.
///
/// One article card at a time with a detail view for the full summary.
/// Keybindings: j/k next/previous, Enter details, b bookmark, l like,
/// o opens in browser, t theme, r retry, q quits.
pub mod tui;

#[cfg(test)]
mod test_support;

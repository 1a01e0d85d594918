//! Configuration management for brainr.
//!
//! Configuration is read from `~/.config/brainr/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::{ColorConfig, Palette};
pub use keybindings::{KeybindingConfig, Keymap};

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub feed: FeedConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Upstream API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Content lookups run at once per batch.
    pub max_concurrency: usize,
    /// Requested thumbnail width in pixels.
    pub thumbnail_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org/w/api.php".to_string(),
            timeout_secs: 10,
            user_agent: concat!("brainr/", env!("CARGO_PKG_VERSION")).to_string(),
            max_concurrency: 10,
            thumbnail_size: 500,
        }
    }
}

/// Feed buffer sizing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Articles fetched when a session starts.
    pub initial_batch: usize,
    /// Articles fetched by each background refill.
    pub refill_batch: usize,
    /// Start refilling once this many articles are left ahead.
    pub prefetch_threshold: usize,
    /// Upper bound on a whole fetch, listing and lookups included.
    pub fetch_timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_batch: 10,
            refill_batch: 5,
            prefetch_threshold: 2,
            fetch_timeout_secs: 10,
        }
    }
}

impl FeedConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path when none is
    /// given.
    ///
    /// A missing default file is created with comments. An explicitly given
    /// path must exist. Missing fields use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.clone(),
            source: e,
        })?;

        config.validate(&config_path)?;
        Ok(config)
    }

    /// Get the default config file path: `~/.config/brainr/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("brainr").join("config.toml"))
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        if self.feed.initial_batch == 0 || self.feed.refill_batch == 0 {
            return Err(invalid("feed batch sizes must be at least 1"));
        }
        if self.feed.fetch_timeout_secs == 0 || self.api.timeout_secs == 0 {
            return Err(invalid("timeouts must be at least 1 second"));
        }
        if self.api.max_concurrency == 0 {
            return Err(invalid("api.max_concurrency must be at least 1"));
        }
        self.keybindings.keymap().map_err(|e| invalid(&e))?;
        Ok(())
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# brainr configuration
#
# Colors can be named (Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
# DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
# LightCyan, White, Reset) or hex ("#RRGGBB" / "#RGB").
#
# Keys can be single characters ("b"), special keys (Enter, Esc, Backspace,
# Up, Down, Left, Right, PageUp, PageDown, Space, F1-F12) or combinations
# ("Ctrl+c", "Alt+Enter").

[api]
base_url = "https://en.wikipedia.org/w/api.php"
timeout_secs = 10
max_concurrency = 10
thumbnail_size = 500

[feed]
# Articles loaded when the feed opens
initial_batch = 10
# Articles preloaded in the background each time
refill_batch = 5
# Start preloading when this many articles are left
prefetch_threshold = 2
fetch_timeout_secs = 10

[colors.dark]
border = "Cyan"
title = "White"
text = "Gray"
link = "LightBlue"

[colors.light]
border = "Blue"
title = "Black"
text = "Black"
link = "Blue"

[keybindings]
quit = ["q", "Ctrl+c"]
next = ["j", "Down", "Left"]
previous = ["k", "Up"]
open_detail = ["Enter", "Right"]
back = ["Esc", "Backspace"]
open_in_browser = ["o"]
toggle_bookmark = ["b"]
toggle_like = ["l"]
toggle_theme = ["t"]
retry = ["r"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config at {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.feed, FeedConfig::default());
        assert_eq!(config.colors.dark, Palette::dark());
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[feed]
refill_batch = 8
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.feed.refill_batch, 8);
        assert_eq!(config.feed.initial_batch, 10);
        assert_eq!(config.api.thumbnail_size, 500);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.feed.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.keybindings.retry, vec!["r"]);
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nmax_concurrency = 4").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.api.max_concurrency, 4);
    }

    #[test]
    fn test_load_rejects_zero_batch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feed]\ninitial_batch = 0").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feed\ninitial_batch = ").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_rejects_unparseable_keybinding() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[keybindings]\nquit = [\"Banana\"]").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        match err {
            ConfigError::Invalid { reason, .. } => assert!(reason.contains("keybindings.quit")),
            other => panic!("expected invalid config, got {}", other),
        }
    }
}

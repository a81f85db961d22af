//! Browser configuration
//!
//! Feed URL and cache root, stored as RON in the user's config directory.
//! Loading is lenient: a missing or malformed file falls back to defaults
//! so the panel always comes up.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cache::CACHE_DIR_NAME;
use crate::listing::DEFAULT_FEED_URL;

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "ourbricks";

/// Config file name
pub const CONFIG_FILE: &str = "config.ron";

/// Error type for config persistence
#[derive(Debug)]
pub enum ConfigError {
    /// File I/O error
    Io(String),
    /// Serialization error
    Serialization(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "I/O error: {}", msg),
            ConfigError::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

/// User-tunable settings for the browser panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Feed polled by the listing refresh
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    /// Root of the per-asset download cache
    #[serde(default = "default_cache_root")]
    pub cache_root: PathBuf,
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CACHE_DIR_NAME)
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            cache_root: default_cache_root(),
        }
    }
}

impl BrowserConfig {
    /// Where the config file lives
    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE)
    }

    /// Load the config, falling back to defaults on any failure
    pub fn load() -> Self {
        Self::load_from(&Self::config_file_path())
    }

    /// Load from an explicit path, falling back to defaults on any failure
    pub fn load_from(path: &std::path::Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match ron::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save as pretty RON, creating the parent directory
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_file_path())
    }

    /// Save to an explicit path
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let pretty = ron::ser::PrettyConfig::new().indentor("  ".to_string());
        let contents = ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

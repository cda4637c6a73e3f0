//! Configuration schema for chathead
//!
//! Configuration is stored at `~/.config/chathead/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Avatar cache settings
    pub cache: CacheConfig,

    /// Remote avatar provider settings
    pub provider: ProviderConfig,

    /// Chat display settings
    pub display: DisplayConfig,
}

/// Avatar cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable on-disk avatar caching (default: true)
    pub enabled: bool,

    /// Cache directory; defaults to the platform cache dir when unset
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

/// Remote avatar provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the avatar endpoint; `<base_url>/<id>/<size>` must
    /// return a PNG at exactly that square dimension
    pub base_url: String,

    /// Fetch timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://crafthead.net/avatar".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Chat display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Nominal chat page width in glyph columns; overlay lines are centered
    /// against this budget minus the head size
    pub page_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { page_width: 65 }
    }
}

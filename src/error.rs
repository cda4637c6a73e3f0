//! Error types for chathead
//!
//! All modules use `ChatheadResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for chathead operations
pub type ChatheadResult<T> = Result<T, ChatheadError>;

/// All errors that can occur in chathead
#[derive(Error, Debug)]
pub enum ChatheadError {
    // Input errors
    #[error("Invalid avatar size: {0}. Size must be a positive edge length.")]
    InvalidSize(u32),

    #[error("Invalid avatar identifier '{0}'. Identifiers may only contain letters, digits, '-' and '_'.")]
    InvalidIdentifier(String),

    // Provider errors
    #[error("Avatar fetch failed: {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Avatar unavailable for {0}. Check the identifier and network connectivity.")]
    AvatarUnavailable(String),

    // Image errors
    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Image encode failed: {0}")]
    Encode(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Cache errors
    #[error("Failed to create cache directory {path}: {source}")]
    CacheDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Delivery errors
    #[error("Delivery failed: {0}")]
    Delivery(String),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatheadError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

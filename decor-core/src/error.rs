// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Core Error Types
//!
//! Errors raised by the windowing collaborator and the configuration loader.
//! Widget operations never surface these to callers; they log and absorb them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A component is not known to the windowing collaborator.
    #[error("Unknown component {0}")]
    UnknownComponent(u64),

    /// Configuration file was not found.
    #[error("Config file not found: {path:?}")]
    ConfigNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Configuration file has an unsupported format.
    #[error("Unsupported config format for {path:?}, use .toml")]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },

    /// Error parsing a configuration document.
    #[error("Failed to parse config: {source}")]
    ConfigParse {
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a config-not-found error.
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(source: toml::de::Error) -> Self {
        Self::ConfigParse { source }
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Theme Error Types

use thiserror::Error;

/// Errors that can occur while loading decoration styles.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Error parsing a style document.
    #[error("Failed to parse style: {source}")]
    StyleParse {
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl From<toml::de::Error> for ThemeError {
    fn from(source: toml::de::Error) -> Self {
        Self::StyleParse { source }
    }
}

// src/error.rs

//! Unified error handling for the feed generator.

use std::fmt;

use thiserror::Error;

/// Result type alias for feed generator operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// XML processing failed
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source identifier not present in the registry
    #[error("Unknown data source: {0}")]
    UnknownSource(String),

    /// Headless browser launch or navigation failure
    #[error("Browser error: {0}")]
    Browser(String),

    /// Transport or navigation failure while fetching one source
    #[error("Fetch error for {source_name}: {message}")]
    Fetch { source_name: String, message: String },

    /// Feed document serialization failure
    #[error("Feed generation error: {0}")]
    Feed(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a browser error.
    pub fn browser(message: impl fmt::Display) -> Self {
        Self::Browser(message.to_string())
    }

    /// Create a fetch error scoped to a source.
    pub fn fetch(source: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            source_name: source.into(),
            message: message.to_string(),
        }
    }

    /// Create a feed generation error.
    pub fn feed(message: impl fmt::Display) -> Self {
        Self::Feed(message.to_string())
    }
}

// src/error.rs

//! Unified error handling for the documentation parser.

use std::fmt;

use thiserror::Error;

/// Result type alias for parser operations.
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

    /// Server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Regular expression failed to compile
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Expected tag is absent from the page
    #[error("Tag not found: <{tag}{filter}>")]
    TagNotFound { tag: String, filter: String },

    /// Tag is present but lacks a required attribute
    #[error("Tag <{tag}> has no attribute '{attribute}'")]
    MissingAttribute { tag: String, attribute: String },

    /// The page no longer has the shape the extractor relies on
    #[error("Unexpected page structure: {0}")]
    PageStructure(String),

    /// Summary status code missing from the expectation table
    #[error("Unknown PEP status code '{0}': expectation table is out of date")]
    UnknownStatusCode(String),

    /// Result row does not match the header
    #[error("Row has {actual} cells, header has {expected}")]
    RowArity { expected: usize, actual: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a tag lookup error, rendering the filter as ` name="value"`.
    pub fn tag_not_found(tag: impl Into<String>, filter: Option<impl fmt::Display>) -> Self {
        Self::TagNotFound {
            tag: tag.into(),
            filter: filter.map(|f| format!(" {f}")).unwrap_or_default(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(tag: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            tag: tag.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a page structure error.
    pub fn page_structure(message: impl Into<String>) -> Self {
        Self::PageStructure(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the error means the page no longer matches the assumed layout.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::TagNotFound { .. } | Self::MissingAttribute { .. } | Self::PageStructure(_)
        )
    }
}

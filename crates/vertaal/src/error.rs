//! Error types for vertaal.
//!
//! All fallible operations in the crate return [`Result`], built on a single
//! error enum. The taxonomy mirrors the request lifecycle:
//!
//! - `Auth` - the caller presented no recognized API key
//! - `Config` - process-wide translator configuration is missing
//! - `Validation` - the request carried nothing to translate
//! - `Parsing` - the markup tokenizer could not advance
//! - `Upstream` - the translation service or OCR engine failed, or returned
//!   a result count that does not match the request
//! - `Io` - temporary file handling failed; these bubble up unchanged
//!
//! Upstream failures are surfaced once and never retried. Every error is
//! recovered at the request boundary into the JSON error envelope; none may
//! propagate as an unhandled fault.
use thiserror::Error;

/// Result type alias using `VertaalError`.
pub type Result<T> = std::result::Result<T, VertaalError>;

/// Main error type for all vertaal operations.
#[derive(Debug, Error)]
pub enum VertaalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for VertaalError {
    fn from(err: serde_json::Error) -> Self {
        VertaalError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for VertaalError {
    fn from(err: toml::de::Error) -> Self {
        VertaalError::Config {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $with_source:ident, $variant:ident) => {
        #[doc = concat!("Create a `", stringify!($variant), "` error")]
        pub fn $name<S: Into<String>>(message: S) -> Self {
            Self::$variant {
                message: message.into(),
                source: None,
            }
        }

        #[doc = concat!("Create a `", stringify!($variant), "` error with source")]
        pub fn $with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
            message: S,
            source: E,
        ) -> Self {
            Self::$variant {
                message: message.into(),
                source: Some(Box::new(source)),
            }
        }
    };
}

impl VertaalError {
    error_constructor!(config, config_with_source, Config);
    error_constructor!(validation, validation_with_source, Validation);
    error_constructor!(parsing, parsing_with_source, Parsing);
    error_constructor!(upstream, upstream_with_source, Upstream);
}

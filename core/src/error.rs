//! Error types for the fallible edges of the tracker.
//!
//! The tracking protocols themselves never fail; only config loading and
//! talking to a stopped service can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, saving or validating config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: toml::ser::Error,
    },

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("config store error: {0}")]
    Store(#[from] confy::ConfyError),
}

/// Errors returned by [`crate::service::ServiceHandle`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("tracking service has stopped")]
    Stopped,

    #[error("tracking service queue is full")]
    Busy,
}

//! Error types for the market OI service

use std::time::Duration;
use thiserror::Error;

/// Per-date load failure
///
/// Recoverable: the collector drops the date from the series and carries on.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Snapshot file could not be read
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Remote source answered with a non-success status
    #[error("Snapshot not found at {url} (status {status})")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Transport failure talking to the remote source
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Snapshot body was not a list of symbol records
    #[error("Malformed snapshot for {date}: {source}")]
    Parse {
        /// Date identifier of the snapshot
        date: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Load did not complete within the configured timeout
    #[error("Load for {date} timed out after {after:?}")]
    Timeout {
        /// Date identifier that timed out
        date: String,
        /// Timeout that elapsed
        after: Duration,
    },
}

/// Service error types
#[derive(Debug, Error)]
pub enum OiError {
    /// Smoothing window must hold at least one value
    #[error("Invalid trend window: {0}")]
    InvalidWindow(usize),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// A single-date load failed
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Result alias for the service
pub type Result<T> = std::result::Result<T, OiError>;

//! Typed errors for the harvester library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Per-source failures are
//! recoverable at the orchestrator level; only a missing corpus root
//! aborts a run.

use thiserror::Error;

/// Errors that abort a harvest run.
///
/// Per-source fetch and persist failures stay inside the control loop
/// as [`FetchError`] and [`PersistError`]; they classify the source
/// and never surface here.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Corpus root could not be created or read. Fatal for the run.
    #[error("corpus root unavailable at {path}: {source}")]
    CorpusRoot {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur fetching one source URL.
///
/// Every variant is terminal for that source: there are no retries,
/// and the control loop moves on to the next catalog entry.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request exceeded its deadline
    #[error("timeout fetching {url}")]
    Timeout { url: String },

    /// Transport-level failure (DNS, connect, TLS, read)
    #[error("network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    /// Server answered with a non-2xx status
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    /// The URL could not be parsed
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Errors writing document artifacts into the corpus.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem write failed
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Document could not be serialized to its metadata record
    #[error("failed to serialize document {id}: {source}")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for run-level operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for persistence operations.
pub type PersistResult<T> = std::result::Result<T, PersistError>;

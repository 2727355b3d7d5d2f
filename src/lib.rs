//! Link-Shelf: a mirrored shelf of link lists
//!
//! This crate mirrors a small set of remotely hosted documents into an
//! in-process cache, parses `[title](url)` entries out of each one, and keeps
//! the cache current with concurrent refresh cycles.

pub mod cache;
pub mod config;
pub mod output;
pub mod source;
pub mod state;
pub mod sync;

use thiserror::Error;

/// Main error type for Link-Shelf operations
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Document source error: {0}")]
    Source(#[from] SourceError),

    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid credential in ${var}: {reason}")]
    Credential { var: String, reason: String },
}

/// Failures reported by a document source
///
/// The fetch worker treats every variant the same way: the document is
/// skipped and the cache is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Document source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Failed to decode document {id}: {message}")]
    DecodeError { id: String, message: String },
}

/// Cycle-level failures
///
/// Individual document failures never surface here; only discovery can fail
/// a whole cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Discovery failed: {0}")]
    Discovery(SourceError),
}

/// Result type alias for Link-Shelf operations
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for document source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

// Re-export commonly used types
pub use cache::{CacheStore, DocumentSnapshot, Entry};
pub use config::Config;
pub use source::{DocumentId, DocumentSource};
pub use state::{CyclePhase, SyncOutcome};
pub use sync::{parse_entries, CycleReport, FetchWorker, Orchestrator, Shelf};

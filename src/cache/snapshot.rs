//! Parsed document snapshots
//!
//! A snapshot is the last successfully parsed state of one document, along
//! with the bookkeeping the fetch worker needs for its staleness check.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One `[title](url)` entry parsed from a document line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// Text inside the first `[...]` on the line, or empty
    pub title: String,

    /// Text inside the first `(...)` on the line
    pub url: String,
}

impl Entry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Parsed state of one document as published into the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSnapshot {
    /// The document identifier this snapshot belongs to
    pub name: String,

    /// Entries in document order
    pub entries: Vec<Entry>,

    /// Number of `\n`-separated lines in the text the entries came from
    pub line_count: usize,

    /// Hex SHA-256 of the raw text. Informational only.
    pub digest: String,

    /// When the text was fetched
    pub fetched_at: DateTime<Utc>,

    /// Assigned by the cache store on publication; 0 until published
    #[serde(skip)]
    version: u64,
}

impl DocumentSnapshot {
    /// Creates an unpublished snapshot stamped with the current time
    ///
    /// # Arguments
    ///
    /// * `name` - The document identifier
    /// * `entries` - Parsed entries in document order
    /// * `line_count` - Line count of the source text
    /// * `digest` - Content digest of the source text (see [`content_digest`])
    pub fn new(
        name: impl Into<String>,
        entries: Vec<Entry>,
        line_count: usize,
        digest: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            entries,
            line_count,
            digest: digest.into(),
            fetched_at: Utc::now(),
            version: 0,
        }
    }

    /// Number of parsed entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Publication version assigned by the cache store
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns how long ago the source text was fetched
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }

    pub(crate) fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }
}

/// Computes the hex SHA-256 digest of a document's raw text
pub fn content_digest(raw_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_text.as_bytes());
    hex::encode(hasher.finalize())
}

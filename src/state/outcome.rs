/// Outcome of synchronizing a single document
///
/// This module defines the three results a fetch worker can report.
use serde::Serialize;
use std::fmt;

/// Result of one fetch worker run for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The document was parsed and a new snapshot was published
    Updated,

    /// The staleness check decided the cached snapshot is still current
    Unchanged,

    /// The document could not be fetched or decoded; the cache was not touched
    Failed,
}

impl SyncOutcome {
    /// Returns true if the worker completed without an error
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Updated | Self::Unchanged)
    }

    /// Returns true if a new snapshot was written to the cache
    pub fn published(&self) -> bool {
        matches!(self, Self::Updated)
    }

    /// Short lowercase label used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

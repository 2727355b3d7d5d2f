//! Fetch worker: one document's fetch, staleness check, parse and publish
//!
//! The staleness check is a count comparison, not a content comparison: an
//! edit that keeps the compared count the same is reported as `Unchanged`
//! and the old snapshot stays published. The digest stored on each snapshot
//! never influences that decision; it is only used to log such missed edits.

use crate::cache::{content_digest, CacheStore, DocumentSnapshot};
use crate::config::StalenessCheck;
use crate::source::DocumentSource;
use crate::state::SyncOutcome;
use crate::sync::parser::{parse_lines, split_lines};
use std::sync::Arc;

/// Synchronizes single documents from a source into a cache
///
/// Cloning is cheap; the orchestrator hands one clone to every task.
#[derive(Clone)]
pub struct FetchWorker {
    source: Arc<dyn DocumentSource>,
    cache: Arc<CacheStore>,
    staleness: StalenessCheck,
}

impl FetchWorker {
    /// Creates a worker using the default line-count staleness check
    pub fn new(source: Arc<dyn DocumentSource>, cache: Arc<CacheStore>) -> Self {
        Self {
            source,
            cache,
            staleness: StalenessCheck::default(),
        }
    }

    /// Selects the staleness comparison
    pub fn with_staleness(mut self, staleness: StalenessCheck) -> Self {
        self.staleness = staleness;
        self
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Synchronizes one document
    ///
    /// # Flow
    ///
    /// 1. Fetch the raw text; any source error → `Failed`, cache untouched
    /// 2. Split into lines and count them
    /// 3. If a snapshot is cached and the staleness check matches → `Unchanged`
    /// 4. Otherwise parse, publish a complete new snapshot → `Updated`
    ///
    /// # Arguments
    ///
    /// * `id` - The document identifier
    pub async fn sync(&self, id: &str) -> SyncOutcome {
        let raw_text = match self.source.fetch_document(id).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", id, e);
                return SyncOutcome::Failed;
            }
        };

        let lines: Vec<&str> = split_lines(&raw_text).collect();
        let line_count = lines.len();
        let digest = content_digest(&raw_text);

        if let Some(cached) = self.cache.get(id) {
            if self.is_unchanged(id, &cached, line_count) {
                if cached.digest != digest {
                    tracing::debug!(
                        "{} content changed but the {:?} check kept snapshot v{}",
                        id,
                        self.staleness,
                        cached.version()
                    );
                }
                tracing::debug!("{} unchanged ({} lines)", id, line_count);
                return SyncOutcome::Unchanged;
            }
        }

        let entries = parse_lines(&lines);
        let snapshot = DocumentSnapshot::new(id, entries, line_count, digest);
        let published = self.cache.put(id, snapshot);

        tracing::debug!(
            "{} updated: {} entries from {} lines (v{})",
            id,
            published.entry_count(),
            line_count,
            published.version()
        );
        SyncOutcome::Updated
    }

    fn is_unchanged(&self, id: &str, cached: &DocumentSnapshot, line_count: usize) -> bool {
        match self.staleness {
            StalenessCheck::LineCount => cached.line_count == line_count,
            StalenessCheck::EntryCount => self.cache.snapshot_entry_count(id) == Some(line_count),
        }
    }
}

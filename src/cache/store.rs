//! Shared cache of document snapshots
//!
//! One read/write lock guards the whole map. Reads share the lock; a write
//! excludes every other reader and writer.

use crate::cache::DocumentSnapshot;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide mapping from document identifier to its latest snapshot
///
/// Snapshots are stored behind `Arc` so readers can hold one without keeping
/// the lock, and so callers can tell whether a snapshot was replaced.
#[derive(Debug, Default)]
pub struct CacheStore {
    snapshots: RwLock<HashMap<String, Arc<DocumentSnapshot>>>,
    next_version: AtomicU64,
}

impl CacheStore {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot for `id`, if any fetch has ever succeeded
    pub fn get(&self, id: &str) -> Option<Arc<DocumentSnapshot>> {
        self.snapshots.read().get(id).cloned()
    }

    /// Publishes `snapshot` for `id`, replacing any previous value
    ///
    /// The snapshot is stamped with a fresh version number before it becomes
    /// visible to readers.
    pub fn put(&self, id: impl Into<String>, snapshot: DocumentSnapshot) -> Arc<DocumentSnapshot> {
        let version = self.next_version.fetch_add(1, Ordering::Relaxed) + 1;
        let snapshot = Arc::new(snapshot.with_version(version));
        self.snapshots
            .write()
            .insert(id.into(), Arc::clone(&snapshot));
        snapshot
    }

    /// Number of entries in the cached snapshot for `id`
    pub fn snapshot_entry_count(&self, id: &str) -> Option<usize> {
        self.snapshots.read().get(id).map(|s| s.entry_count())
    }

    /// Version of the cached snapshot for `id`
    pub fn version(&self, id: &str) -> Option<u64> {
        self.snapshots.read().get(id).map(|s| s.version())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.snapshots.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.snapshots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.read().is_empty()
    }

    /// Identifiers currently cached, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.snapshots.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Copies the whole map under a single read lock
    pub fn snapshot_all(&self) -> HashMap<String, Arc<DocumentSnapshot>> {
        self.snapshots.read().clone()
    }
}

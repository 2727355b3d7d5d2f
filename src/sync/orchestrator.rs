//! Synchronization orchestrator - one full refresh cycle
//!
//! A cycle:
//! - Lists the documents at the source and keeps those with the menu extension
//! - Replaces the menu with that list
//! - Spawns one fetch worker per menu entry, all running at once
//! - Waits for every worker before reporting anything
//!
//! Only a failed listing fails a cycle. A failed cycle leaves the previous
//! menu and every cached snapshot exactly as they were.

use crate::cache::CacheStore;
use crate::config::{StalenessCheck, SyncConfig};
use crate::source::{DocumentId, DocumentSource};
use crate::state::{CyclePhase, SyncOutcome};
use crate::sync::worker::FetchWorker;
use crate::SyncError;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Result of one completed cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Per-document outcomes, in menu order
    pub outcomes: Vec<(DocumentId, SyncOutcome)>,

    /// When discovery started
    pub started_at: DateTime<Utc>,

    /// Wall time from discovery to the last joined worker
    pub elapsed_ms: u64,
}

impl CycleReport {
    /// Outcome recorded for `id`, if it was on the menu
    pub fn outcome(&self, id: &str) -> Option<SyncOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == id)
            .map(|(_, outcome)| *outcome)
    }

    /// Number of documents that ended with `outcome`
    pub fn count(&self, outcome: SyncOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }

    /// Identifiers whose worker failed
    pub fn failed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == SyncOutcome::Failed)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// The menu this cycle ran against
    pub fn menu(&self) -> Vec<&str> {
        self.outcomes.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Keeps the listed identifiers that carry the menu extension, in order
pub fn filter_menu(listed: Vec<DocumentId>, extension: &str) -> Vec<DocumentId> {
    listed
        .into_iter()
        .filter(|id| id.ends_with(extension))
        .collect()
}

/// Runs synchronization cycles against one source and one cache
///
/// Cycles may overlap; nothing serializes them. The reported phase is the
/// most recent transition made by any cycle.
pub struct Orchestrator {
    source: Arc<dyn DocumentSource>,
    cache: Arc<CacheStore>,
    worker: FetchWorker,
    extension: String,
    menu: RwLock<Vec<DocumentId>>,
    phase: Mutex<CyclePhase>,
}

impl Orchestrator {
    /// Creates an orchestrator with a `.md` menu and line-count staleness
    ///
    /// # Arguments
    ///
    /// * `source` - Where documents are listed and fetched from
    /// * `cache` - The shared cache workers publish into
    pub fn new(source: Arc<dyn DocumentSource>, cache: Arc<CacheStore>) -> Self {
        let worker = FetchWorker::new(Arc::clone(&source), Arc::clone(&cache));
        Self {
            source,
            cache,
            worker,
            extension: ".md".to_string(),
            menu: RwLock::new(Vec::new()),
            phase: Mutex::new(CyclePhase::Idle),
        }
    }

    /// Creates an orchestrator using the synchronization settings from a config file
    pub fn from_config(
        config: &SyncConfig,
        source: Arc<dyn DocumentSource>,
        cache: Arc<CacheStore>,
    ) -> Self {
        Self::new(source, cache)
            .with_extension(config.extension.clone())
            .with_staleness(config.staleness)
    }

    /// Sets the suffix a listed document needs to join the menu
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the staleness comparison used by every worker
    pub fn with_staleness(mut self, staleness: StalenessCheck) -> Self {
        self.worker = self.worker.with_staleness(staleness);
        self
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Copy of the menu from the last successful discovery
    pub fn menu(&self) -> Vec<DocumentId> {
        self.menu.read().clone()
    }

    pub fn phase(&self) -> CyclePhase {
        *self.phase.lock()
    }

    /// Runs one full cycle: discover, fan out, join
    ///
    /// # Returns
    ///
    /// * `Ok(CycleReport)` - Every worker finished; individual documents may have failed
    /// * `Err(SyncError::Discovery)` - Listing failed; menu and cache untouched
    pub async fn run_sync_cycle(&self) -> Result<CycleReport, SyncError> {
        let started_at = Utc::now();
        let start_time = Instant::now();

        self.set_phase(CyclePhase::Discovering);
        tracing::info!("Discovering documents from {}", self.source.describe());

        let listed = match self.source.list_documents().await {
            Ok(listed) => listed,
            Err(e) => {
                tracing::error!("Discovery failed, keeping previous menu: {}", e);
                self.set_phase(CyclePhase::Idle);
                return Err(SyncError::Discovery(e));
            }
        };

        let listed_count = listed.len();
        let menu = filter_menu(listed, &self.extension);
        tracing::debug!(
            "Menu has {} of {} listed documents (extension {})",
            menu.len(),
            listed_count,
            self.extension
        );
        *self.menu.write() = menu.clone();

        self.set_phase(CyclePhase::FetchingAll);
        let outcomes = self.fetch_all(&menu).await;
        self.set_phase(CyclePhase::Idle);

        let report = CycleReport {
            outcomes,
            started_at,
            elapsed_ms: u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        tracing::info!(
            "Cycle completed in {}ms: {} updated, {} unchanged, {} failed",
            report.elapsed_ms,
            report.count(SyncOutcome::Updated),
            report.count(SyncOutcome::Unchanged),
            report.count(SyncOutcome::Failed)
        );

        Ok(report)
    }

    /// Spawns one worker per menu entry and joins them all
    ///
    /// A worker task that panics is recorded as `Failed`. If this future is
    /// dropped, the `JoinSet` aborts whatever is still running.
    async fn fetch_all(&self, menu: &[DocumentId]) -> Vec<(DocumentId, SyncOutcome)> {
        let mut tasks = JoinSet::new();

        for (index, id) in menu.iter().enumerate() {
            let worker = self.worker.clone();
            let id = id.clone();
            tasks.spawn(async move {
                let outcome = worker.sync(&id).await;
                (index, outcome)
            });
        }

        let mut outcomes = vec![SyncOutcome::Failed; menu.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = outcome,
                Err(e) => tracing::error!("Fetch task did not complete: {}", e),
            }
        }

        menu.iter().cloned().zip(outcomes).collect()
    }

    fn set_phase(&self, next: CyclePhase) {
        let mut phase = self.phase.lock();
        if !phase.can_transition_to(next) {
            // Overlapping cycles interleave their transitions.
            tracing::trace!("Phase {} -> {} while another cycle runs", *phase, next);
        }
        *phase = next;
    }
}

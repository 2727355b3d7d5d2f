//! The running shelf: startup sequence, refresh trigger and page reads

use crate::cache::{CacheStore, DocumentSnapshot};
use crate::config::Config;
use crate::output::{collect_page_data, RefreshResponse};
use crate::source::{DocumentId, DocumentSource};
use crate::sync::{CycleReport, Orchestrator};
use crate::SyncError;
use std::sync::Arc;

/// A synchronized shelf ready to serve pages
///
/// The only constructor runs the first cycle to completion, so a `Shelf`
/// never exists before its cache has been filled once. Clones share the
/// same orchestrator and cache.
#[derive(Clone)]
pub struct Shelf {
    orchestrator: Arc<Orchestrator>,
}

impl Shelf {
    /// Runs the startup cycle and returns the ready shelf with its report
    ///
    /// # Returns
    ///
    /// * `Ok((Shelf, CycleReport))` - First cycle joined; documents may still have failed
    /// * `Err(SyncError)` - Discovery failed, there is nothing to serve
    pub async fn start(orchestrator: Orchestrator) -> Result<(Self, CycleReport), SyncError> {
        tracing::info!("Running startup sync cycle");
        let report = orchestrator.run_sync_cycle().await?;
        let shelf = Self {
            orchestrator: Arc::new(orchestrator),
        };
        Ok((shelf, report))
    }

    /// Builds an orchestrator from configuration with a fresh cache, then starts
    pub async fn start_with_config(
        config: &Config,
        source: Arc<dyn DocumentSource>,
    ) -> Result<(Self, CycleReport), SyncError> {
        let cache = Arc::new(CacheStore::new());
        Self::start(Orchestrator::from_config(&config.sync, source, cache)).await
    }

    /// Runs one on-demand cycle and reports it
    ///
    /// Answers 200 whenever the cycle completed, including cycles where some
    /// documents failed; only a failed discovery is reported as an error.
    pub async fn refresh(&self) -> RefreshResponse {
        let result = self.orchestrator.run_sync_cycle().await;
        let response = RefreshResponse::from_cycle(&result);
        if !response.is_ok() {
            tracing::warn!("Refresh failed: {}", response.msg);
        }
        response
    }

    /// Snapshots for the current menu, in menu order
    pub fn page_data(&self) -> Vec<Arc<DocumentSnapshot>> {
        collect_page_data(&self.orchestrator.menu(), self.orchestrator.cache())
    }

    pub fn menu(&self) -> Vec<DocumentId> {
        self.orchestrator.menu()
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        self.orchestrator.cache()
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

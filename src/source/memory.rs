//! In-memory document source
//!
//! Holds documents in a map and lets callers inject failures. Used to embed
//! a fixed shelf without any I/O and to drive the sync engine in tests.

use crate::source::{DocumentId, DocumentSource};
use crate::{SourceError, SourceResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
struct Inner {
    /// Documents in listing order
    docs: Vec<(DocumentId, SourceResult<String>)>,
    listing_error: Option<SourceError>,
}

/// Document source backed by an ordered in-memory list
#[derive(Debug, Default)]
pub struct MemorySource {
    inner: Mutex<Inner>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set_doc`](Self::set_doc)
    pub fn with_doc(self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_doc(id, text);
        self
    }

    /// Adds or replaces a document; new documents go to the end of the listing
    pub fn set_doc(&self, id: impl Into<String>, text: impl Into<String>) {
        self.set_result(id.into(), Ok(text.into()));
    }

    /// Keeps the document listed but makes every fetch of it fail
    pub fn fail_doc(&self, id: impl Into<String>) {
        let id = id.into();
        let error = SourceError::SourceUnavailable(format!("{} is unreachable", id));
        self.set_result(id, Err(error));
    }

    /// Makes fetches of `id` fail with a specific error
    pub fn set_error(&self, id: impl Into<String>, error: SourceError) {
        self.set_result(id.into(), Err(error));
    }

    /// Drops a document from the listing
    pub fn remove_doc(&self, id: &str) {
        self.inner.lock().docs.retain(|(name, _)| name != id);
    }

    /// Makes `list_documents` fail until cleared with `None`
    pub fn set_listing_error(&self, error: Option<SourceError>) {
        self.inner.lock().listing_error = error;
    }

    /// Total number of `fetch_document` calls served
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn set_result(&self, id: String, result: SourceResult<String>) {
        let mut inner = self.inner.lock();
        match inner.docs.iter_mut().find(|(name, _)| *name == id) {
            Some((_, slot)) => *slot = result,
            None => inner.docs.push((id, result)),
        }
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn list_documents(&self) -> SourceResult<Vec<DocumentId>> {
        let inner = self.inner.lock();
        if let Some(error) = &inner.listing_error {
            return Err(error.clone());
        }
        Ok(inner.docs.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn fetch_document(&self, id: &str) -> SourceResult<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock();
        inner
            .docs
            .iter()
            .find(|(name, _)| name == id)
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| Err(SourceError::NotFound(id.to_string())))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

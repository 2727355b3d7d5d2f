//! Page data set for the presentation layer

use crate::cache::{CacheStore, DocumentSnapshot};
use crate::source::DocumentId;
use std::sync::Arc;

/// Collects the cached snapshot of every menu entry, in menu order
///
/// Menu entries that were never fetched successfully are skipped and logged;
/// a missing snapshot never fails the page.
///
/// # Arguments
///
/// * `menu` - Identifiers in display order
/// * `cache` - The cache to read from
pub fn collect_page_data(menu: &[DocumentId], cache: &CacheStore) -> Vec<Arc<DocumentSnapshot>> {
    menu.iter()
        .filter_map(|id| {
            let snapshot = cache.get(id);
            if snapshot.is_none() {
                tracing::warn!("No cached snapshot for {}, leaving it off the page", id);
            }
            snapshot
        })
        .collect()
}

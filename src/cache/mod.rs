//! In-process document cache
//!
//! The cache is volatile: it starts empty and is rebuilt from the document
//! source on every process start.

mod snapshot;
mod store;

pub use snapshot::{content_digest, DocumentSnapshot, Entry};
pub use store::CacheStore;

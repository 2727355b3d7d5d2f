//! Document sources
//!
//! A document source lists the documents it holds and returns the raw text
//! of one document on request. The synchronization core only talks to the
//! [`DocumentSource`] trait; the transport behind it is interchangeable:
//! - [`GitHubSource`]: a directory of a GitHub repository, via the REST contents API
//! - [`LocalSource`]: a directory on the local filesystem
//! - [`MemorySource`]: an in-memory list, for embedding and tests

mod github;
mod local;
mod memory;

pub use github::{build_http_client, GitHubSource};
pub use local::LocalSource;
pub use memory::MemorySource;

use crate::config::{resolve_token, Config, SourceConfig};
use crate::SourceResult;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Opaque name of one remote document, such as `links.md`
pub type DocumentId = String;

/// Capability the synchronization core needs from a document store
///
/// Implementations must not retry on their own; retry policy belongs to
/// whoever wraps the core.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Enumerates candidate documents in source order
    ///
    /// Fails only with [`SourceError::SourceUnavailable`](crate::SourceError::SourceUnavailable).
    async fn list_documents(&self) -> SourceResult<Vec<DocumentId>>;

    /// Returns the raw text of one document
    async fn fetch_document(&self, id: &str) -> SourceResult<String>;

    /// Human-readable description used in log lines
    fn describe(&self) -> String {
        "document source".to_string()
    }
}

/// Builds the document source selected by the configuration
///
/// For GitHub sources the access token is read from the environment here.
pub fn build_source(config: &Config) -> crate::Result<Arc<dyn DocumentSource>> {
    let timeout = Duration::from_secs(config.sync.request_timeout_secs);

    let source: Arc<dyn DocumentSource> = match &config.source {
        SourceConfig::Github(github) => {
            let token = resolve_token(github)?;
            if token.is_none() {
                tracing::warn!(
                    "${} is not set, GitHub requests will be unauthenticated",
                    github.token_env
                );
            }
            Arc::new(GitHubSource::new(github, token, timeout)?)
        }
        SourceConfig::Local(local) => Arc::new(LocalSource::new(&local.root)),
    };

    tracing::debug!("Using {}", source.describe());
    Ok(source)
}

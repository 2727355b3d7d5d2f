//! Local directory document source

use crate::source::{DocumentId, DocumentSource};
use crate::{SourceError, SourceResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Serves the regular files of one directory as documents
///
/// Listing is sorted by file name so the menu order is stable between runs.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Identifiers are plain file names; anything that could walk out of the
/// root directory is rejected.
fn is_plain_name(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(|c: char| c == '/' || c == '\\')
}

#[async_trait]
impl DocumentSource for LocalSource {
    async fn list_documents(&self) -> SourceResult<Vec<DocumentId>> {
        let unavailable =
            |e: std::io::Error| SourceError::SourceUnavailable(format!("{}: {}", self.root.display(), e));

        let mut dir = tokio::fs::read_dir(&self.root).await.map_err(unavailable)?;
        let mut names = Vec::new();

        while let Some(entry) = dir.next_entry().await.map_err(unavailable)? {
            let file_type = entry.file_type().await.map_err(unavailable)?;
            if !file_type.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => tracing::debug!("Skipping non-UTF-8 file name {:?}", name),
            }
        }

        names.sort();
        Ok(names)
    }

    async fn fetch_document(&self, id: &str) -> SourceResult<String> {
        if !is_plain_name(id) {
            return Err(SourceError::NotFound(id.to_string()));
        }

        let bytes = tokio::fs::read(self.root.join(id))
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SourceError::NotFound(id.to_string()),
                _ => SourceError::SourceUnavailable(format!("{}: {}", id, e)),
            })?;

        String::from_utf8(bytes).map_err(|e| SourceError::DecodeError {
            id: id.to_string(),
            message: format!("not UTF-8: {}", e),
        })
    }

    fn describe(&self) -> String {
        format!("local:{}", self.root.display())
    }
}

//! GitHub contents API document source
//!
//! This module reads documents out of one directory of a GitHub repository:
//! - Building an HTTP client with the headers the API expects
//! - Listing the directory (`GET /repos/{owner}/{repo}/contents/{path}`)
//! - Fetching a file and decoding its base64 payload
//! - Classifying failures into the source error taxonomy

use crate::config::GitHubConfig;
use crate::source::{DocumentId, DocumentSource};
use crate::{ConfigError, SourceError, SourceResult};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// One item of a directory listing
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// A single file as returned by the contents API
#[derive(Debug, Deserialize)]
struct FileContent {
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

/// Builds an HTTP client configured for the GitHub REST API
///
/// # Arguments
///
/// * `token` - Optional access token, sent as a bearer credential
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(token: Option<&str>, timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
    headers.insert(
        "x-github-api-version",
        HeaderValue::from_static("2022-11-28"),
    );

    if let Some(token) = token {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => tracing::warn!("Access token is not a valid header value, ignoring it"),
        }
    }

    Client::builder()
        .user_agent(concat!("link-shelf/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Document source backed by a directory of a GitHub repository
#[derive(Debug, Clone)]
pub struct GitHubSource {
    client: Client,
    api_base: Url,
    owner: String,
    repo: String,
    dir: String,
}

impl GitHubSource {
    /// Creates a source for the repository directory described by `config`
    pub fn new(
        config: &GitHubConfig,
        token: Option<String>,
        timeout: Duration,
    ) -> crate::Result<Self> {
        let api_base = Url::parse(&config.api_base)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api-base: {}", e)))?;
        let client = build_http_client(token.as_deref(), timeout)?;

        Ok(Self {
            client,
            api_base,
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            dir: config.path.trim_matches('/').to_string(),
        })
    }

    /// Builds the contents API URL for a path relative to the configured directory
    fn contents_url(&self, name: Option<&str>) -> SourceResult<Url> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                SourceError::SourceUnavailable(format!(
                    "api base {} cannot carry a path",
                    self.api_base
                ))
            })?;
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"]);
            segments.extend(self.dir.split('/').filter(|s| !s.is_empty()));
            if let Some(name) = name {
                segments.push(name);
            }
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, SourceError> {
        self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_transport_error(&url, e))
    }
}

#[async_trait]
impl DocumentSource for GitHubSource {
    async fn list_documents(&self) -> SourceResult<Vec<DocumentId>> {
        let url = self.contents_url(None)?;
        let response = self.get(url.clone()).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SourceError::SourceUnavailable(format!(
                "listing {} returned HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let entries: Vec<ContentEntry> = response.json().await.map_err(|e| {
            SourceError::SourceUnavailable(format!("unexpected listing payload from {}: {}", url, e))
        })?;

        Ok(entries
            .into_iter()
            .filter(|entry| entry.kind == "file")
            .map(|entry| entry.name)
            .collect())
    }

    async fn fetch_document(&self, id: &str) -> SourceResult<String> {
        let url = self.contents_url(Some(id))?;
        let response = self.get(url).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(id.to_string()));
        }

        if !status.is_success() {
            return Err(SourceError::SourceUnavailable(format!(
                "fetching {} returned HTTP {}",
                id,
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::SourceUnavailable(format!("reading {}: {}", id, e)))?;

        let file: FileContent = serde_json::from_str(&body).map_err(|e| SourceError::DecodeError {
            id: id.to_string(),
            message: format!("invalid contents payload: {}", e),
        })?;

        decode_content(id, &file)
    }

    fn describe(&self) -> String {
        if self.dir.is_empty() {
            format!("github:{}/{}", self.owner, self.repo)
        } else {
            format!("github:{}/{}/{}", self.owner, self.repo, self.dir)
        }
    }
}

/// Turns a contents API file payload into text
fn decode_content(id: &str, file: &FileContent) -> SourceResult<String> {
    if file.encoding != "base64" {
        return Err(SourceError::DecodeError {
            id: id.to_string(),
            message: format!("unsupported encoding '{}'", file.encoding),
        });
    }

    // The API wraps base64 payloads at 60 columns
    let compact: String = file
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| SourceError::DecodeError {
            id: id.to_string(),
            message: format!("invalid base64: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|e| SourceError::DecodeError {
        id: id.to_string(),
        message: format!("not UTF-8: {}", e),
    })
}

/// Maps a transport failure onto the source error taxonomy
fn classify_transport_error(url: &Url, error: reqwest::Error) -> SourceError {
    if error.is_timeout() {
        SourceError::SourceUnavailable(format!("request to {} timed out", url))
    } else if error.is_connect() {
        SourceError::SourceUnavailable(format!("connection to {} failed", url))
    } else {
        SourceError::SourceUnavailable(format!("request to {} failed: {}", url, error))
    }
}

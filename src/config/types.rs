use serde::Deserialize;

/// Main configuration structure for Link-Shelf
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Where documents come from
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SourceConfig {
    /// A directory in a GitHub repository, read through the contents API
    Github(GitHubConfig),

    /// A directory on the local filesystem
    Local(LocalConfig),
}

/// GitHub repository contents source
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Directory inside the repository; empty means the root
    #[serde(default)]
    pub path: String,

    /// Base URL of the REST API
    #[serde(rename = "api-base", default = "default_api_base")]
    pub api_base: String,

    /// Name of the environment variable holding the access token
    #[serde(rename = "token-env", default = "default_token_env")]
    pub token_env: String,
}

/// Local directory source
#[derive(Debug, Clone, Deserialize)]
pub struct LocalConfig {
    /// Directory whose files make up the menu
    pub root: String,
}

/// How the fetch worker decides a document is unchanged
///
/// Both modes compare counts, not content, and will miss edits that keep
/// the compared count the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalenessCheck {
    /// New line count against the line count the cached snapshot was parsed from
    #[default]
    LineCount,

    /// New line count against the cached snapshot's entry count
    EntryCount,
}

/// Synchronization behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Only listed documents ending with this suffix join the menu
    pub extension: String,

    /// Staleness comparison used by fetch workers
    pub staleness: StalenessCheck,

    /// Seconds between refreshes in watch mode
    #[serde(rename = "refresh-interval-secs")]
    pub refresh_interval_secs: u64,

    /// Per-request timeout for the document source (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            extension: ".md".to_string(),
            staleness: StalenessCheck::default(),
            refresh_interval_secs: 300,
            request_timeout_secs: 30,
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

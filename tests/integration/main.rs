//! Integration tests for Link-Shelf
//!
//! `github_source` drives the GitHub contents API client against a wiremock
//! server; `sync_cycle` runs full cycles end-to-end over real sources.

mod github_source;
mod sync_cycle;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use link_shelf::config::GitHubConfig;
use serde_json::{json, Value};

/// GitHub source configuration pointing at a mock server
pub fn github_config(api_base: &str, path: &str) -> GitHubConfig {
    GitHubConfig {
        owner: "octo".to_string(),
        repo: "bookmarks".to_string(),
        path: path.to_string(),
        api_base: api_base.to_string(),
        token_env: "LINK_SHELF_TEST_TOKEN".to_string(),
    }
}

/// A contents API directory listing
pub fn listing(entries: &[(&str, &str)]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|(name, kind)| json!({ "name": name, "type": kind, "path": name }))
            .collect(),
    )
}

/// A contents API file body, base64-wrapped the way the API sends it
pub fn file_body(name: &str, text: &str) -> Value {
    let encoded = STANDARD.encode(text);
    let wrapped = encoded
        .as_bytes()
        .chunks(60)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("\n");

    json!({
        "name": name,
        "type": "file",
        "encoding": "base64",
        "content": format!("{}\n", wrapped),
    })
}

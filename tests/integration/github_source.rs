//! GitHub contents API client against a mock server

use crate::{file_body, github_config, listing};
use link_shelf::source::{DocumentSource, GitHubSource};
use link_shelf::SourceError;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer, dir: &str) -> GitHubSource {
    GitHubSource::new(&github_config(&server.uri(), dir), None, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_listing_keeps_only_files() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/bookmarks/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[
            ("rust.md", "file"),
            ("images", "dir"),
            ("README.txt", "file"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, "");
    let ids = source.list_documents().await.unwrap();

    assert_eq!(ids, vec!["rust.md", "README.txt"]);
}

#[tokio::test]
async fn test_listing_uses_configured_directory() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/bookmarks/contents/lists/2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[("a.md", "file")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, "/lists/2024/");
    assert_eq!(source.list_documents().await.unwrap(), vec!["a.md"]);
}

#[tokio::test]
async fn test_listing_server_error_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/bookmarks/contents"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, "");
    let err = source.list_documents().await.unwrap_err();

    assert!(matches!(err, SourceError::SourceUnavailable(_)));
}

#[tokio::test]
async fn test_listing_with_unexpected_payload_is_unavailable() {
    let mock_server = MockServer::start().await;

    // A file path answers with an object, not an array
    Mock::given(method("GET"))
        .and(path("/repos/octo/bookmarks/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_body("a.md", "x")))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, "");
    let err = source.list_documents().await.unwrap_err();

    assert!(matches!(err, SourceError::SourceUnavailable(_)));
}

#[tokio::test]
async fn test_fetch_decodes_wrapped_base64() {
    let mock_server = MockServer::start().await;
    let text = "# Reading\n[The Book](https://doc.rust-lang.org/book/)\n".repeat(10);

    Mock::given(method("GET"))
        .and(path("/repos/octo/bookmarks/contents/rust.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_body("rust.md", &text)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, "");
    let fetched = source.fetch_document("rust.md").await.unwrap();

    assert_eq!(fetched, text);
}

#[tokio::test]
async fn test_fetch_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/bookmarks/contents/a.md"))
        .and(header("authorization", "Bearer ghp_testtoken"))
        .and(header("x-github-api-version", "2022-11-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_body("a.md", "[A](http://a)")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = GitHubSource::new(
        &github_config(&mock_server.uri(), ""),
        Some("ghp_testtoken".to_string()),
        Duration::from_secs(5),
    )
    .unwrap();

    assert_eq!(source.fetch_document("a.md").await.unwrap(), "[A](http://a)");
}

#[tokio::test]
async fn test_fetch_missing_document_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/bookmarks/contents/gone.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, "");
    let err = source.fetch_document("gone.md").await.unwrap_err();

    assert_eq!(err, SourceError::NotFound("gone.md".to_string()));
}

#[tokio::test]
async fn test_fetch_server_error_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/bookmarks/contents/a.md"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, "");
    let err = source.fetch_document("a.md").await.unwrap_err();

    assert!(matches!(err, SourceError::SourceUnavailable(_)));
}

#[tokio::test]
async fn test_fetch_bad_base64_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/bookmarks/contents/a.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "a.md",
            "type": "file",
            "encoding": "base64",
            "content": "!!!not base64!!!",
        })))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, "");
    let err = source.fetch_document("a.md").await.unwrap_err();

    assert!(matches!(err, SourceError::DecodeError { ref id, .. } if id == "a.md"));
}

#[tokio::test]
async fn test_fetch_non_json_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/bookmarks/contents/a.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, "");
    let err = source.fetch_document("a.md").await.unwrap_err();

    assert!(matches!(err, SourceError::DecodeError { .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_unavailable() {
    // Nothing listens on the discard port
    let config = github_config("http://127.0.0.1:9", "");
    let source = GitHubSource::new(&config, None, Duration::from_secs(2)).unwrap();

    let err = source.list_documents().await.unwrap_err();
    assert!(matches!(err, SourceError::SourceUnavailable(_)));
}

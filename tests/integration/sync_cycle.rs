//! End-to-end sync cycles over the GitHub and local sources

use crate::{file_body, github_config, listing};
use link_shelf::config::{load_config, SyncConfig};
use link_shelf::output::format_markdown_page;
use link_shelf::source::{build_source, DocumentSource, GitHubSource};
use link_shelf::{CacheStore, CyclePhase, Entry, Orchestrator, Shelf, SyncOutcome};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_PATH: &str = "/repos/octo/bookmarks/contents";

async fn mount_listing(server: &MockServer, names: &[&str]) {
    let entries: Vec<(&str, &str)> = names.iter().map(|name| (*name, "file")).collect();
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&entries)))
        .mount(server)
        .await;
}

async fn mount_document(server: &MockServer, name: &str, text: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{}/{}", LISTING_PATH, name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_body(name, text)))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn github_orchestrator(server: &MockServer) -> Orchestrator {
    let source: Arc<dyn DocumentSource> = Arc::new(
        GitHubSource::new(&github_config(&server.uri(), ""), None, Duration::from_secs(5)).unwrap(),
    );
    Orchestrator::from_config(&SyncConfig::default(), source, Arc::new(CacheStore::new()))
}

#[tokio::test]
async fn test_github_cycle_lifecycle() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server, &["a.md", "b.md", "notes.txt"]).await;
    mount_document(&mock_server, "a.md", "# Title\n[Foo](http://x)\nplain line\n").await;
    mount_status(&mock_server, &format!("{}/b.md", LISTING_PATH), 500).await;

    let (shelf, report) = Shelf::start(github_orchestrator(&mock_server)).await.unwrap();

    // First cycle: a.md published, b.md failed in isolation, notes.txt filtered out
    assert_eq!(report.menu(), vec!["a.md", "b.md"]);
    assert_eq!(report.outcome("a.md"), Some(SyncOutcome::Updated));
    assert_eq!(report.outcome("b.md"), Some(SyncOutcome::Failed));
    assert_eq!(shelf.orchestrator().phase(), CyclePhase::Idle);

    let first = shelf.cache().get("a.md").unwrap();
    assert_eq!(first.entries, vec![Entry::new("Foo", "http://x")]);
    assert!(!shelf.cache().contains("b.md"));

    // Second cycle over identical text leaves the snapshot in place
    let response = shelf.refresh().await;
    assert!(response.is_ok());
    let summary = response.summary.unwrap();
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.failed_documents, vec!["b.md"]);
    assert!(Arc::ptr_eq(&first, &shelf.cache().get("a.md").unwrap()));

    // An added line is picked up
    mock_server.reset().await;
    mount_listing(&mock_server, &["a.md", "b.md"]).await;
    mount_document(
        &mock_server,
        "a.md",
        "# Title\n[Foo](http://x)\n[Bar](http://y)\nplain line\n",
    )
    .await;
    mount_document(&mock_server, "b.md", "[Baz](http://z)").await;

    let response = shelf.refresh().await;
    assert!(response.is_ok());
    assert_eq!(response.summary.as_ref().unwrap().updated, 2);

    let page = shelf.page_data();
    assert_eq!(page.len(), 2);
    assert_eq!(
        page[0].entries,
        vec![Entry::new("Foo", "http://x"), Entry::new("Bar", "http://y")]
    );
    assert_eq!(page[1].entries, vec![Entry::new("Baz", "http://z")]);
}

#[tokio::test]
async fn test_github_discovery_failure_keeps_previous_state() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server, &["a.md"]).await;
    mount_document(&mock_server, "a.md", "[A](http://a)").await;

    let (shelf, _) = Shelf::start(github_orchestrator(&mock_server)).await.unwrap();
    let before = shelf.cache().get("a.md").unwrap();

    mock_server.reset().await;
    mount_status(&mock_server, LISTING_PATH, 503).await;

    let response = shelf.refresh().await;

    assert_eq!(response.status, 503);
    assert!(response.summary.is_none());
    assert_eq!(shelf.menu(), vec!["a.md"]);
    assert!(Arc::ptr_eq(&before, &shelf.cache().get("a.md").unwrap()));
    assert_eq!(shelf.orchestrator().phase(), CyclePhase::Idle);
}

#[tokio::test]
async fn test_github_startup_fails_without_listing() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, LISTING_PATH, 500).await;

    let result = Shelf::start(github_orchestrator(&mock_server)).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_removed_document_leaves_menu_but_stays_cached() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server, &["a.md", "b.md"]).await;
    mount_document(&mock_server, "a.md", "[A](http://a)").await;
    mount_document(&mock_server, "b.md", "[B](http://b)").await;

    let (shelf, _) = Shelf::start(github_orchestrator(&mock_server)).await.unwrap();

    mock_server.reset().await;
    mount_listing(&mock_server, &["a.md"]).await;
    mount_document(&mock_server, "a.md", "[A](http://a)").await;

    let response = shelf.refresh().await;
    assert!(response.is_ok());

    assert_eq!(shelf.menu(), vec!["a.md"]);
    assert!(shelf.cache().contains("b.md"));
    let names: Vec<String> = shelf.page_data().iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, vec!["a.md"]);
}

#[tokio::test]
async fn test_local_config_end_to_end() {
    let docs = TempDir::new().unwrap();
    fs::write(
        docs.path().join("rust.md"),
        "# Rust\n[The Book](https://doc.rust-lang.org/book/)\n[Tokio](https://tokio.rs)\n",
    )
    .unwrap();
    fs::write(docs.path().join("empty.md"), "no links here\n").unwrap();
    fs::write(docs.path().join("skip.txt"), "[Nope](http://nope)\n").unwrap();

    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("shelf.toml");
    fs::write(
        &config_path,
        format!(
            "[source]\nkind = \"local\"\nroot = {:?}\n\n[sync]\nrefresh-interval-secs = 60\n",
            docs.path().display().to_string()
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let source = build_source(&config).unwrap();
    let (shelf, report) = Shelf::start_with_config(&config, source).await.unwrap();

    assert_eq!(report.menu(), vec!["empty.md", "rust.md"]);
    assert_eq!(report.count(SyncOutcome::Updated), 2);

    let page = shelf.page_data();
    assert!(page[0].entries.is_empty());
    assert_eq!(page[1].entries.len(), 2);
    assert_eq!(page[1].entries[1], Entry::new("Tokio", "https://tokio.rs"));

    let markdown = format_markdown_page(&page);
    assert!(markdown.contains("https://doc.rust-lang.org/book/"));
    assert!(!markdown.contains("http://nope"));

    // Editing a file on disk is picked up by the next refresh
    fs::write(docs.path().join("empty.md"), "now\n[One](http://one)\n").unwrap();
    let response = shelf.refresh().await;
    assert!(response.is_ok());
    assert_eq!(
        shelf.cache().get("empty.md").unwrap().entries,
        vec![Entry::new("One", "http://one")]
    );
}

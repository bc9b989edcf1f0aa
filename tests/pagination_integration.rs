//! Integration tests for the pagination driver.
//!
//! A wiremock server plays both the catalog listing endpoint and the book
//! file host.

use gutendex_core::{
    CatalogClient, CatalogQuery, DownloadManager, HttpClient, HttpTimeouts, PLAIN_TEXT_FORMAT,
    PaginationDriver, RunConfig, StopReason, build_http_client,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn driver() -> PaginationDriver {
    let http = build_http_client(HttpTimeouts::default()).expect("client should build");
    PaginationDriver::new(
        CatalogClient::new(http.clone()),
        DownloadManager::new(HttpClient::new(http)),
    )
}

fn run_config(server: &MockServer, temp_dir: &TempDir, target_count: usize) -> RunConfig {
    RunConfig {
        base_url: format!("{}/books/", server.uri()),
        query: CatalogQuery::default(),
        target_count,
        download_folder: temp_dir.path().join("gutenberg_books"),
    }
}

fn book(server: &MockServer, title: &str, file: &str) -> Value {
    json!({
        "title": title,
        "formats": { PLAIN_TEXT_FORMAT: format!("{}/files/{file}", server.uri()) }
    })
}

async fn mount_file(server: &MockServer, file: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/files/{file}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_first_page(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/books/"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/books/"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_page_with_null_next_downloads_and_stops() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mount_file(&server, "1.txt", "It is proposed in this Essay...").await;
    mount_first_page(
        &server,
        json!({ "results": [book(&server, "On Liberty", "1.txt")], "next": null }),
    )
    .await;

    let config = run_config(&server, &temp_dir, 200);
    let summary = driver().run(&config).await;

    assert_eq!(summary.downloaded_count, 1);
    assert_eq!(summary.pages_fetched, 1);
    assert_eq!(summary.files_written, 1);
    assert_eq!(summary.stop_reason, StopReason::LastPage);
    let written = std::fs::read_to_string(config.download_folder.join("On Liberty.txt"))
        .expect("book should be written");
    assert_eq!(written, "It is proposed in this Essay...");
}

#[tokio::test]
async fn test_follows_next_links_until_exhausted() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mount_file(&server, "a.txt", "a").await;
    mount_file(&server, "b.txt", "b").await;
    mount_file(&server, "c.txt", "c").await;
    mount_first_page(
        &server,
        json!({
            "results": [book(&server, "Book A", "a.txt"), book(&server, "Book B", "b.txt")],
            "next": format!("{}/books/?page=2&topic=philosophy", server.uri())
        }),
    )
    .await;
    mount_page(
        &server,
        "2",
        json!({ "results": [book(&server, "Book C", "c.txt")], "next": null }),
    )
    .await;

    let config = run_config(&server, &temp_dir, 200);
    let summary = driver().run(&config).await;

    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(summary.downloaded_count, 3);
    assert_eq!(summary.files_written, 3);
    assert_eq!(summary.stop_reason, StopReason::LastPage);
    for name in ["Book A.txt", "Book B.txt", "Book C.txt"] {
        assert!(config.download_folder.join(name).is_file(), "{name} missing");
    }
}

#[tokio::test]
async fn test_stops_when_target_reached() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mount_file(&server, "a.txt", "a").await;
    mount_file(&server, "b.txt", "b").await;
    mount_first_page(
        &server,
        json!({
            "results": [book(&server, "Book A", "a.txt"), book(&server, "Book B", "b.txt")],
            "next": format!("{}/books/?page=2", server.uri())
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/books/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [], "next": null})))
        .expect(0)
        .mount(&server)
        .await;

    let config = run_config(&server, &temp_dir, 2);
    let summary = driver().run(&config).await;

    assert_eq!(summary.downloaded_count, 2);
    assert_eq!(summary.pages_fetched, 1);
    assert_eq!(summary.stop_reason, StopReason::TargetReached);
}

#[tokio::test]
async fn test_count_may_overshoot_target_by_page_size() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mount_file(&server, "a.txt", "a").await;
    mount_file(&server, "b.txt", "b").await;
    mount_file(&server, "c.txt", "c").await;
    mount_first_page(
        &server,
        json!({
            "results": [
                book(&server, "Book A", "a.txt"),
                book(&server, "Book B", "b.txt"),
                book(&server, "Book C", "c.txt")
            ],
            "next": format!("{}/books/?page=2", server.uri())
        }),
    )
    .await;

    let config = run_config(&server, &temp_dir, 1);
    let summary = driver().run(&config).await;

    assert_eq!(summary.downloaded_count, 3);
    assert_eq!(summary.stop_reason, StopReason::TargetReached);
}

#[tokio::test]
async fn test_zero_target_fetches_no_pages() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [], "next": null})))
        .expect(0)
        .mount(&server)
        .await;

    let config = run_config(&server, &temp_dir, 0);
    let summary = driver().run(&config).await;

    assert_eq!(summary.downloaded_count, 0);
    assert_eq!(summary.pages_fetched, 0);
    assert_eq!(summary.stop_reason, StopReason::TargetReached);
    assert!(!config.download_folder.exists());
}

#[tokio::test]
async fn test_listing_404_terminates_immediately() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    Mock::given(method("GET"))
        .and(path("/books/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let config = run_config(&server, &temp_dir, 200);
    let summary = driver().run(&config).await;

    assert_eq!(summary.downloaded_count, 0);
    assert_eq!(summary.pages_fetched, 0);
    assert_eq!(summary.stop_reason, StopReason::FetchFailed);
}

#[tokio::test]
async fn test_failure_on_second_page_keeps_first_page_count() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mount_file(&server, "a.txt", "a").await;
    mount_first_page(
        &server,
        json!({
            "results": [book(&server, "Book A", "a.txt")],
            "next": format!("{}/books/?page=2", server.uri())
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/books/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = run_config(&server, &temp_dir, 200);
    let summary = driver().run(&config).await;

    assert_eq!(summary.downloaded_count, 1);
    assert_eq!(summary.pages_fetched, 1);
    assert_eq!(summary.stop_reason, StopReason::FetchFailed);
}

#[tokio::test]
async fn test_empty_results_terminate_loop() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mount_first_page(
        &server,
        json!({ "results": [], "next": format!("{}/books/?page=2", server.uri()) }),
    )
    .await;

    let config = run_config(&server, &temp_dir, 200);
    let summary = driver().run(&config).await;

    assert_eq!(summary.downloaded_count, 0);
    assert_eq!(summary.pages_fetched, 1);
    assert_eq!(summary.stop_reason, StopReason::EmptyPage);
}

#[tokio::test]
async fn test_item_without_plain_text_still_counts() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mount_first_page(
        &server,
        json!({
            "results": [{
                "title": "Pictures Only",
                "formats": { "text/html": format!("{}/files/p.html", server.uri()) }
            }],
            "next": null
        }),
    )
    .await;

    let config = run_config(&server, &temp_dir, 200);
    let summary = driver().run(&config).await;

    assert_eq!(summary.downloaded_count, 1);
    assert_eq!(summary.files_written, 0);
    assert_eq!(summary.missing_format, 1);
    assert!(!config.download_folder.join("Pictures Only.txt").exists());
}

#[tokio::test]
async fn test_second_run_skips_existing_files() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    Mock::given(method("GET"))
        .and(path("/files/1.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("text"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/books/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [book(&server, "On Liberty", "1.txt")],
            "next": null
        })))
        .expect(2)
        .mount(&server)
        .await;

    let config = run_config(&server, &temp_dir, 200);
    let driver = driver();
    let first = driver.run(&config).await;
    let second = driver.run(&config).await;

    assert_eq!(first.files_written, 1);
    assert_eq!(second.files_written, 0);
    assert_eq!(second.skipped_existing, 1);
    assert_eq!(second.downloaded_count, 1);
}

#[tokio::test]
async fn test_null_or_empty_format_skips_only_that_item() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mount_file(&server, "good.txt", "good").await;
    mount_first_page(
        &server,
        json!({
            "results": [
                { "title": "Null Format", "formats": { PLAIN_TEXT_FORMAT: null } },
                { "title": "Empty Format", "formats": { PLAIN_TEXT_FORMAT: "" } },
                book(&server, "Good Book", "good.txt")
            ],
            "next": null
        }),
    )
    .await;

    let config = run_config(&server, &temp_dir, 200);
    let summary = driver().run(&config).await;

    assert_eq!(summary.stop_reason, StopReason::LastPage);
    assert_eq!(summary.downloaded_count, 3);
    assert_eq!(summary.missing_format, 2);
    assert_eq!(summary.failed, 0);
    assert!(config.download_folder.join("Good Book.txt").is_file());
}

//! Tests for the page web server routes

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use pagebot::core::web_server::router;
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

fn pages_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("page1.html"), "<h1>Page one</h1>").unwrap();
    fs::write(dir.path().join("page2.html"), "<h1>Page two</h1>").unwrap();
    dir
}

async fn get(dir: &TempDir, uri: &str) -> (StatusCode, String) {
    let response = router(dir.path())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_root_reports_running() {
    let dir = pages_dir();
    let (status, body) = get(&dir, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Telegram bot is running.");
}

#[tokio::test]
async fn test_serves_pages_with_and_without_extension() {
    let dir = pages_dir();

    let (status, body) = get(&dir, "/page1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>Page one</h1>");

    let (status, body) = get(&dir, "/page2.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>Page two</h1>");
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let dir = pages_dir();
    let (status, body) = get(&dir, "/page3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Page not found");
}

#[tokio::test]
async fn test_missing_page_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = get(&dir, "/page1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"));
}

#[tokio::test]
async fn test_health_reports_ok() {
    let dir = pages_dir();
    let (status, body) = get(&dir, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["uptime_secs"].is_u64());
}

#[tokio::test]
async fn test_metrics_exposes_counters() {
    pagebot::core::metrics::init_metrics();
    pagebot::core::metrics::record_menu_action(Some(pagebot::Action::Start));

    let dir = pages_dir();
    let (status, body) = get(&dir, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("pagebot_menu_actions_total"));
}

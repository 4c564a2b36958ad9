//! HTTP server for the linked pages.
//!
//! Serves page1.html / page2.html from PAGES_DIR at /page1 and /page2, plus
//! health and metrics endpoints. In webhook mode the same router is merged
//! with the update receiver and shares its listener.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::Instant;

/// Shared state for the web server.
#[derive(Clone)]
struct WebState {
    pages_dir: Arc<PathBuf>,
    start_time: Instant,
}

/// Builds the page router rooted at `pages_dir`.
pub fn router(pages_dir: impl Into<PathBuf>) -> Router {
    let state = WebState {
        pages_dir: Arc::new(pages_dir.into()),
        start_time: Instant::now(),
    };

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/{page}", get(page_handler))
        .with_state(state)
}

/// Start the page server on its own listener (polling mode).
pub async fn start_web_server(port: u16, pages_dir: impl Into<PathBuf>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(pages_dir);

    log::info!("Starting web server on http://{}", addr);
    log::info!("  /page1, /page2 - Linked pages (HTML)");
    log::info!("  /health        - Health check");
    log::info!("  /metrics       - Prometheus metrics");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Maps a request path segment to the file it serves.
pub fn page_file(page: &str) -> Option<&'static str> {
    match page {
        "page1" | "page1.html" => Some("page1.html"),
        "page2" | "page2.html" => Some("page2.html"),
        _ => None,
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Page not found"}))).into_response()
}

/// GET / — liveness text.
async fn root_handler() -> &'static str {
    "Telegram bot is running."
}

/// GET /health — simple health check.
async fn health_handler(State(state): State<WebState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

/// GET /metrics — Prometheus text format.
async fn metrics_handler() -> Response {
    match crate::core::metrics::render() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => {
            log::error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics").into_response()
        }
    }
}

/// GET /{page} — one of the two HTML pages.
async fn page_handler(Path(page): Path<String>, State(state): State<WebState>) -> Response {
    let Some(file_name) = page_file(&page) else {
        return not_found();
    };

    let path = state.pages_dir.join(file_name);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Html(content).into_response(),
        Err(e) => {
            log::warn!("Page {} unavailable at {}: {}", page, path.display(), e);
            not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_file_mapping() {
        assert_eq!(page_file("page1"), Some("page1.html"));
        assert_eq!(page_file("page2.html"), Some("page2.html"));
        assert_eq!(page_file("page3"), None);
        assert_eq!(page_file("../secret"), None);
        assert_eq!(page_file(""), None);
    }
}

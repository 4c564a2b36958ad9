//! Update transports: long polling and webhook.
//!
//! Both variants drive the same handler tree; they differ only in how
//! updates reach the dispatcher and in who owns the HTTP listener.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::{Polling, webhooks};
use tokio::net::TcpListener;
use tokio::time::sleep;
use url::Url;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::core::web_server;
use crate::telegram::Bot;
use crate::telegram::handlers::HandlerError;

/// Fixed paths served by the page router; the webhook must not shadow them.
const RESERVED_PATHS: [&str; 3] = ["/", "/health", "/metrics"];

/// True when `path` is already answered by the page router.
fn collides_with_page_server(path: &str) -> bool {
    RESERVED_PATHS.contains(&path) || web_server::page_file(path.trim_start_matches('/')).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// getUpdates long polling; the page server gets its own listener.
    Polling,
    /// Telegram posts updates to `url`; one listener serves updates and pages.
    Webhook { url: Url },
}

impl Transport {
    /// Picks the transport for `run --webhook`. Webhook mode requires WEBHOOK_URL.
    pub fn from_flag(use_webhook: bool) -> AppResult<Self> {
        if !use_webhook {
            return Ok(Transport::Polling);
        }
        let raw = config::WEBHOOK_URL
            .clone()
            .ok_or_else(|| AppError::Config("webhook mode requires WEBHOOK_URL".to_string()))?;
        Self::webhook(&raw)
    }

    pub fn webhook(raw_url: &str) -> AppResult<Self> {
        let url = Url::parse(raw_url)?;
        if collides_with_page_server(url.path()) {
            return Err(AppError::Config(format!(
                "WEBHOOK_URL path {} collides with a page server route",
                url.path()
            )));
        }
        Ok(Transport::Webhook { url })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Transport::Polling => "polling",
            Transport::Webhook { .. } => "webhook",
        }
    }

    /// Runs the dispatcher until Ctrl-C (or until restarts are exhausted).
    pub async fn run(self, bot: Bot, handler: UpdateHandler<HandlerError>, port: u16, pages_dir: PathBuf) -> AppResult<()> {
        match self {
            Transport::Polling => run_polling(bot, handler, port, pages_dir).await,
            Transport::Webhook { url } => run_webhook(bot, handler, url, port, pages_dir).await,
        }
    }
}

async fn log_unhandled(update: Arc<Update>) {
    log::debug!("Ignoring update {}: no handler matched", update.id.0);
}

async fn run_polling(bot: Bot, handler: UpdateHandler<HandlerError>, port: u16, pages_dir: PathBuf) -> AppResult<()> {
    tokio::spawn(async move {
        if let Err(e) = web_server::start_web_server(port, pages_dir).await {
            log::error!("Web server error: {}", e);
        }
    });

    log::info!("Starting bot in long polling mode");
    let mut retry_count = 0;
    let max_retries = config::retry::MAX_DISPATCHER_RETRIES;

    // Run the dispatcher with retry logic
    loop {
        let bot_clone = bot.clone();
        let handler_clone = handler.clone();

        // Separate task so a panic inside the dispatcher surfaces through the JoinHandle
        let handle = tokio::spawn(async move {
            let listener = Polling::builder(bot_clone.clone())
                .timeout(config::polling::timeout())
                .drop_pending_updates()
                .build();

            Dispatcher::builder(bot_clone, handler_clone)
                .default_handler(log_unhandled)
                .enable_ctrlc_handler()
                .build()
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await
        });

        match handle.await {
            Ok(()) => {
                log::info!("Dispatcher shutdown gracefully");
                break;
            }
            Err(join_err) if join_err.is_panic() => {
                log::error!("Dispatcher panicked: {}", join_err);
                if retry_count >= max_retries {
                    log::error!("Max retries reached after panic. Exiting...");
                    break;
                }
                retry_count += 1;
                let delay = config::retry::backoff(retry_count).max(config::retry::dispatcher_delay());
                log::info!(
                    "Restarting dispatcher in {}s (attempt {}/{})...",
                    delay.as_secs(),
                    retry_count,
                    max_retries
                );
                sleep(delay).await;
            }
            Err(join_err) => {
                log::warn!("Dispatcher task was cancelled: {}", join_err);
                break;
            }
        }
    }

    Ok(())
}

async fn run_webhook(
    bot: Bot,
    handler: UpdateHandler<HandlerError>,
    url: Url,
    port: u16,
    pages_dir: PathBuf,
) -> AppResult<()> {
    let address = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("Starting bot in webhook mode at {}", url);

    // Registers the webhook with Telegram
    let options = webhooks::Options::new(address, url).drop_pending_updates();
    let (listener, stop_flag, webhook_router) = webhooks::axum_to_router(bot.clone(), options).await?;
    let app = webhook_router.merge(web_server::router(pages_dir));

    let tcp_listener = TcpListener::bind(address).await?;
    log::info!("Listening for updates and page requests on http://{}", address);

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(tcp_listener, app).with_graceful_shutdown(stop_flag).await {
            log::error!("Webhook server error: {}", e);
        }
    });

    Dispatcher::builder(bot.clone(), handler)
        .default_handler(log_unhandled)
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Shutting down gracefully...");
    if let Err(e) = server.await {
        log::warn!("Webhook server task ended abnormally: {}", e);
    }
    if let Err(e) = bot.delete_webhook().await {
        log::warn!("Failed to delete webhook: {}", e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polling_without_flag() {
        assert_eq!(Transport::from_flag(false).unwrap(), Transport::Polling);
        assert_eq!(Transport::Polling.name(), "polling");
    }

    #[test]
    fn test_webhook_url_parsed() {
        let transport = Transport::webhook("https://bot.example.com/webhook").unwrap();
        assert_eq!(transport.name(), "webhook");
        match transport {
            Transport::Webhook { url } => assert_eq!(url.path(), "/webhook"),
            Transport::Polling => unreachable!(),
        }
    }

    #[test]
    fn test_webhook_rejects_reserved_paths() {
        assert!(matches!(
            Transport::webhook("https://bot.example.com/"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            Transport::webhook("https://bot.example.com/health"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            Transport::webhook("https://bot.example.com/metrics"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_webhook_rejects_page_paths() {
        for path in ["/page1", "/page2", "/page1.html", "/page2.html"] {
            let raw = format!("https://bot.example.com{}", path);
            assert!(
                matches!(Transport::webhook(&raw), Err(AppError::Config(_))),
                "{} must stay a page route",
                path
            );
        }
        assert!(Transport::webhook("https://bot.example.com/page3").is_ok());
        assert!(Transport::webhook("https://bot.example.com/hooks/page1").is_ok());
    }

    #[test]
    fn test_webhook_rejects_invalid_url() {
        assert!(matches!(Transport::webhook("not a url"), Err(AppError::Url(_))));
    }
}

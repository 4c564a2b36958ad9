//! Configuration read from the process environment.
//!
//! Every value is read once, on first access; `.env` must be loaded before
//! any of them is touched.

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

use crate::core::error::{AppError, AppResult};

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Link sent for the first page
/// Read from PAGE1_URL environment variable
pub static PAGE1_URL: Lazy<String> =
    Lazy::new(|| env::var("PAGE1_URL").unwrap_or_else(|_| "https://example.com/page1.html".to_string()));

/// Link sent for the second page
/// Read from PAGE2_URL environment variable
pub static PAGE2_URL: Lazy<String> =
    Lazy::new(|| env::var("PAGE2_URL").unwrap_or_else(|_| "https://example.com/page2.html".to_string()));

/// Public URL Telegram posts updates to in webhook mode
/// Read from WEBHOOK_URL environment variable
pub static WEBHOOK_URL: Lazy<Option<String>> =
    Lazy::new(|| env::var("WEBHOOK_URL").ok().filter(|url| !url.trim().is_empty()));

/// Custom Bot API server (e.g. a local telegram-bot-api instance)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Port of the HTTP listener (pages, health, metrics and, in webhook mode, updates)
/// Read from PORT environment variable
/// Default: 8080
pub static PORT: Lazy<u16> = Lazy::new(|| {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080)
});

/// Directory holding page1.html and page2.html
/// Read from PAGES_DIR environment variable
/// Default: public
pub static PAGES_DIR: Lazy<String> = Lazy::new(|| env::var("PAGES_DIR").unwrap_or_else(|_| "public".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: pagebot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "pagebot.log".to_string()));

/// Minimum log level (error, warn, info, debug, trace)
/// Read from LOG_LEVEL environment variable
/// Default: info
pub static LOG_LEVEL: Lazy<String> = Lazy::new(|| env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

/// Returns the bot token, or an error when neither variable is set.
pub fn require_bot_token() -> AppResult<String> {
    let token = BOT_TOKEN.trim();
    if token.is_empty() {
        return Err(AppError::MissingToken);
    }
    Ok(token.to_string())
}

/// The error of a `.env` load worth reporting: a missing file is not one.
pub fn env_file_problem<T>(result: &dotenvy::Result<T>) -> Option<&dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Timeout of Bot API HTTP requests (in seconds).
    /// Must exceed the long-poll timeout.
    pub const TIMEOUT_SECS: u64 = 60;

    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }
}

/// Long polling configuration
pub mod polling {
    use super::Duration;
    use once_cell::sync::Lazy;

    /// How long Telegram holds a getUpdates request open (in seconds)
    /// Read from POLL_TIMEOUT_SECS environment variable
    /// Default: 10
    pub static TIMEOUT_SECS: Lazy<u32> = Lazy::new(|| {
        std::env::var("POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10)
    });

    pub fn timeout() -> Duration {
        Duration::from_secs(u64::from(*TIMEOUT_SECS))
    }
}

/// Retry configuration
pub mod retry {
    use super::Duration;

    /// Maximum dispatcher restarts after a panic
    pub const MAX_DISPATCHER_RETRIES: u32 = 5;

    /// Delay between dispatcher restarts (in seconds)
    pub const DISPATCHER_DELAY_SECS: u64 = 5;

    /// Maximum get_me attempts while the Bot API comes up
    pub const STARTUP_MAX_RETRIES: u32 = 60;

    /// Delay between get_me attempts (in seconds)
    pub const STARTUP_DELAY_SECS: u64 = 5;

    pub fn dispatcher_delay() -> Duration {
        Duration::from_secs(DISPATCHER_DELAY_SECS)
    }

    pub fn startup_delay() -> Duration {
        Duration::from_secs(STARTUP_DELAY_SECS)
    }

    /// Exponential backoff for the given attempt, capped at 60 seconds.
    pub fn backoff(attempt: u32) -> Duration {
        let secs = 2u64.saturating_pow(attempt.min(6));
        Duration::from_secs(secs.min(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_and_caps() {
        assert_eq!(retry::backoff(0), Duration::from_secs(1));
        assert_eq!(retry::backoff(1), Duration::from_secs(2));
        assert_eq!(retry::backoff(3), Duration::from_secs(8));
        assert_eq!(retry::backoff(6), Duration::from_secs(60));
        assert_eq!(retry::backoff(40), Duration::from_secs(60));
    }

    #[test]
    fn test_env_file_problem_ignores_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = dotenvy::from_path(dir.path().join("absent.env"));
        assert!(result.is_err());
        assert!(env_file_problem(&result).is_none());
    }

    #[test]
    fn test_env_file_problem_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.env");
        std::fs::write(&path, "PAGEBOT_TEST_BROKEN=\"unterminated\n").unwrap();

        let result = dotenvy::from_path(&path);
        assert!(env_file_problem(&result).is_some());
    }

    #[test]
    fn test_network_timeout_exceeds_poll_timeout() {
        assert!(network::timeout() > Duration::from_secs(10));
    }
}

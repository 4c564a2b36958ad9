//! Bot initialization utilities
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Startup probing of the Bot API

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::types::Me;
use teloxide::utils::command::BotCommands;
use tokio::time::sleep;

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show the page menu")]
    Start,
    #[command(description = "list the available commands")]
    Help,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(AppError)` - Token missing, invalid BOT_API_URL or HTTP client failure
pub fn create_bot() -> AppResult<Bot> {
    let token = config::require_bot_token()?;
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token, client);

    match config::BOT_API_URL.as_deref() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url)?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

fn is_retryable_startup_error(err: &str) -> bool {
    let err = err.to_ascii_lowercase();
    ["restart", "network", "connection", "timed out", "refused"]
        .iter()
        .any(|needle| err.contains(needle))
}

/// Calls `get_me`, retrying while the Bot API is still coming up.
///
/// Non-network errors (e.g. an invalid token) fail immediately.
pub async fn wait_for_bot_api(bot: &Bot) -> AppResult<Me> {
    let mut attempt = 0;
    loop {
        match bot.get_me().await {
            Ok(me) => return Ok(me),
            Err(e) => {
                attempt += 1;
                let err_str = e.to_string();
                if attempt >= config::retry::STARTUP_MAX_RETRIES || !is_retryable_startup_error(&err_str) {
                    log::error!("Failed to connect to Bot API after {} attempt(s): {}", attempt, err_str);
                    return Err(AppError::Telegram(e));
                }
                log::warn!(
                    "Bot API not ready (attempt {}/{}): {}. Retrying in {}s...",
                    attempt,
                    config::retry::STARTUP_MAX_RETRIES,
                    err_str,
                    config::retry::STARTUP_DELAY_SECS
                );
                sleep(config::retry::startup_delay()).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_descriptions() {
        let commands = Command::descriptions().to_string();
        assert!(commands.contains("Available commands"));
        assert!(commands.contains("/start"));
        assert!(commands.contains("show the page menu"));
        assert!(commands.contains("/help"));
    }

    #[test]
    fn test_parse_commands() {
        assert!(matches!(Command::parse("/start", "pagebot"), Ok(Command::Start)));
        assert!(matches!(Command::parse("/start@pagebot", "pagebot"), Ok(Command::Start)));
        assert!(matches!(Command::parse("/help", "pagebot"), Ok(Command::Help)));
        assert!(Command::parse("/menu", "pagebot").is_err());
    }

    #[test]
    fn test_bot_commands_registered() {
        let commands = Command::bot_commands();
        let names: Vec<&str> = commands.iter().map(|c| c.command.trim_start_matches('/')).collect();
        assert_eq!(names, vec!["start", "help"]);
    }

    #[test]
    fn test_retryable_startup_errors() {
        assert!(is_retryable_startup_error("Network error: connection refused"));
        assert!(is_retryable_startup_error("Telegram says: restart"));
        assert!(!is_retryable_startup_error("Unauthorized"));
    }
}

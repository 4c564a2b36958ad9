//! Telegram bot integration: bot setup, handler tree, keyboards and transports

pub mod bot;
pub mod handlers;
pub mod keyboard;
pub mod transport;

pub use teloxide::Bot;

// Re-exports for convenience
pub use bot::{Command, create_bot, setup_bot_commands, wait_for_bot_api};
pub use handlers::{FAILURE_TEXT, HandlerDeps, HandlerError, report_failure, schema};
pub use keyboard::inline_keyboard;
pub use transport::Transport;

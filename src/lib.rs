//! pagebot - Telegram bot with a two-page menu
//!
//! `/start` shows a menu with one button per page; pressing a button replaces
//! the menu with that page's link and a Back button.
//!
//! # Module Structure
//!
//! - `navigator`: the menu state machine (action in, response out)
//! - `telegram`: bot setup, dispatcher schema, keyboards and transports
//! - `core`: configuration, errors, logging, metrics and the page web server
//! - `cli`: command line interface

pub mod cli;
pub mod core;
pub mod navigator;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{AppError, AppResult, config};
pub use navigator::{Action, Navigator, PageLinks, Response};
pub use telegram::{HandlerDeps, Transport, schema};

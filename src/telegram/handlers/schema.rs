//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::{handle_help_command, handle_menu_callback, handle_start_command, report_failure};
use super::types::{HandlerDeps, HandlerError, UpdateSummary};
use crate::core::metrics;
use crate::telegram::Bot;
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Both transports (polling and webhook) feed this same tree, and the
/// integration tests dispatch into it through a mock bot.
///
/// # Arguments
/// * `deps` - Handler dependencies (the shared navigator)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .inspect(log_update)
        // Command handler
        .branch(command_handler(deps_commands))
        // Callback query handler
        .branch(callback_handler(deps_callback))
}

/// Logs every inbound update before routing.
fn log_update(update: Update) {
    let summary = UpdateSummary::from_update(&update);
    metrics::record_update(summary.kind);
    log::info!("Update {}: {}", update.id.0, summary);
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

                let result = match cmd {
                    Command::Start => handle_start_command(&bot, &msg, &deps).await,
                    Command::Help => handle_help_command(&bot, &msg).await,
                };
                if let Err(e) = result {
                    report_failure(&bot, msg.chat.id, e).await;
                }
                Ok::<(), HandlerError>(())
            }
        },
    ))
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            if let Err(e) = handle_menu_callback(&bot, &q, &deps).await {
                // Inline-mode presses have no chat; the user's private chat gets the notice
                let chat_id = q.message.as_ref().map_or_else(|| ChatId::from(q.from.id), |m| m.chat().id);
                report_failure(&bot, chat_id, e).await;
            }
            Ok::<(), HandlerError>(())
        }
    })
}

//! Command and callback handler implementations (/start, /help, menu buttons)

use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::command::BotCommands;
use teloxide::{ApiError, RequestError};

use super::types::{HandlerDeps, HandlerError};
use crate::core::metrics;
use crate::navigator::{Action, Navigator, Response};
use crate::telegram::Bot;
use crate::telegram::bot::Command;
use crate::telegram::keyboard::inline_keyboard;

/// Sent to the user when handling their update failed.
pub const FAILURE_TEXT: &str = "Oops! Something went wrong. Please try again later.";

/// Sends `response` as a new message with its keyboard.
pub(super) async fn send_response(bot: &Bot, chat_id: ChatId, response: &Response) -> Result<Message, RequestError> {
    let mut request = bot.send_message(chat_id, response.text.clone());
    if let Some(keyboard) = inline_keyboard(response) {
        request = request.reply_markup(keyboard);
    }
    request.await
}

/// Handle /start command
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    metrics::record_menu_action(Some(Action::Start));
    let response = deps.navigator.dispatch_action(Action::Start);

    if let Err(e) = send_response(bot, msg.chat.id, &response).await {
        metrics::record_telegram_failure("send_message");
        return Err(Box::new(e));
    }
    Ok(())
}

/// Handle /help command: lists the registered commands.
pub(super) async fn handle_help_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    if let Err(e) = bot.send_message(msg.chat.id, Command::descriptions().to_string()).await {
        metrics::record_telegram_failure("send_message");
        return Err(Box::new(e));
    }
    Ok(())
}

/// Handle an inline button press.
///
/// The query is always answered first so the client stops its spinner, then
/// the pressed message is replaced with the navigator's response.
pub(super) async fn handle_menu_callback(bot: &Bot, q: &CallbackQuery, deps: &HandlerDeps) -> Result<(), HandlerError> {
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        metrics::record_telegram_failure("answer_callback");
        log::warn!("Failed to answer callback query {:?}: {}", q.id, e);
    }

    let action = q.data.as_deref().and_then(Action::parse);
    metrics::record_menu_action(action);
    let response = match action {
        Some(action) => deps.navigator.dispatch_action(action),
        None => Navigator::unknown(),
    };

    if let Some(message) = q.regular_message() {
        let mut edit = bot.edit_message_text(message.chat.id, message.id, response.text.clone());
        if let Some(keyboard) = inline_keyboard(&response) {
            edit = edit.reply_markup(keyboard);
        }

        match edit.await {
            Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
            Err(e) => {
                metrics::record_telegram_failure("edit_message");
                log::warn!(
                    "Failed to edit message {} in chat {}: {}. Sending a new one",
                    message.id.0,
                    message.chat.id,
                    e
                );
                resend(bot, message.chat.id, &response).await
            }
        }
    } else if let Some(message) = &q.message {
        // Too old to edit
        resend(bot, message.chat().id, &response).await
    } else if let Some(inline_message_id) = &q.inline_message_id {
        let mut edit = bot.edit_message_text_inline(inline_message_id.clone(), response.text.clone());
        if let Some(keyboard) = inline_keyboard(&response) {
            edit = edit.reply_markup(keyboard);
        }

        match edit.await {
            Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
            Err(e) => {
                metrics::record_telegram_failure("edit_message");
                Err(Box::new(e))
            }
        }
    } else {
        log::warn!("Callback query {:?} carries no message to update", q.id);
        Ok(())
    }
}

async fn resend(bot: &Bot, chat_id: ChatId, response: &Response) -> Result<(), HandlerError> {
    match send_response(bot, chat_id, response).await {
        Ok(_) => Ok(()),
        Err(e) => {
            metrics::record_telegram_failure("send_message");
            Err(Box::new(e))
        }
    }
}

/// Logs a failed handler and tells the user the request did not go through.
///
/// When the failure was Telegram itself being unreachable, this notice is
/// likely lost as well; that is only logged.
pub async fn report_failure(bot: &Bot, chat_id: ChatId, err: HandlerError) {
    log::error!("Handler failed for chat {}: {}", chat_id, err);
    if let Err(e) = bot.send_message(chat_id, FAILURE_TEXT).await {
        metrics::record_telegram_failure("send_message");
        log::warn!("Failed to notify chat {} about the failure: {}", chat_id, e);
    }
}

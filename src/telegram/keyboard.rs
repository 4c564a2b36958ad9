//! Rendering of navigator responses as inline keyboards.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::navigator::Response;

/// Builds the inline keyboard for a response: all buttons on one row,
/// callback data set to the action identifier.
///
/// Returns `None` when the response offers no buttons, so the message is
/// sent or edited without any markup.
pub fn inline_keyboard(response: &Response) -> Option<InlineKeyboardMarkup> {
    if !response.has_buttons() {
        return None;
    }

    let row: Vec<InlineKeyboardButton> = response
        .buttons
        .iter()
        .map(|button| InlineKeyboardButton::callback(button.label, button.action.as_str()))
        .collect();

    Some(InlineKeyboardMarkup::new(vec![row]))
}

use serde::Serialize;

use super::action::Action;

/// A selectable button: label shown to the user, action sent back on press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: &'static str,
    pub action: Action,
}

impl Button {
    pub const fn new(label: &'static str, action: Action) -> Self {
        Self { label, action }
    }
}

/// Outgoing reply: text plus buttons in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub text: String,
    pub buttons: Vec<Button>,
}

impl Response {
    pub fn new(text: impl Into<String>, buttons: Vec<Button>) -> Self {
        Self {
            text: text.into(),
            buttons,
        }
    }

    pub fn has_buttons(&self) -> bool {
        !self.buttons.is_empty()
    }

    /// Buttons as `(label, action identifier)` pairs.
    pub fn button_pairs(&self) -> Vec<(&'static str, &'static str)> {
        self.buttons.iter().map(|b| (b.label, b.action.as_str())).collect()
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.text)?;
        for button in &self.buttons {
            writeln!(f, "  [{}] -> {}", button.label, button.action)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_button_pairs_keep_order() {
        let response = Response::new(
            "x",
            vec![
                Button::new("A", Action::OpenPage2),
                Button::new("B", Action::OpenPage1),
            ],
        );
        assert_eq!(response.button_pairs(), vec![("A", "open_page2"), ("B", "open_page1")]);
    }

    #[test]
    fn test_display_lists_buttons() {
        let response = Response::new("Hello", vec![Button::new("Back", Action::BackToMenu)]);
        assert_eq!(response.to_string(), "Hello\n  [Back] -> back_to_menu\n");
    }

    #[test]
    fn test_serialize_shape() {
        let response = Response::new("Hi", vec![Button::new("Back", Action::BackToMenu)]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "text": "Hi",
                "buttons": [{ "label": "Back", "action": "back_to_menu" }]
            })
        );
    }
}

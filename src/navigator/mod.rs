//! Menu navigation: maps an inbound action to the reply shown to the user.
//!
//! The navigator is a plain value. It holds the two page links and nothing
//! else, so one instance built at startup can be shared by every update
//! handler without synchronization.

pub mod action;
pub mod response;
pub mod state;

pub use action::Action;
pub use response::{Button, Response};
pub use state::{MenuState, PageId};

use crate::core::config;

pub const MENU_TEXT: &str = "Choose a page:";
pub const UNKNOWN_TEXT: &str = "Unknown command.";
pub const OPEN_PAGE1_LABEL: &str = "Open Page 1";
pub const OPEN_PAGE2_LABEL: &str = "Open Page 2";
pub const BACK_LABEL: &str = "Back";

/// URLs substituted into page responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub page1: String,
    pub page2: String,
}

impl PageLinks {
    pub fn new(page1: impl Into<String>, page2: impl Into<String>) -> Self {
        Self {
            page1: page1.into(),
            page2: page2.into(),
        }
    }

    /// Links from `PAGE1_URL` / `PAGE2_URL`.
    pub fn from_config() -> Self {
        Self::new(config::PAGE1_URL.as_str(), config::PAGE2_URL.as_str())
    }

    pub fn url(&self, page: PageId) -> &str {
        match page {
            PageId::One => &self.page1,
            PageId::Two => &self.page2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    links: PageLinks,
}

impl Navigator {
    pub fn new(links: PageLinks) -> Self {
        Self { links }
    }

    pub fn from_config() -> Self {
        Self::new(PageLinks::from_config())
    }

    pub fn links(&self) -> &PageLinks {
        &self.links
    }

    /// Resolves a raw action identifier. Identifiers outside the action set
    /// produce the unknown-command reply rather than an error.
    pub fn dispatch(&self, raw: &str) -> Response {
        match Action::parse(raw) {
            Some(action) => self.dispatch_action(action),
            None => Self::unknown(),
        }
    }

    pub fn dispatch_action(&self, action: Action) -> Response {
        self.render(MenuState::for_action(action))
    }

    pub fn render(&self, state: MenuState) -> Response {
        match state {
            MenuState::MainMenu => Response::new(MENU_TEXT, main_menu_buttons()),
            MenuState::PageDetail(page) => Response::new(
                format!("Link to Page {}: {}", page.number(), self.links.url(page)),
                vec![Button::new(BACK_LABEL, Action::BackToMenu)],
            ),
        }
    }

    pub fn unknown() -> Response {
        Response::new(UNKNOWN_TEXT, Vec::new())
    }
}

fn main_menu_buttons() -> Vec<Button> {
    [(OPEN_PAGE1_LABEL, PageId::One), (OPEN_PAGE2_LABEL, PageId::Two)]
        .into_iter()
        .map(|(label, page)| Button::new(label, page.open_action()))
        .collect()
}

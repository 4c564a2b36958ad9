use super::action::Action;

/// One of the two linkable pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    One,
    Two,
}

impl PageId {
    pub fn number(&self) -> u8 {
        match self {
            PageId::One => 1,
            PageId::Two => 2,
        }
    }

    /// Action of the menu button that opens this page.
    pub fn open_action(&self) -> Action {
        match self {
            PageId::One => Action::OpenPage1,
            PageId::Two => Action::OpenPage2,
        }
    }
}

/// Screen shown to the user after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    #[default]
    MainMenu,
    PageDetail(PageId),
}

impl MenuState {
    /// State reached after `action`, whatever the state was before.
    pub fn for_action(action: Action) -> Self {
        match action {
            Action::Start | Action::BackToMenu => MenuState::MainMenu,
            Action::OpenPage1 => MenuState::PageDetail(PageId::One),
            Action::OpenPage2 => MenuState::PageDetail(PageId::Two),
        }
    }

    /// Transition from `self` on `action`. Requests carry no session, so the
    /// current state never changes the outcome.
    pub fn transition(self, action: Action) -> Self {
        Self::for_action(action)
    }
}

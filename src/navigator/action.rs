use serde::Serialize;
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// Identifier carried by a `/start` command or an inline button press.
///
/// The set is closed: anything that does not parse into one of these
/// variants is handled as an unknown command by the navigator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, AsRefStr, IntoStaticStr, EnumIter,
)]
pub enum Action {
    #[strum(serialize = "start")]
    #[serde(rename = "start")]
    Start,
    #[strum(serialize = "open_page1")]
    #[serde(rename = "open_page1")]
    OpenPage1,
    #[strum(serialize = "open_page2")]
    #[serde(rename = "open_page2")]
    OpenPage2,
    #[strum(serialize = "back_to_menu")]
    #[serde(rename = "back_to_menu")]
    BackToMenu,
}

impl Action {
    /// Parses a raw identifier. Matching is exact: no trimming, no case folding.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    /// Wire form used as callback data.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_known_identifiers() {
        assert_eq!(Action::parse("start"), Some(Action::Start));
        assert_eq!(Action::parse("open_page1"), Some(Action::OpenPage1));
        assert_eq!(Action::parse("open_page2"), Some(Action::OpenPage2));
        assert_eq!(Action::parse("back_to_menu"), Some(Action::BackToMenu));
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Action::parse(""), None);
        assert_eq!(Action::parse("Start"), None);
        assert_eq!(Action::parse(" start"), None);
        assert_eq!(Action::parse("page1"), None);
        assert_eq!(Action::parse("/start"), None);
    }

    #[test]
    fn test_wire_form_parses_back() {
        for action in Action::iter() {
            assert_eq!(Action::parse(action.as_str()), Some(action));
            assert_eq!(action.to_string(), action.as_str());
        }
    }

    #[test]
    fn test_serializes_as_identifier() {
        let json = serde_json::to_string(&Action::BackToMenu).unwrap();
        assert_eq!(json, "\"back_to_menu\"");
    }
}

//! Handler types, dependencies, and update logging helpers

use std::sync::Arc;

use teloxide::types::{Update, UpdateKind};

use crate::navigator::Navigator;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
///
/// Built once at startup; every update shares the same navigator.
#[derive(Clone)]
pub struct HandlerDeps {
    pub navigator: Arc<Navigator>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(navigator: Arc<Navigator>) -> Self {
        Self { navigator }
    }
}

/// What gets logged for every inbound update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub kind: &'static str,
    pub user_id: Option<u64>,
    pub username: Option<String>,
    /// Message text or callback data
    pub payload: Option<String>,
}

impl UpdateSummary {
    pub fn from_update(update: &Update) -> Self {
        let user = update.from();
        let (kind, payload) = match &update.kind {
            UpdateKind::Message(msg) => ("message", msg.text().map(str::to_string)),
            UpdateKind::CallbackQuery(q) => ("callback_query", q.data.clone()),
            _ => ("other", None),
        };

        Self {
            kind,
            user_id: user.map(|u| u.id.0),
            username: user.and_then(|u| u.username.clone()),
            payload,
        }
    }
}

impl std::fmt::Display for UpdateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let user_id = self.user_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        let username = self.username.as_deref().unwrap_or("-");
        let payload = self.payload.as_deref().unwrap_or(self.kind);
        write!(f, "user {} ({}): {}", user_id, username, payload)
    }
}

//! The three independent partitions of the global state.

use serde::{Serialize, Serializer};

use super::notifications::Notification;
use crate::domain::auth::AuthSession;
use crate::domain::foundation::Timestamp;
use crate::domain::preferences::Theme;

/// Session and login progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSlice {
    #[serde(serialize_with = "serialize_session")]
    pub session: Option<AuthSession>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_login_attempt: Option<Timestamp>,
}

impl AuthSlice {
    /// Derived on every call; a session past its expiry no longer counts.
    pub fn is_authenticated_at(&self, now: &Timestamp) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_valid_at(now))
    }
}

/// Tokens stay out of serialized snapshots.
fn serialize_session<S: Serializer>(
    session: &Option<AuthSession>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct SessionSummary<'a> {
        user_id: &'a str,
        email: &'a str,
        expires_at: &'a Timestamp,
    }

    session
        .as_ref()
        .map(|s| SessionSummary {
            user_id: s.user_id().as_str(),
            email: s.email().as_str(),
            expires_at: s.expires_at(),
        })
        .serialize(serializer)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSlice {
    pub current_theme: Theme,
    pub is_dark_mode: bool,
    pub system_prefers_dark: bool,
}

impl ThemeSlice {
    pub(crate) fn new(theme: Theme, system_prefers_dark: bool) -> Self {
        Self {
            current_theme: theme,
            is_dark_mode: theme.resolves_dark(system_prefers_dark),
            system_prefers_dark,
        }
    }

    pub fn icon(&self) -> &'static str {
        self.current_theme.icon()
    }

    pub fn label(&self) -> &'static str {
        self.current_theme.label()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSlice {
    pub mobile_menu_open: bool,
    pub notifications: Vec<Notification>,
    pub global_loading: bool,
}

impl UiSlice {
    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }
}

/// Immutable copy of the whole state, published after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalSnapshot {
    pub auth: AuthSlice,
    pub theme: ThemeSlice,
    pub ui: UiSlice,
}

/// Which slice a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Auth,
    Theme,
    Ui,
}

/// Passed to subscribers after each mutation.
#[derive(Debug, Clone)]
pub struct StateChange {
    pub slice: Slice,
    pub snapshot: GlobalSnapshot,
}

//! Mirror of the auth and theme slices in durable client storage.
//!
//! Writes never fail the caller: a storage error is logged and the in-memory
//! state stays authoritative for the rest of the run.

use crate::domain::auth::{AuthSession, SessionRecord};
use crate::domain::foundation::Timestamp;
use crate::domain::preferences::Theme;
use crate::ports::KeyValueStore;

/// Key of the serialized session record.
pub const AUTH_SESSION_KEY: &str = "auth_session";

/// Key of the chosen theme.
pub const THEME_KEY: &str = "preferred-theme";

pub(crate) fn load_theme(store: &dyn KeyValueStore) -> Option<Theme> {
    let raw = store.get(THEME_KEY)?;
    match raw.parse() {
        Ok(theme) => Some(theme),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring stored theme preference");
            None
        }
    }
}

pub(crate) fn save_theme(store: &dyn KeyValueStore, theme: Theme) {
    if let Err(e) = store.set(THEME_KEY, theme.as_str()) {
        tracing::warn!(error = %e, theme = %theme, "Failed to persist theme preference");
    }
}

/// Restores the stored session if it is still valid at `now`.
///
/// A blob that does not parse, does not reconstruct, or holds an expired
/// session is removed.
pub(crate) fn load_session(store: &dyn KeyValueStore, now: &Timestamp) -> Option<AuthSession> {
    let raw = store.get(AUTH_SESSION_KEY)?;

    let session = serde_json::from_str::<SessionRecord>(&raw)
        .map_err(|e| e.to_string())
        .and_then(|record| AuthSession::try_from(record).map_err(|e| e.to_string()));

    match session {
        Ok(session) if session.is_valid_at(now) => Some(session),
        Ok(_) => {
            tracing::debug!("Discarding expired stored session");
            clear_session(store);
            None
        }
        Err(reason) => {
            tracing::debug!(reason = %reason, "Discarding unreadable stored session");
            clear_session(store);
            None
        }
    }
}

pub(crate) fn save_session(store: &dyn KeyValueStore, session: &AuthSession) {
    let written = serde_json::to_string(&session.to_record())
        .map_err(crate::ports::StorageError::from)
        .and_then(|blob| store.set(AUTH_SESSION_KEY, &blob));
    if let Err(e) = written {
        tracing::warn!(error = %e, "Failed to persist session");
    }
}

pub(crate) fn clear_session(store: &dyn KeyValueStore) {
    if let Err(e) = store.remove(AUTH_SESSION_KEY) {
        tracing::warn!(error = %e, "Failed to remove stored session");
    }
}

//! Transient notification banners.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::Timestamp;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    /// How long a banner of this kind stays up when shown through the
    /// `show_*` shortcuts.
    pub fn default_duration(self) -> Duration {
        match self {
            NotificationKind::Success => Duration::from_millis(5_000),
            NotificationKind::Error => Duration::from_millis(8_000),
            NotificationKind::Warning => Duration::from_millis(6_000),
            NotificationKind::Info => Duration::from_millis(4_000),
        }
    }
}

/// A banner in the UI slice.
///
/// `duration_ms` is `None` for persistent notifications, which stay until
/// removed explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: Timestamp,
    pub duration_ms: Option<u64>,
}

impl Notification {
    pub(crate) fn new(
        kind: NotificationKind,
        message: impl Into<String>,
        timestamp: Timestamp,
        duration: Option<Duration>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            kind,
            message: message.into(),
            timestamp,
            duration_ms: duration
                .filter(|d| !d.is_zero())
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.duration_ms.is_none()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }
}

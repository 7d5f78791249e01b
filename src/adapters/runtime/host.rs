//! Host environment adapters.
//!
//! `HeadlessHost` is used by the binary, which has no page to lock or
//! restyle: it only logs. `RecordingHost` keeps every call so tests can
//! assert on the side effects of the state store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::preferences::Theme;
use crate::ports::{theme_color, HostEnvironment};

/// Host without a rendering surface.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    prefers_dark: bool,
}

impl HeadlessHost {
    pub fn new(prefers_dark: bool) -> Self {
        Self { prefers_dark }
    }
}

impl HostEnvironment for HeadlessHost {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn set_scroll_locked(&self, locked: bool) {
        tracing::trace!(locked, "Scroll lock changed");
    }

    fn apply_theme(&self, theme: Theme, is_dark: bool) {
        tracing::debug!(
            theme = theme.as_str(),
            is_dark,
            theme_color = theme_color(is_dark),
            "Theme applied"
        );
    }
}

/// A theme application as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedTheme {
    pub theme: Theme,
    pub is_dark: bool,
    pub theme_color: &'static str,
}

/// Host that records every side effect.
#[derive(Debug, Default)]
pub struct RecordingHost {
    prefers_dark: AtomicBool,
    scroll_locks: Mutex<Vec<bool>>,
    themes: Mutex<Vec<AppliedTheme>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preferring_dark() -> Self {
        let host = Self::default();
        host.set_prefers_dark(true);
        host
    }

    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.prefers_dark.store(prefers_dark, Ordering::SeqCst);
    }

    /// Every scroll lock call, in order.
    pub fn scroll_locks(&self) -> Vec<bool> {
        self.scroll_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current scroll state; unlocked when never touched.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locks().last().copied().unwrap_or(false)
    }

    /// Every theme application, in order.
    pub fn applied_themes(&self) -> Vec<AppliedTheme> {
        self.themes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_applied_theme(&self) -> Option<AppliedTheme> {
        self.applied_themes().last().copied()
    }
}

impl HostEnvironment for RecordingHost {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.load(Ordering::SeqCst)
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(locked);
    }

    fn apply_theme(&self, theme: Theme, is_dark: bool) {
        self.themes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(AppliedTheme {
                theme,
                is_dark,
                theme_color: theme_color(is_dark),
            });
    }
}

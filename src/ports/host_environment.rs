//! Host environment port.
//!
//! Environmental side effects of the state store that live outside the
//! process state: page scroll locking, applying the active theme, and the
//! operating system's color scheme preference.

use crate::domain::preferences::Theme;

pub trait HostEnvironment: Send + Sync {
    /// Whether the OS currently prefers a dark color scheme.
    fn prefers_dark(&self) -> bool;

    /// Disable (`true`) or restore (`false`) background scrolling.
    fn set_scroll_locked(&self, locked: bool);

    /// Apply the selected theme and the effective dark flag.
    fn apply_theme(&self, theme: Theme, is_dark: bool);
}

/// Browser `theme-color` value for the effective mode.
pub fn theme_color(is_dark: bool) -> &'static str {
    if is_dark {
        "#111827"
    } else {
        "#ffffff"
    }
}

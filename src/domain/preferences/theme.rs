//! Color theme preference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The user's chosen color theme.
///
/// `Auto` follows the operating system's color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

impl Theme {
    /// Next theme in the toggle cycle: light → dark → auto → light.
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Auto,
            Theme::Auto => Theme::Light,
        }
    }

    /// Effective dark mode given the OS preference.
    pub fn resolves_dark(self, system_prefers_dark: bool) -> bool {
        match self {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::Auto => system_prefers_dark,
        }
    }

    /// Storage key form.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "☀️",
            Theme::Dark => "🌙",
            Theme::Auto => "🔄",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Modo Claro",
            Theme::Dark => "Modo Oscuro",
            Theme::Auto => "Automático",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "auto" => Ok(Theme::Auto),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_through_all_three() {
        assert_eq!(Theme::Auto.next(), Theme::Light);
        assert_eq!(Theme::Light.next(), Theme::Dark);
        assert_eq!(Theme::Dark.next(), Theme::Auto);
        assert_eq!(Theme::Auto.next().next().next(), Theme::Auto);
    }

    #[test]
    fn auto_follows_system_preference() {
        assert!(Theme::Auto.resolves_dark(true));
        assert!(!Theme::Auto.resolves_dark(false));
        assert!(Theme::Dark.resolves_dark(false));
        assert!(!Theme::Light.resolves_dark(true));
    }

    #[test]
    fn parses_storage_keys() {
        for theme in [Theme::Light, Theme::Dark, Theme::Auto] {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
        }
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn labels_and_icons() {
        assert_eq!(Theme::Light.label(), "Modo Claro");
        assert_eq!(Theme::Dark.label(), "Modo Oscuro");
        assert_eq!(Theme::Auto.label(), "Automático");
        assert_eq!(Theme::Dark.icon(), "🌙");
    }
}

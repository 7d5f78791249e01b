//! Preferences module - per-client display preferences.

mod theme;

pub use theme::{Theme, UnknownTheme};

//! Light/dark theme switch.
//!
//! The page has one primary theme toggle. It owns the theme logic: resolve
//! the initial theme, flip it on activation, and persist the choice under a
//! single string preference key. The overlay's mirrored toggle never touches
//! any of this; it asks the page to activate the primary toggle instead.
//!
//! ## Initial Theme
//!
//! | Stored value | System prefers dark | Theme |
//! |--------------|---------------------|-------|
//! | `"dark"`     | any                 | dark  |
//! | none         | yes                 | dark  |
//! | none         | no                  | light |
//! | anything else| any                 | light |

use crate::aria::AriaChecked;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Value written to the preference store.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Body class applied while this theme is active.
    pub fn body_class(self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::Dark => "dark-theme",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// String key/value preference storage (local storage in a browser).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.set(key, value);
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// The primary theme toggle.
#[derive(Debug, Clone)]
pub struct ThemeSwitch<S: PreferenceStore> {
    store: S,
    key: String,
    current: Theme,
}

impl<S: PreferenceStore> ThemeSwitch<S> {
    /// Resolve the initial theme from the stored preference and the system setting.
    ///
    /// Nothing is written to the store until the user toggles.
    pub fn init(store: S, key: &str, prefers_dark: bool) -> Self {
        let current = match store.get(key).as_deref() {
            Some("dark") => Theme::Dark,
            None if prefers_dark => Theme::Dark,
            _ => Theme::Light,
        };
        Self {
            store,
            key: key.to_string(),
            current,
        }
    }

    pub fn theme(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist the new choice.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.flipped();
        self.set(next);
        next
    }

    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        self.store.set(&self.key, theme.as_str());
        log::debug!("theme set to {}", theme.as_str());
    }

    /// `aria-checked` of the toggle, which reads as "dark mode on".
    pub fn aria_checked(&self) -> AriaChecked {
        AriaChecked::from(self.current == Theme::Dark)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

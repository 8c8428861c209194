//! Accessibility attribute values.
//!
//! Each ARIA state attribute accepts a fixed set of string tokens. Setting
//! them from booleans directly (`setAttribute('aria-checked', true)`) relies on
//! implicit stringification and drifts between `"true"`, `"false"`, `"page"`,
//! and bare booleans depending on the call site. These enums are the only way
//! the rest of the crate writes ARIA attributes, so every value that reaches
//! the page is one of the tokens the attribute defines.
//!
//! ## Active Link Detection
//!
//! The current page is the last segment of the URL path, with the site root
//! mapped to `index.html`:
//!
//! ```text
//! /                     → index.html
//! /about.html           → about.html
//! /services/web.html    → web.html
//! ```
//!
//! A navigation link is current when its `href` equals that segment. Current
//! links get `aria-current="page"`, all others `aria-current="false"`.

use std::fmt;

/// Value of `aria-checked` on switch and checkbox roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaChecked {
    True,
    False,
}

impl AriaChecked {
    pub fn as_str(self) -> &'static str {
        match self {
            AriaChecked::True => "true",
            AriaChecked::False => "false",
        }
    }
}

impl From<bool> for AriaChecked {
    fn from(checked: bool) -> Self {
        if checked {
            AriaChecked::True
        } else {
            AriaChecked::False
        }
    }
}

/// Value of `aria-current` on navigation links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaCurrent {
    Page,
    False,
}

impl AriaCurrent {
    pub fn as_str(self) -> &'static str {
        match self {
            AriaCurrent::Page => "page",
            AriaCurrent::False => "false",
        }
    }
}

/// Value of `aria-expanded` on disclosure controls (the hamburger).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaExpanded {
    True,
    False,
}

impl AriaExpanded {
    pub fn as_str(self) -> &'static str {
        match self {
            AriaExpanded::True => "true",
            AriaExpanded::False => "false",
        }
    }
}

impl From<bool> for AriaExpanded {
    fn from(expanded: bool) -> Self {
        if expanded {
            AriaExpanded::True
        } else {
            AriaExpanded::False
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(AriaChecked, AriaCurrent, AriaExpanded);

/// Resolve the current page name from a URL path.
pub fn current_page(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => "index.html",
    }
}

/// `aria-current` for a link `href` when the browser is at `path`.
pub fn link_current(href: &str, path: &str) -> AriaCurrent {
    if href == current_page(path) {
        AriaCurrent::Page
    } else {
        AriaCurrent::False
    }
}

//! Shared types used by configuration, the state machine, and markup.
//!
//! Panel identifiers travel from `nav.toml` through the rendered
//! `data-submenu` attributes to the state machine, so all three must agree on
//! one representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a submenu panel (`data-submenu` in the markup).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(String);

impl PanelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An entry in the root list or inside a panel.
///
/// Exactly one of `href` and `submenu` must be set; `NavConfig::validate`
/// enforces this so [`NavLink::target`] can assume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    /// Display label.
    pub label: String,
    /// Destination for a plain link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Panel this entry drills into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submenu: Option<PanelId>,
}

/// What activating a [`NavLink`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    Href(&'a str),
    Submenu(&'a PanelId),
}

impl NavLink {
    pub fn href(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href.to_string()),
            submenu: None,
        }
    }

    pub fn submenu(label: &str, panel: &str) -> Self {
        Self {
            label: label.to_string(),
            href: None,
            submenu: Some(PanelId::new(panel)),
        }
    }

    /// Resolve the link target. A submenu wins if both are somehow set.
    pub fn target(&self) -> LinkTarget<'_> {
        match (&self.submenu, &self.href) {
            (Some(panel), _) => LinkTarget::Submenu(panel),
            (None, Some(href)) => LinkTarget::Href(href),
            (None, None) => LinkTarget::Href("#"),
        }
    }
}

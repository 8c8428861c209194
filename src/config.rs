//! Navigation configuration module.
//!
//! Handles loading, validating, and merging `nav.toml`. The file describes
//! the static page content the overlay state machine runs against: the
//! breakpoint, the root list, and the submenu panels with their parent
//! linkage, plus tuning for the scroll watcher, carousel, and theme switch.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! breakpoint = 992            # Viewport width above which the overlay is unused
//!
//! [theme]
//! storage_key = "theme"       # Preference key holding "dark" or "light"
//!
//! [scroll]
//! throttle_ms = 100           # Minimum gap between handled scroll samples
//! parallax_factor = 0.5       # Hero offset per scrolled pixel
//! back_to_top_offset = 300    # Scroll depth that reveals the back-to-top button
//!
//! [carousel]
//! slides = 0                  # Number of hero slides (0 disables the carousel)
//! interval_ms = 5000          # Auto-advance period
//!
//! [[links]]                   # Root list, in order
//! label = "Services"
//! submenu = "services"
//!
//! [[panels]]
//! id = "services"
//! title = "Services"
//! links = [
//!     { label = "Web", submenu = "services-web" },
//!     { label = "Branding", href = "branding.html" },
//! ]
//!
//! [[panels]]
//! id = "services-web"
//! title = "Web"
//! parent = "services"
//! links = [{ label = "Sites", href = "sites.html" }]
//!
//! [[content.images]]          # Images enhanced at load
//! src = "hero.jpg"
//! alt = "Studio at dusk"
//! loading = "eager"           # Optional; "lazy" when absent
//!
//! [[content.cards]]           # Service/project cards
//! title = "Web design"
//! tabindex = -1               # Optional; 0 when absent
//! ```
//!
//! ## Structural Rules
//!
//! A panel's `parent` is the panel that holds its trigger. Root-list triggers
//! open panels without a parent. Validation checks the triggers and the
//! `parent` fields agree, because the back button follows `parent` while the
//! user reaches the panel through the trigger; if the two disagree, back
//! navigation lands somewhere the user never was.
//!
//! Unknown keys are rejected to catch typos early.

use crate::content::{Card, Image};
use crate::types::{NavLink, PanelId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Navigation configuration loaded from `nav.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Viewport width (px) above which mobile navigation is not used.
    pub breakpoint: u32,
    /// Theme preference settings.
    pub theme: ThemeConfig,
    /// Scroll watcher tuning.
    pub scroll: ScrollConfig,
    /// Hero carousel settings.
    pub carousel: CarouselConfig,
    /// Root list entries, in display order.
    pub links: Vec<NavLink>,
    /// Submenu panels.
    pub panels: Vec<PanelConfig>,
    /// Images and cards outside the navigation.
    pub content: ContentConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            breakpoint: 992,
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
            carousel: CarouselConfig::default(),
            links: Vec::new(),
            panels: Vec::new(),
            content: ContentConfig::default(),
        }
    }
}

/// A nested navigation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    pub id: PanelId,
    pub title: String,
    /// Panel holding this panel's trigger; `None` for panels opened from the root list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<PanelId>,
    #[serde(default)]
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Preference key holding `"dark"` or `"light"`.
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Scroll samples closer together than this are dropped.
    pub throttle_ms: u64,
    /// Hero parallax offset per scrolled pixel.
    pub parallax_factor: f64,
    /// Scroll depth beyond which the back-to-top button shows.
    pub back_to_top_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 100,
            parallax_factor: 0.5,
            back_to_top_offset: 300.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Number of hero slides. Zero disables the carousel.
    pub slides: usize,
    /// Auto-advance period.
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slides: 0,
            interval_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    pub images: Vec<Image>,
    pub cards: Vec<Card>,
}

impl NavConfig {
    /// Look up a panel by id.
    pub fn panel(&self, id: &PanelId) -> Option<&PanelConfig> {
        self.panels.iter().find(|p| &p.id == id)
    }

    /// Panels no trigger opens, in file order. They are valid but unreachable.
    pub fn unreachable_panels(&self) -> Vec<&PanelId> {
        let triggered: BTreeSet<&PanelId> = self
            .links
            .iter()
            .chain(self.panels.iter().flat_map(|p| p.links.iter()))
            .filter_map(|l| l.submenu.as_ref())
            .collect();
        self.panels
            .iter()
            .map(|p| &p.id)
            .filter(|id| !triggered.contains(id))
            .collect()
    }

    /// Validate values and the panel structure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.breakpoint == 0 {
            return Err(ConfigError::Validation(
                "breakpoint must be non-zero".into(),
            ));
        }
        if self.theme.storage_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme.storage_key must not be empty".into(),
            ));
        }
        if self.carousel.slides > 0 && self.carousel.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.interval_ms must be non-zero when slides are configured".into(),
            ));
        }
        if !self.scroll.parallax_factor.is_finite() {
            return Err(ConfigError::Validation(
                "scroll.parallax_factor must be a finite number".into(),
            ));
        }

        let mut ids = BTreeSet::new();
        for panel in &self.panels {
            if panel.id.as_str().trim().is_empty() {
                return Err(ConfigError::Validation("panel id must not be empty".into()));
            }
            if !ids.insert(&panel.id) {
                return Err(ConfigError::Validation(format!(
                    "duplicate panel id '{}'",
                    panel.id
                )));
            }
        }

        let parents: BTreeMap<&PanelId, Option<&PanelId>> = self
            .panels
            .iter()
            .map(|p| (&p.id, p.parent.as_ref()))
            .collect();

        for panel in &self.panels {
            if let Some(parent) = &panel.parent {
                if !parents.contains_key(parent) {
                    return Err(ConfigError::Validation(format!(
                        "panel '{}' has unknown parent '{}'",
                        panel.id, parent
                    )));
                }
            }
            // A chain longer than the panel count has to revisit a panel.
            let mut cursor = panel.parent.as_ref();
            let mut steps = 0;
            while let Some(id) = cursor {
                steps += 1;
                if steps > self.panels.len() {
                    return Err(ConfigError::Validation(format!(
                        "panel '{}' is part of a parent cycle",
                        panel.id
                    )));
                }
                cursor = parents.get(id).copied().flatten();
            }
        }

        for image in &self.content.images {
            if image.src.trim().is_empty() {
                return Err(ConfigError::Validation("content image src must not be empty".into()));
            }
        }

        validate_links(&self.links, None, &parents)?;
        for panel in &self.panels {
            validate_links(&panel.links, Some(&panel.id), &parents)?;
        }
        Ok(())
    }
}

fn validate_links(
    links: &[NavLink],
    container: Option<&PanelId>,
    parents: &BTreeMap<&PanelId, Option<&PanelId>>,
) -> Result<(), ConfigError> {
    let location = match container {
        Some(id) => format!("panel '{id}'"),
        None => "root list".to_string(),
    };
    for link in links {
        match (&link.href, &link.submenu) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Validation(format!(
                    "link '{}' in {location} sets both href and submenu",
                    link.label
                )));
            }
            (None, None) => {
                return Err(ConfigError::Validation(format!(
                    "link '{}' in {location} needs an href or a submenu",
                    link.label
                )));
            }
            (None, Some(target)) => match parents.get(target) {
                None => {
                    return Err(ConfigError::Validation(format!(
                        "link '{}' in {location} opens unknown panel '{target}'",
                        link.label
                    )));
                }
                Some(parent) if *parent != container => {
                    return Err(ConfigError::Validation(format!(
                        "link '{}' in {location} opens panel '{target}', whose parent is {}",
                        link.label,
                        parent.map_or("the root list".to_string(), |p| format!("'{p}'"))
                    )));
                }
                Some(_) => {}
            },
            (Some(_), None) => {}
        }
    }
    Ok(())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(NavConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<NavConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: NavConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults if it is absent.
pub fn load_config(path: &Path) -> Result<NavConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Parse config from a TOML string on top of stock defaults.
pub fn parse_config(content: &str) -> Result<NavConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    resolve_config(stock_defaults_value()?, Some(overlay))
}

/// Returns a fully-commented starter `nav.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# navdeck Configuration
# =====================
# Scalar settings are optional; values shown are the defaults.
# The links and panels below are an example structure to edit.
# Unknown keys will cause an error.

# Viewport width (px) above which the mobile overlay is not used.
# Growing the viewport past this width closes an open overlay.
breakpoint = 992

# ---------------------------------------------------------------------------
# Theme preference
# ---------------------------------------------------------------------------
[theme]
# Preference key that stores "dark" or "light".
storage_key = "theme"

# ---------------------------------------------------------------------------
# Scroll effects
# ---------------------------------------------------------------------------
[scroll]
# Scroll samples closer together than this (ms) are dropped.
throttle_ms = 100

# Hero content moves this many pixels per scrolled pixel.
parallax_factor = 0.5

# Scroll depth (px) past which the back-to-top button is shown.
back_to_top_offset = 300.0

# ---------------------------------------------------------------------------
# Hero carousel
# ---------------------------------------------------------------------------
[carousel]
# Number of hero slides (0 disables the carousel).
slides = 0

# Auto-advance period (ms).
interval_ms = 5000

# ---------------------------------------------------------------------------
# Root list
# ---------------------------------------------------------------------------
# Each entry has a label and exactly one of `href` or `submenu`.
[[links]]
label = "Home"
href = "index.html"

[[links]]
label = "Services"
submenu = "services"

[[links]]
label = "About"
href = "about.html"

# ---------------------------------------------------------------------------
# Submenu panels
# ---------------------------------------------------------------------------
# `parent` names the panel holding this panel's trigger. Panels opened from
# the root list have no parent. The back button returns to the parent.
[[panels]]
id = "services"
title = "Services"
links = [
    { label = "Web", submenu = "services-web" },
    { label = "Branding", href = "branding.html" },
]

[[panels]]
id = "services-web"
title = "Web"
parent = "services"
links = [
    { label = "Sites", href = "sites.html" },
    { label = "Shops", href = "shops.html" },
]

# ---------------------------------------------------------------------------
# Page content
# ---------------------------------------------------------------------------
# Images and cards enhanced when the page loads. Images without `loading`
# load lazily and show a placeholder if they fail. Cards without `tabindex`
# join the keyboard tab order.
[[content.images]]
src = "hero.jpg"
alt = "Studio at dusk"

[[content.cards]]
title = "Web design"

[[content.cards]]
title = "Branding"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn validation_message(content: &str) -> String {
        match parse_config(content) {
            Err(ConfigError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn default_config_values() {
        let config = NavConfig::default();
        assert_eq!(config.breakpoint, 992);
        assert_eq!(config.theme.storage_key, "theme");
        assert_eq!(config.scroll.throttle_ms, 100);
        assert_eq!(config.carousel.interval_ms, 5000);
        assert!(config.links.is_empty());
        assert!(config.panels.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn stock_config_parses_and_validates() {
        let config = parse_config(stock_config_toml()).unwrap();
        assert_eq!(config.links.len(), 3);
        assert_eq!(config.panels.len(), 2);
        assert_eq!(config.content.images.len(), 1);
        assert_eq!(config.content.cards.len(), 2);
        let web = config.panel(&PanelId::new("services-web")).unwrap();
        assert_eq!(web.parent, Some(PanelId::new("services")));
    }

    #[test]
    fn content_section_parses() {
        let config = parse_config(
            r#"
[[content.images]]
src = "hero.jpg"
loading = "eager"

[[content.cards]]
title = "Archived"
tabindex = -1
"#,
        )
        .unwrap();
        let image = &config.content.images[0];
        assert_eq!(image.alt, "");
        assert_eq!(image.loading, Some(crate::content::Loading::Eager));
        assert_eq!(config.content.cards[0].tabindex, Some(-1));
    }

    #[test]
    fn content_image_needs_src() {
        let err = parse_config("[[content.images]]\nsrc = \" \"").unwrap_err();
        assert!(err.to_string().contains("image src"));
        assert!(matches!(
            parse_config("[[content.images]]\nsrc = \"a.jpg\"\nwidth = 3"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
[scroll]
throttle_ms = 50
"#,
        )
        .unwrap();
        assert_eq!(config.scroll.throttle_ms, 50);
        assert_eq!(config.scroll.parallax_factor, 0.5);
        assert_eq!(config.breakpoint, 992);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = load_config(&dir.path().join("nav.toml")).unwrap();
        assert_eq!(config.breakpoint, 992);
    }

    #[test]
    fn load_config_reads_file() {
        let file = write_config(
            r#"
breakpoint = 768

[[links]]
label = "Home"
href = "index.html"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.breakpoint, 768);
        assert_eq!(config.links[0].label, "Home");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let file = write_config("breakpoint = [");
        assert!(matches!(load_config(file.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(matches!(
            parse_config("breakpint = 992"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        assert!(matches!(
            parse_config("[scroll]\nthrottle = 10"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unreachable_panels_listed() {
        let config = parse_config(
            r#"
[[links]]
label = "A"
submenu = "a"

[[panels]]
id = "a"
title = "A"

[[panels]]
id = "orphan"
title = "Orphan"
"#,
        )
        .unwrap();
        assert_eq!(config.unreachable_panels(), vec![&PanelId::new("orphan")]);
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn zero_breakpoint_rejected() {
        assert!(validation_message("breakpoint = 0").contains("breakpoint"));
    }

    #[test]
    fn empty_storage_key_rejected() {
        assert!(validation_message("[theme]\nstorage_key = \" \"").contains("storage_key"));
    }

    #[test]
    fn carousel_zero_interval_rejected() {
        let msg = validation_message("[carousel]\nslides = 3\ninterval_ms = 0");
        assert!(msg.contains("interval_ms"));
    }

    #[test]
    fn duplicate_panel_rejected() {
        let msg = validation_message(
            r#"
[[panels]]
id = "a"
title = "A"

[[panels]]
id = "a"
title = "Again"
"#,
        );
        assert!(msg.contains("duplicate panel id 'a'"));
    }

    #[test]
    fn unknown_parent_rejected() {
        let msg = validation_message(
            r#"
[[panels]]
id = "a"
title = "A"
parent = "ghost"
"#,
        );
        assert!(msg.contains("unknown parent 'ghost'"));
    }

    #[test]
    fn parent_cycle_rejected() {
        let msg = validation_message(
            r#"
[[panels]]
id = "a"
title = "A"
parent = "b"

[[panels]]
id = "b"
title = "B"
parent = "a"
"#,
        );
        assert!(msg.contains("cycle"));
    }

    #[test]
    fn self_parent_rejected() {
        let msg = validation_message(
            r#"
[[panels]]
id = "a"
title = "A"
parent = "a"
"#,
        );
        assert!(msg.contains("cycle"));
    }

    #[test]
    fn link_with_both_targets_rejected() {
        let msg = validation_message(
            r#"
[[panels]]
id = "a"
title = "A"

[[links]]
label = "Both"
href = "x.html"
submenu = "a"
"#,
        );
        assert!(msg.contains("both href and submenu"));
    }

    #[test]
    fn link_without_target_rejected() {
        let msg = validation_message("[[links]]\nlabel = \"Nothing\"");
        assert!(msg.contains("needs an href or a submenu"));
    }

    #[test]
    fn link_to_unknown_panel_rejected() {
        let msg = validation_message("[[links]]\nlabel = \"X\"\nsubmenu = \"ghost\"");
        assert!(msg.contains("unknown panel 'ghost'"));
    }

    #[test]
    fn root_trigger_to_nested_panel_rejected() {
        let msg = validation_message(
            r#"
[[links]]
label = "Web"
submenu = "web"

[[panels]]
id = "services"
title = "Services"

[[panels]]
id = "web"
title = "Web"
parent = "services"
"#,
        );
        assert!(msg.contains("whose parent is 'services'"));
    }

    #[test]
    fn nested_trigger_to_top_panel_rejected() {
        let msg = validation_message(
            r#"
[[panels]]
id = "services"
title = "Services"
links = [{ label = "About", submenu = "about" }]

[[panels]]
id = "about"
title = "About"
"#,
        );
        assert!(msg.contains("whose parent is the root list"));
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[scroll]
throttle_ms = 100
parallax_factor = 0.5
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str("[scroll]\nthrottle_ms = 16").unwrap();
        let merged = merge_toml(base, overlay);
        let scroll = merged.get("scroll").unwrap();
        assert_eq!(scroll.get("throttle_ms").unwrap().as_integer(), Some(16));
        assert_eq!(scroll.get("parallax_factor").unwrap().as_float(), Some(0.5));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(
            r#"
[[links]]
label = "A"
href = "a.html"

[[links]]
label = "B"
href = "b.html"
"#,
        )
        .unwrap();
        let overlay: toml::Value =
            toml::from_str("[[links]]\nlabel = \"C\"\nhref = \"c.html\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("links").unwrap().as_array().unwrap().len(), 1);
    }
}
